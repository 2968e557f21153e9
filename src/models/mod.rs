pub mod crop_yield;
pub mod stats;
pub mod weather;

pub use crop_yield::CornYieldRecord;
pub use stats::WeatherYearStats;
pub use weather::{WeatherObservation, WeatherReading};
