pub mod line;
pub mod weather_reader;
pub mod yield_reader;

pub use line::{LineRejection, ParsedLine};
pub use weather_reader::{parse_weather_line, StationFile, WeatherReader};
pub use yield_reader::{parse_yield_line, YieldReader};
