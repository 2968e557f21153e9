/// Literal marking a missing measurement in either input format
pub const MISSING_VALUE: &str = "-9999";

/// Field counts per input line
pub const WEATHER_FIELD_COUNT: usize = 4;
pub const YIELD_FIELD_COUNT: usize = 2;

/// Source values are recorded in tenths of a unit
pub const TENTHS_DIVISOR: f64 = 10.0;

/// Stored precipitation is in millimetres, yearly totals are in centimetres
pub const MM_PER_CM: f64 = 10.0;

/// Date and year key layouts
pub const DATE_FORMAT: &str = "%Y%m%d";
pub const DATE_KEY_LEN: usize = 8;
pub const YEAR_KEY_LEN: usize = 4;

/// File names
pub const CONFIG_FILE_STEM: &str = "weather-yield-api";
pub const DEFAULT_DATABASE_FILE: &str = "app.db";
pub const DEFAULT_WEATHER_DIR: &str = "data/wx_data";
pub const DEFAULT_YIELD_FILE: &str = "data/yld_data/US_corn_grain_yield.txt";

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "WEATHER_API";

/// Server defaults
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Pagination defaults
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
