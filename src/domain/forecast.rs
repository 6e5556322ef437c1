use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::infrastructure::ForecastError;

/// Time window a forecast covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastType {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "5days")]
    FiveDays,
    #[serde(rename = "10days")]
    TenDays,
    #[serde(rename = "weekend")]
    Weekend,
}

impl ForecastType {
    pub const ALL: [Self; 4] = [Self::Today, Self::FiveDays, Self::TenDays, Self::Weekend];

    /// Path segment used by sources to address the horizon
    pub const fn value(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::FiveDays => "5days",
            Self::TenDays => "10days",
            Self::Weekend => "weekend",
        }
    }
}

impl fmt::Display for ForecastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ForecastType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.value().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ForecastError::configuration(format!("unrecognized forecast horizon '{wanted}'"))
            })
    }
}

/// A converted temperature.
///
/// Whole values print as integers, anything with a fractional part is
/// rounded to a single decimal digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    Whole(i64),
    Fractional(f64),
}

impl Temperature {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_value(value: f64) -> Self {
        // i64::MAX as f64 is 2^63, the first value that no longer fits
        let fits_i64 = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if value.fract() == 0.0 && fits_i64 {
            Self::Whole(value as i64)
        } else if !value.is_finite() || value.abs() >= i64::MAX as f64 {
            Self::Fractional(value)
        } else {
            // + 0.0 turns a rounded -0.0 into 0.0
            Self::Fractional((value * 10.0).round() / 10.0 + 0.0)
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub const fn value(self) -> f64 {
        match self {
            Self::Whole(v) => v as f64,
            Self::Fractional(v) => v,
        }
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::Whole(0)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole(v) => write!(f, "{v}"),
            Self::Fractional(v) => write!(f, "{v:.1}"),
        }
    }
}

// Fractional values travel as text so consumers see exactly one decimal.
impl Serialize for Temperature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Whole(v) => serializer.serialize_i64(*v),
            Self::Fractional(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

/// One forecast entry produced by a source plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    #[serde(rename = "currentTemp")]
    current_temp: Temperature,
    humidity: String,
    wind: String,
    #[serde(rename = "highTemp")]
    high_temp: Temperature,
    #[serde(rename = "lowTemp")]
    low_temp: Temperature,
    description: String,
    #[serde(rename = "forecastDate")]
    forecast_date: String,
    #[serde(rename = "forecastType")]
    forecast_type: ForecastType,
}

impl Forecast {
    /// Start a forecast record; remaining fields are filled by the `with_*` steps
    pub fn new(forecast_type: ForecastType, current_temp: Temperature) -> Self {
        Self {
            current_temp,
            humidity: String::new(),
            wind: String::new(),
            high_temp: Temperature::default(),
            low_temp: Temperature::default(),
            description: String::new(),
            forecast_date: String::new(),
            forecast_type,
        }
    }

    pub fn with_range(mut self, high: Temperature, low: Temperature) -> Self {
        self.high_temp = high;
        self.low_temp = low;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_wind(mut self, wind: impl Into<String>) -> Self {
        self.wind = wind.into();
        self
    }

    pub fn with_humidity(mut self, humidity: impl Into<String>) -> Self {
        self.humidity = humidity.into();
        self
    }

    pub fn with_date(mut self, forecast_date: impl Into<String>) -> Self {
        self.forecast_date = forecast_date.into();
        self
    }

    pub const fn current_temp(&self) -> Temperature {
        self.current_temp
    }

    pub fn humidity(&self) -> &str {
        &self.humidity
    }

    pub fn wind(&self) -> &str {
        &self.wind
    }

    pub const fn high_temp(&self) -> Temperature {
        self.high_temp
    }

    pub const fn low_temp(&self) -> Temperature {
        self.low_temp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn forecast_date(&self) -> &str {
        &self.forecast_date
    }

    pub const fn forecast_type(&self) -> ForecastType {
        self.forecast_type
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const OFFSET: &str = "    ";

        let date = if self.forecast_date.is_empty() {
            chrono::Local::now().format("%Y-%m-%d").to_string()
        } else {
            self.forecast_date.clone()
        };
        writeln!(f, ">> {date}")?;
        if self.forecast_type == ForecastType::Today {
            writeln!(f, "{OFFSET}{}°", self.current_temp)?;
        }
        writeln!(
            f,
            "{OFFSET}High {}° / Low {}° ({})",
            self.high_temp, self.low_temp, self.description
        )?;
        write!(f, "{OFFSET}Wind: {} / Humidity: {}", self.wind, self.humidity)
    }
}
