use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::infrastructure::ForecastError;

/// Temperature unit understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(alias = "Celsius", alias = "c", alias = "C")]
    Celsius,
    #[serde(alias = "Fahrenheit", alias = "f", alias = "F")]
    Fahrenheit,
}

impl Unit {
    pub const ALL: [Self; 2] = [Self::Celsius, Self::Fahrenheit];

    /// Title-cased name, as accepted on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "celsius" | "c" => Ok(Self::Celsius),
            "fahrenheit" | "f" => Ok(Self::Fahrenheit),
            other => Err(ForecastError::configuration(format!(
                "unknown unit '{other}', expected one of: Celsius, Fahrenheit"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Celsius", Unit::Celsius)]
    #[case("celsius", Unit::Celsius)]
    #[case("C", Unit::Celsius)]
    #[case(" FAHRENHEIT ", Unit::Fahrenheit)]
    #[case("f", Unit::Fahrenheit)]
    fn parses_unit_names(#[case] input: &str, #[case] expected: Unit) {
        assert_eq!(input.parse::<Unit>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = "kelvin".parse::<Unit>().unwrap_err();
        assert!(err.to_string().contains("kelvin"));
    }

    #[test]
    fn deserializes_from_config_values() {
        let unit: Unit = serde_json::from_str("\"celsius\"").unwrap();
        assert_eq!(unit, Unit::Celsius);
        let unit: Unit = serde_json::from_str("\"Fahrenheit\"").unwrap();
        assert_eq!(unit, Unit::Fahrenheit);
    }
}
