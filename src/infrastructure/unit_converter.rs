//! Temperature unit conversion
//!
//! Conversion never fails: text that is not a number (such as the `--`
//! placeholder sources print for missing values) converts to `0`.

use crate::domain::{Temperature, Unit};

/// Convert a raw temperature reading from `native` into `dest`.
///
/// `dest == None` keeps the native unit.
pub fn convert(raw: &str, native: Unit, dest: Option<Unit>) -> Temperature {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => convert_value(value, native, dest),
        _ => Temperature::Whole(0),
    }
}

pub fn convert_value(value: f64, native: Unit, dest: Option<Unit>) -> Temperature {
    let converted = match dest {
        Some(Unit::Celsius) if native == Unit::Fahrenheit => to_celsius(value),
        Some(Unit::Fahrenheit) if native == Unit::Celsius => to_fahrenheit(value),
        _ => value,
    };
    Temperature::from_value(converted)
}

fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converter bound to the native unit of one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConverter {
    native: Unit,
}

impl UnitConverter {
    pub const fn new(native: Unit) -> Self {
        Self { native }
    }

    pub const fn native_unit(&self) -> Unit {
        self.native
    }

    pub fn convert(&self, raw: &str, dest: Option<Unit>) -> Temperature {
        convert(raw, self.native, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("32", Unit::Fahrenheit, Some(Unit::Celsius), Temperature::Whole(0))]
    #[case("0", Unit::Celsius, Some(Unit::Fahrenheit), Temperature::Whole(32))]
    #[case("68", Unit::Fahrenheit, Some(Unit::Celsius), Temperature::Whole(20))]
    #[case("75", Unit::Fahrenheit, Some(Unit::Celsius), Temperature::Fractional(23.9))]
    #[case("60", Unit::Fahrenheit, Some(Unit::Celsius), Temperature::Fractional(15.6))]
    #[case("37", Unit::Celsius, Some(Unit::Fahrenheit), Temperature::Fractional(98.6))]
    #[case("98.6", Unit::Fahrenheit, None, Temperature::Fractional(98.6))]
    #[case(" 72 ", Unit::Fahrenheit, Some(Unit::Fahrenheit), Temperature::Whole(72))]
    #[case("1e20", Unit::Fahrenheit, None, Temperature::Fractional(1e20))]
    #[case("123456789012345678901", Unit::Celsius, None, Temperature::Fractional(123_456_789_012_345_678_901.0))]
    fn converts_between_units(
        #[case] raw: &str,
        #[case] native: Unit,
        #[case] dest: Option<Unit>,
        #[case] expected: Temperature,
    ) {
        assert_eq!(convert(raw, native, dest), expected);
    }

    #[rstest]
    #[case("not-a-number")]
    #[case("--")]
    #[case("")]
    #[case("inf")]
    #[case("NaN")]
    fn unparsable_input_becomes_zero(#[case] raw: &str) {
        assert_eq!(
            convert(raw, Unit::Celsius, Some(Unit::Fahrenheit)),
            Temperature::Whole(0)
        );
    }

    #[test]
    fn near_zero_result_has_no_negative_sign() {
        assert_eq!(convert("31.97", Unit::Fahrenheit, Some(Unit::Celsius)).to_string(), "0.0");
    }

    #[test]
    fn converter_uses_its_native_unit() {
        let converter = UnitConverter::new(Unit::Fahrenheit);
        assert_eq!(converter.native_unit(), Unit::Fahrenheit);
        assert_eq!(converter.convert("212", Some(Unit::Celsius)), Temperature::Whole(100));
        assert_eq!(converter.convert("212", None), Temperature::Whole(212));
    }

    proptest! {
        #[test]
        fn identity_conversion_keeps_integers(value in -150i64..150, native_is_celsius in any::<bool>(), same_dest in any::<bool>()) {
            let native = if native_is_celsius { Unit::Celsius } else { Unit::Fahrenheit };
            let dest = if same_dest { Some(native) } else { None };
            prop_assert_eq!(convert(&value.to_string(), native, dest), Temperature::Whole(value));
        }

        #[test]
        fn identity_conversion_keeps_large_magnitudes(exponent in 19i32..300, negative in any::<bool>()) {
            let value = if negative { -(10f64.powi(exponent)) } else { 10f64.powi(exponent) };
            prop_assert_eq!(convert(&format!("{value:e}"), Unit::Fahrenheit, None).value(), value);
        }

        #[test]
        fn identity_conversion_rounds_fractions(tenths in -1500i64..1500) {
            prop_assume!(tenths % 10 != 0);
            #[allow(clippy::cast_precision_loss)]
            let expected = tenths as f64 / 10.0;
            let raw = format!("{expected:.1}");
            prop_assert_eq!(convert(&raw, Unit::Celsius, None).to_string(), raw);
        }
    }
}
