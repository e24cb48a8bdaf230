//! Temperature scale conversions and the aggregate response payload.

use serde::Serialize;

/// Convert a Celsius reading to Fahrenheit.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Convert a Celsius reading to Kelvin.
#[must_use]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}

/// Final response payload: one observation in all three scales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherReport {
    /// Build the report from the raw Celsius observation.
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: celsius_to_fahrenheit(celsius),
            temp_k: celsius_to_kelvin(celsius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    #[rstest]
    #[case(0.0, 32.0, 273.15)]
    #[case(100.0, 212.0, 373.15)]
    #[case(-40.0, -40.0, 233.15)]
    #[case(28.5, 83.3, 301.65)]
    #[case(-273.15, -459.67, 0.0)]
    fn test_conversion_formulas(#[case] celsius: f64, #[case] fahrenheit: f64, #[case] kelvin: f64) {
        assert!((celsius_to_fahrenheit(celsius) - fahrenheit).abs() < EPSILON);
        assert!((celsius_to_kelvin(celsius) - kelvin).abs() < EPSILON);
    }

    #[test]
    fn test_report_carries_all_three_scales() {
        let report = WeatherReport::from_celsius(25.0);
        assert!((report.temp_c - 25.0).abs() < EPSILON);
        assert!((report.temp_f - 77.0).abs() < EPSILON);
        assert!((report.temp_k - 298.15).abs() < EPSILON);
    }

    #[test]
    fn test_report_serializes_with_scale_suffixed_keys() {
        let report = WeatherReport::from_celsius(0.0);
        let json = serde_json::to_value(&report).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("temp_C"));
        assert!(object.contains_key("temp_F"));
        assert!(object.contains_key("temp_K"));
    }
}
