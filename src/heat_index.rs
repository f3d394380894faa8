/// Below this air temperature the simplified Steadman approximation is used.
pub const REGRESSION_THRESHOLD_F: f64 = 80.0;

/// Apparent temperature in °F for an air temperature (°F) and relative
/// humidity (%). Unrounded; callers round as needed.
pub fn heat_index(temp_f: f64, humidity: f64) -> f64 {
    if temp_f < REGRESSION_THRESHOLD_F {
        return simple_heat_index(temp_f, humidity);
    }
    rothfusz_heat_index(temp_f, humidity)
}

/// `heat_index` rounded to the nearest whole degree.
pub fn rounded_heat_index(temp_f: f64, humidity: f64) -> f64 {
    heat_index(temp_f, humidity).round()
}

/// Heat index only when both inputs are present.
pub fn heat_index_from(temp_f: Option<f64>, humidity: Option<f64>) -> Option<f64> {
    match (temp_f, humidity) {
        (Some(t), Some(h)) => Some(rounded_heat_index(t, h)),
        _ => None,
    }
}

pub fn simple_heat_index(temp_f: f64, humidity: f64) -> f64 {
    0.5 * (temp_f + 61.0 + ((temp_f - 68.0) * 1.2) + (humidity * 0.094))
}

/// NWS Rothfusz regression with the low- and high-humidity corrections.
pub fn rothfusz_heat_index(temp_f: f64, humidity: f64) -> f64 {
    let t = temp_f;
    let h = humidity;
    let mut hi = -42.379 + 2.04901523 * t + 10.14333127 * h
        - 0.22475541 * t * h
        - 0.00683783 * t * t
        - 0.05481717 * h * h
        + 0.00122874 * t * t * h
        + 0.00085282 * t * h * h
        - 0.00000199 * t * t * h * h;

    if h < 13.0 && (80.0..=112.0).contains(&t) {
        hi -= ((13.0 - h) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if h > 85.0 && (80.0..=87.0).contains(&t) {
        hi += ((h - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }
    hi
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn celsius_to_fahrenheit(celsius: Option<f64>) -> Option<f64> {
    celsius.map(|c| round_to(c * 9.0 / 5.0 + 32.0, 1))
}

pub fn mps_to_mph(mps: Option<f64>) -> Option<f64> {
    mps.map(|v| round_to(v * 2.237, 1))
}

pub fn kmh_to_mph(kmh: Option<f64>) -> Option<f64> {
    kmh.map(|v| round_to(v / 1.609344, 1))
}

pub fn meters_to_miles(meters: Option<f64>) -> Option<f64> {
    meters.map(|v| round_to(v / 1609.34, 1))
}
