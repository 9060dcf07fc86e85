//! Derived quantities: the heat index ("feels like" temperature).

/// Below this temperature (°F) the Rothfusz regression is not applied
const HEAT_INDEX_MIN_F: f64 = 80.0;

#[inline]
fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

#[inline]
fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Apparent temperature in °C from air temperature (°C) and relative humidity (%).
///
/// Uses the NWS Rothfusz regression with its low- and high-humidity
/// adjustments. Returns `temp_c` unchanged when humidity is missing, when
/// the air is cooler than 80°F, or when the computation is not finite.
pub fn heat_index(temp_c: f64, humidity: Option<f64>) -> f64 {
    let Some(r) = humidity else {
        return temp_c;
    };

    let t = celsius_to_fahrenheit(temp_c);
    if t.is_nan() || t < HEAT_INDEX_MIN_F {
        return temp_c;
    }

    let mut hi = -42.379 + 2.04901523 * t + 10.14333127 * r
        - 0.22475541 * t * r
        - 6.83783e-3 * t * t
        - 5.481717e-2 * r * r
        + 1.22874e-3 * t * t * r
        + 8.5282e-4 * t * r * r
        - 1.99e-6 * t * t * r * r;

    if r < 13.0 && (80.0..=112.0).contains(&t) {
        hi -= ((13.0 - r) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if r > 85.0 && (80.0..=87.0).contains(&t) {
        hi += ((r - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    let result = fahrenheit_to_celsius(hi);
    if result.is_finite() {
        result
    } else {
        tracing::debug!(
            "Heat index not finite for {}°C / {}%RH, using air temperature",
            temp_c,
            r
        );
        temp_c
    }
}
