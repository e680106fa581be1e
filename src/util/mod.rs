//! Shared utilities: easing curves and duration helpers.

pub mod easing;

use web_time::Duration;

/// Seconds (as authored in markup and presets) to a [`Duration`].
///
/// Rounded to whole microseconds, so `0.2` is exactly 200 ms. Negative
/// and NaN values collapse to zero.
#[must_use]
pub fn secs(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    let micros = (f64::from(value) * 1e6).round();
    if micros >= u64::MAX as f64 {
        return Duration::MAX;
    }
    Duration::from_micros(micros as u64)
}

/// Milliseconds to a [`Duration`].
#[must_use]
pub const fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}
