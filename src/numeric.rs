//! Numeric conversion helpers used across the project.
//!
//! Frame timestamps arrive as `f64` milliseconds while the simulation runs in
//! `f32` seconds. These helpers guard that boundary.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Convert the gap between two millisecond timestamps into clamped seconds.
///
/// The result lies in `[0, max_secs]`. A timestamp that runs backwards, or
/// a non-finite gap, yields zero.
///
/// # Examples
///
/// ```
/// use clamber::numeric::elapsed_secs;
/// assert!((elapsed_secs(1000.0, 1016.0, 0.032) - 0.016).abs() < 1e-6);
/// assert_eq!(elapsed_secs(1000.0, 2000.0, 0.032), 0.032);
/// assert_eq!(elapsed_secs(2000.0, 1000.0, 0.032), 0.0);
/// ```
#[must_use]
pub fn elapsed_secs(previous_ms: f64, now_ms: f64, max_secs: f32) -> f32 {
    let gap = (now_ms - previous_ms) / 1000.0;
    if !gap.is_finite() || gap <= 0.0 {
        return 0.0;
    }
    expect_f32(gap.min(f64::from(max_secs)))
}
