/// Linear interpolation from `min` to `max`, clamped to the endpoints outside
/// `0..=1`.
pub fn lerp(v: f64, min: f64, max: f64) -> f64 {
    if v < 0.0 { return min; }
    if v > 1.0 { return max; }
    v * (max - min) + min
}
