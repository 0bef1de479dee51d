/// Progress fractions this close to 1.0 count as finished.
pub const COMPLETE_EPSILON: f32 = 0.001;

/// Convert a 0-100 launch percentage into a 0-1 fraction.
#[must_use]
pub fn progress_fraction(percent: f32) -> f32 {
    percent / 100.0
}

/// Whether a progress fraction is close enough to 1.0 to treat as done.
#[must_use]
pub fn is_complete(fraction: f32) -> bool {
    (1.0 - fraction).abs() < COMPLETE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_percent() {
        assert_eq!(progress_fraction(0.0), 0.0);
        assert_eq!(progress_fraction(50.0), 0.5);
        assert_eq!(progress_fraction(100.0), 1.0);
    }

    #[test]
    fn completion_uses_tolerance() {
        assert!(is_complete(1.0));
        assert!(is_complete(0.9995));
        assert!(is_complete(1.0005));
        assert!(!is_complete(0.998));
        assert!(!is_complete(0.0));
    }
}
