//! Numeric conversion utilities.

/// Convert f64 to u8 with clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert usize to u32, saturating at `u32::MAX`.
pub fn usize_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_u8() {
        assert_eq!(f64_to_u8(-3.0), 0);
        assert_eq!(f64_to_u8(127.5), 128);
        assert_eq!(f64_to_u8(400.0), 255);
        assert_eq!(f64_to_u8(f64::NAN), 0);
    }
}
