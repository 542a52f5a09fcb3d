//! Fixed point math
//!
//! X coordinates are carried in 9.4 fixed point (4 fractional bits),
//! Y coordinates are whole scanlines.

/// Number of fractional bits in an X coordinate
pub const XFRAC : u32 = 4;
/// One whole X unit in fixed point
pub const XSCALE : i32 = 1 << XFRAC;
/// Minimum renderable width or step, one whole X unit
pub const MIN_DX : i32 = XSCALE;
/// Largest whole pixel coordinate a point may carry
///
/// Keeps every 9.4 X value inside 16 bits.
pub const MAX_COORD : i32 = (0xffff >> XFRAC) as i32;

/// Convert whole pixels to 9.4 fixed point
pub fn xfx(x: i32) -> i32 {
    x << XFRAC
}

/// Convert 9.4 fixed point to whole pixels, rounding down
pub fn xfx_int(x: i32) -> i32 {
    x >> XFRAC
}

/// Sign of a value, zero counts as positive
pub fn sign(v: i32) -> i32 {
    if v >= 0 { 1 } else { -1 }
}

/// Subtract, saturating at zero
pub fn udiff(a: i32, b: i32) -> i32 {
    if a > b { a - b } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_conversions() {
        assert_eq!(xfx(1), MIN_DX);
        assert_eq!(xfx(320), 5120);
        assert_eq!(xfx_int(5120), 320);
        assert_eq!(xfx_int(31), 1);
        assert_eq!(xfx(MAX_COORD), 0xfff0);
    }

    #[test]
    fn sign_of_zero_is_positive() {
        assert_eq!(sign(0), 1);
        assert_eq!(sign(-7), -1);
        assert_eq!(sign(7), 1);
    }

    #[test]
    fn udiff_saturates() {
        assert_eq!(udiff(10, 3), 7);
        assert_eq!(udiff(3, 10), 0);
        assert_eq!(udiff(3, 3), 0);
    }
}
