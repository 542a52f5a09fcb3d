//! Translations
//!
//! Shapes only support integer translation. X is held in 9.4 fixed point
//! so it can be added directly to shape coordinates. Offsets saturate at
//! the i32 range, anything that far out is off the raster anyway.

use crate::math::XSCALE;
use crate::math::xfx_int;

use std::fmt;

/// Translation of a shape's local coordinates
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Translation {
    /// X offset, 9.4 fixed point
    pub tx: i32,
    /// Y offset, lines
    pub ty: i32,
}

impl Translation {
    /// Creates a new, empty Translation
    pub fn new() -> Self {
        Self { tx: 0, ty: 0 }
    }
    /// Create a Translation to the pixel position (x,y)
    pub fn at(x: i32, y: i32) -> Self {
        Self { tx: x.saturating_mul(XSCALE), ty: y }
    }
    /// Move to the pixel position (x,y)
    pub fn set_position(&mut self, x: i32, y: i32) {
        *self = Self::at(x, y);
    }
    /// Add a pixel offset to the translation
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.tx = self.tx.saturating_add(dx.saturating_mul(XSCALE));
        self.ty = self.ty.saturating_add(dy);
    }
    /// Apply the translation to a fixed point X and a line Y
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        (x.saturating_add(self.tx), y.saturating_add(self.ty))
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", xfx_int(self.tx), self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_and_translate() {
        let mut t = Translation::new();
        assert_eq!(t.apply(5, 5), (5, 5));
        t.set_position(3, 4);
        assert_eq!(t, Translation { tx: 48, ty: 4 });
        t.translate(-1, 2);
        assert_eq!(t, Translation::at(2, 6));
        assert_eq!(t.apply(8, 1), (40, 7));
        assert_eq!(format!("{}", t), "(2,6)");
    }

    #[test]
    fn far_offsets_saturate() {
        let t = Translation::at(1 << 28, i32::MAX);
        assert_eq!(t.tx, i32::MAX);
        assert_eq!(t.apply(16, 5), (i32::MAX, i32::MAX));
        let mut t = Translation::at(-(1 << 28), 0);
        t.translate(-1, i32::MIN);
        assert_eq!(t, Translation { tx: i32::MIN, ty: i32::MIN });
        assert_eq!(t.apply(0, -1), (i32::MIN, i32::MIN));
    }
}
