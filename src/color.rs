//! Colors
//!
//! Colors in the command stream are 8 bit indices. For previews they are
//! read as RGB332, 3 bits red, 3 bits green and 2 bits blue.

/// Color Red, Green, Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Spread an n bit value over 0 ..= 255
fn expand(v: u8, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((u32::from(v) * 255 + max / 2) / max) as u8
}

impl Rgb8 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
    /// Expand an RGB332 color index
    pub fn from_rgb332(c: u8) -> Self {
        Self::new(expand(c >> 5, 3),
                  expand((c >> 2) & 0x7, 3),
                  expand(c & 0x3, 2))
    }
}

impl From<Rgb8> for image::Rgb<u8> {
    fn from(c: Rgb8) -> image::Rgb<u8> {
        image::Rgb([c.r, c.g, c.b])
    }
}
