//! Raster configuration

use crate::math::xfx;
use crate::encoder::MAX_PACKED_SIZE;
use crate::error::{Error, Result};

/// Largest raster width in pixels, 9.4 X values must fit in 16 bits
pub const MAX_WIDTH : u16 = 4095;
/// Largest raster height, a jump to line 4095 would read as the end word
pub const MAX_HEIGHT : u16 = 4095;
/// Smallest chunk able to hold a line header, one run and the terminator
pub const MIN_CHUNK_SIZE : usize = 4 + MAX_PACKED_SIZE;

/// Target raster and transport settings
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct RasterConfig {
    /// Address written big-endian in front of the command stream
    pub base_addr: u16,
    /// Raster width in pixels
    pub width: u16,
    /// Raster height in lines
    pub height: u16,
    /// Bytes handed to the sink at a time
    pub chunk_size: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { base_addr: 0, width: 320, height: 240, chunk_size: 254 }
    }
}

impl RasterConfig {
    /// Create a new configuration for a raster of width x height
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, .. Self::default() }
    }
    /// Set the base address
    pub fn with_base_addr(mut self, base_addr: u16) -> Self {
        self.base_addr = base_addr;
        self
    }
    /// Set the sink chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
    /// Raster width in 9.4 fixed point
    pub fn xres(&self) -> i32 {
        xfx(i32::from(self.width))
    }
    /// Raster height in lines
    pub fn yres(&self) -> i32 {
        i32::from(self.height)
    }
    /// Check the configuration against the command stream limits
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(Error::InvalidConfig(
                format!("width {} not in 1..={}", self.width, MAX_WIDTH)));
        }
        if self.height == 0 || self.height > MAX_HEIGHT {
            return Err(Error::InvalidConfig(
                format!("height {} not in 1..={}", self.height, MAX_HEIGHT)));
        }
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(Error::InvalidConfig(
                format!("chunk size {} below {}", self.chunk_size, MIN_CHUNK_SIZE)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = RasterConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.xres(), 320 * 16);
        assert_eq!(c.yres(), 240);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(RasterConfig::new(0, 10).validate().is_err());
        assert!(RasterConfig::new(10, 0).validate().is_err());
        assert!(RasterConfig::new(4096, 10).validate().is_err());
        assert!(RasterConfig::new(10, 4096).validate().is_err());
        assert!(RasterConfig::new(4095, 4095).validate().is_ok());
        let c = RasterConfig::new(10, 10).with_chunk_size(MIN_CHUNK_SIZE - 1);
        match c.validate() {
            Err(Error::InvalidConfig(msg)) => assert!(msg.contains("chunk size")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn builder_setters() {
        let c = RasterConfig::new(100, 50).with_base_addr(0x1234).with_chunk_size(64);
        assert_eq!(c.base_addr, 0x1234);
        assert_eq!(c.chunk_size, 64);
        assert_eq!(c.width, 100);
        assert_eq!(c.height, 50);
    }
}
