//! Preview images of a command stream
//!
//! The stream is played back into an RGB image, one pixel per whole X
//! unit, colors read as RGB332.

use std::path::Path;

use image::RgbImage;

use crate::color::Rgb8;
use crate::config::RasterConfig;
use crate::decoder::replay;
use crate::error::Result;
use crate::math::{xfx_int, XSCALE};

/// Play back a whole stream into an image of the configured raster size
///
/// Pixels not drawn stay black. Any X unit a run touches is colored.
pub fn render_preview(stream: &[u8], config: &RasterConfig) -> Result<RgbImage> {
    config.validate()?;
    let r = replay(stream, Some(config.xres()))?;
    let (w, h) = (u32::from(config.width), u32::from(config.height));
    let mut img = RgbImage::new(w, h);
    for line in &r.lines {
        if line.y < 0 || line.y as u32 >= h {
            log::warn!("preview: line {} outside of the raster", line.y);
            continue;
        }
        for run in &line.runs {
            let c = image::Rgb::from(Rgb8::from_rgb332(run.color));
            let x1 = xfx_int(run.x1).max(0) as u32;
            let x2 = (xfx_int(run.x2 + XSCALE - 1).max(0) as u32).min(w);
            for x in x1 .. x2 {
                img.put_pixel(x, line.y as u32, c);
            }
        }
    }
    log::debug!("preview: {} lines replayed into {}x{}", r.lines.len(), w, h);
    Ok(img)
}

/// Save a preview of the stream, format chosen by the file extension
pub fn write_preview<P: AsRef<Path>>(path: P, stream: &[u8], config: &RasterConfig) -> Result<()> {
    let img = render_preview(stream, config)?;
    img.save(path)?;
    Ok(())
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let a = image::open(f1)?.to_rgb8();
    let b = image::open(f2)?.to_rgb8();
    if a.dimensions() != b.dimensions() {
        return Ok(false);
    }
    let mut same = true;
    for (x, y, p) in a.enumerate_pixels() {
        let q = b.get_pixel(x, y);
        if p != q {
            log::info!("[{},{}]: {:?} {:?}", x, y, p, q);
            same = false;
        }
    }
    Ok(same)
}
