//! Scene rendering
//!
//! The compositor walks every shape of a scene in step, one line at a
//! time, and hands the merged runs of each line to a renderer. The
//! command encoder is the renderer producing the byte stream.

use std::io::Write;

use crate::config::RasterConfig;
use crate::dump::HexDump;
use crate::encoder::CmdEncoder;
use crate::error::Result;
use crate::raster::ShapeIter;
use crate::scan::Scanline;
use crate::shape::Shape;
use crate::{Render, ScanLines};

/// Multi-way merge of the lines of every shape in a scene
#[derive(Debug)]
pub struct Compositor {
    iters: Vec<ShapeIter>,
    yres: i32,
    xres: i32,
    /// Runs dropped because a line was full
    dropped: usize,
}

impl Compositor {
    /// Start a scan of shapes on the configured raster
    pub fn new(shapes: &[Shape], config: &RasterConfig) -> Self {
        let iters = shapes.iter().map(|s| {
            log::trace!("scan {}", s);
            s.scan()
        }).collect();
        Self { iters, yres: config.yres(), xres: config.xres(), dropped: 0 }
    }
    /// Scanline sized for this raster
    pub fn scanline(&self) -> Scanline {
        Scanline::new(self.xres)
    }
    /// Runs dropped so far because a line was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }
    /// Fill sl with the next line holding any runs
    ///
    /// Lines above the raster are consumed and skipped, as are lines
    /// left empty after merging. Returns false once every shape is done
    /// or the next line is below the raster.
    pub fn sweep_scanline(&mut self, sl: &mut Scanline) -> bool {
        loop {
            let mut next : Option<i32> = None;
            self.iters.retain_mut(|it| match it.next_line() {
                Some(y) => {
                    next = Some(next.map_or(y, |n| n.min(y)));
                    true
                }
                None => false,
            });
            let y = match next {
                Some(y) if y < self.yres => y,
                _ => return false,
            };
            sl.reset(y);
            for it in self.iters.iter_mut() {
                while let Some(run) = it.next_run(y) {
                    sl.add_run(run);
                }
            }
            if sl.dropped() > 0 {
                log::warn!("line {}: {} runs dropped, more than {} on the line",
                           y, sl.dropped(), crate::scan::MAX_RUNS);
                self.dropped += sl.dropped();
            }
            if y < 0 {
                continue;
            }
            sl.merge();
            if sl.is_empty() {
                log::trace!("line {}: empty after merge", y);
                continue;
            }
            return true;
        }
    }
}

/// Render every line of the scene, returns the number of lines rendered
pub fn render_scanlines<REN>(comp: &mut Compositor, sl: &mut Scanline, ren: &mut REN) -> Result<usize>
    where REN: Render
{
    let mut n = 0;
    while comp.sweep_scanline(sl) {
        ren.render(sl)?;
        n += 1;
    }
    Ok(n)
}

/// Write the command stream of a scene to a writer
///
/// Bytes reach the writer in chunks of the configured size. Returns the
/// number of bytes written, header and end word included.
pub fn generate_to<W: Write>(config: &RasterConfig, shapes: &[Shape], out: W) -> Result<usize> {
    config.validate()?;
    log::debug!("generate: {} shapes on {}x{} at {:#06x}",
                shapes.len(), config.width, config.height, config.base_addr);
    let mut comp = Compositor::new(shapes, config);
    let mut sl = comp.scanline();
    let mut enc = CmdEncoder::new(out, config)?;
    let lines = render_scanlines(&mut comp, &mut sl, &mut enc)?;
    let (_, n) = enc.finish()?;
    log::debug!("generate: {} lines, {} bytes, {} runs dropped", lines, n, comp.dropped());
    Ok(n)
}

/// Command stream of a scene, header and end word included
pub fn generate(config: &RasterConfig, shapes: &[Shape]) -> Result<Vec<u8>> {
    let mut out = vec![];
    generate_to(config, shapes, &mut out)?;
    Ok(out)
}

/// Command stream of a scene as hex text, one line per chunk
pub fn dump(config: &RasterConfig, shapes: &[Shape]) -> Result<String> {
    let mut s = String::new();
    generate_to(config, shapes, HexDump::new(&mut s))?;
    Ok(s)
}
