//! Vector shapes to display commands
//!
//! Rectangles, polygons, polylines and lines are scan converted and packed
//! into the line oriented command stream of a fixed function display
//! controller.
//!
//! How does this work
//!
//! ```text
//!    shapes = [Shape::rect(..), Shape::polygon(..), ..]
//!    comp = Compositor(shapes)
//!      ShapeIter per shape
//!        RectIter                -- one run per line
//!        PolyIter                -- EdgeTable, active edges, sorted crossings
//!          fill_run()            -- crossings paired left to right
//!          stroke_run()          -- segment outlines, joints welded
//!    render_scanlines(comp, sl, enc)
//!      sweep_scanline()
//!        next_line()             -- lowest line of all shapes
//!        next_run()              -- runs clipped into the scanline
//!        merge()                 -- sort, clip overlaps, close small gaps
//!      CmdEncoder::line()        -- jump / next line, skip, draw, continue
//!        CmdBuffer               -- chunks handed to the sink
//! ```
//!
//! ```
//! use vgr2d::{Shape, Paint, RasterConfig, generate, replay};
//!
//! let shapes = vec![
//!     Shape::rect(4, 2, 7).unwrap(),
//!     Shape::polygon(&[(10,0),(20,0),(15,8)], Paint::Fill(3)).unwrap().at(30, 10),
//!     Shape::line(0, 20, 60, 40, 0x1c, 3).unwrap(),
//! ];
//! let cfg = RasterConfig::new(100, 100).with_base_addr(0x1234);
//! let bytes = generate(&cfg, &shapes).unwrap();
//! assert_eq!(&bytes[..2], &[0x12, 0x34]);
//! assert_eq!(&bytes[bytes.len()-2..], &[0xff, 0xff]);
//!
//! let r = replay(&bytes, Some(cfg.xres())).unwrap();
//! assert_eq!(r.lines[0].y, 0);
//! ```

pub mod math;
pub mod error;
pub mod config;
pub mod transform;
pub mod path_storage;
pub mod shape;
pub mod edge;
pub mod stroke;
pub mod raster;
pub mod scan;
pub mod encoder;
pub mod decoder;
pub mod buffer;
pub mod dump;
pub mod color;
pub mod preview;
pub mod render;

pub use math::*;
pub use error::*;
pub use config::*;
pub use transform::*;
pub use path_storage::*;
pub use shape::*;
pub use edge::*;
pub use stroke::*;
pub use raster::*;
pub use scan::*;
pub use encoder::*;
pub use decoder::*;
pub use buffer::*;
pub use dump::*;
pub use color::*;
pub use preview::*;
pub use render::*;

/// Lines and runs of a single shape
///
/// Lines come in strictly increasing order. All runs of a line must be
/// taken before asking for the next line.
pub trait ScanLines {
    /// Line currently handed out, None once the shape is done
    fn next_line(&mut self) -> Option<i32>;
    /// Next run on line y, None once the line is done or if y is not the
    /// current line
    fn next_run(&mut self, y: i32) -> Option<scan::Run>;
}

/// Consumer of merged scanlines
pub trait Render {
    fn render(&mut self, sl: &scan::Scanline) -> Result<()>;
}
