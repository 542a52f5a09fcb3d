//! Shapes
//!
//! A shape is built once and never changes, except for its translation.

use crate::path_storage::{PathStorage, Paint};
use crate::transform::Translation;
use crate::raster::ShapeIter;
use crate::error::{Error, Result};
use crate::math::MAX_COORD;

use std::fmt;

/// Default stroke width of a polygon
pub const DEFAULT_POLYGON_WIDTH : u16 = 3;
/// Default stroke width of polylines and lines
pub const DEFAULT_LINE_WIDTH : u16 = 2;

/// Filled, axis aligned rectangle
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Rectangle {
    /// Width in pixels
    pub w: i32,
    /// Height in lines
    pub h: i32,
    /// Fill color
    pub color: u8,
}

/// Geometry of a shape
#[derive(Debug,Clone,PartialEq)]
pub enum Geometry {
    Rect(Rectangle),
    Polygon(PathStorage),
    Polyline(PathStorage),
    Line(PathStorage),
}

/// Drawable shape with its own translation
#[derive(Debug,Clone,PartialEq)]
pub struct Shape {
    geometry: Geometry,
    /// Position of the shape, the only mutable part
    pub translation: Translation,
}

impl Shape {
    /// Rectangle of w x h pixels
    pub fn rect(w: i32, h: i32, color: u8) -> Result<Self> {
        if w < 1 {
            return Err(Error::InvalidDimension { what: "width", value: w });
        }
        if h < 1 {
            return Err(Error::InvalidDimension { what: "height", value: h });
        }
        if w > MAX_COORD {
            return Err(Error::DimensionTooLarge { what: "width", value: w, max: MAX_COORD });
        }
        if h > MAX_COORD {
            return Err(Error::DimensionTooLarge { what: "height", value: h, max: MAX_COORD });
        }
        Ok(Self::with_geometry(Geometry::Rect(Rectangle { w, h, color })))
    }
    /// Closed polygon, either filled or stroked
    pub fn polygon(points: &[(i32,i32)], paint: Paint) -> Result<Self> {
        let path = PathStorage::closed(points, paint)?;
        Ok(Self::with_geometry(Geometry::Polygon(path)))
    }
    /// Open polyline drawn with a pen of width pixels
    pub fn polyline(points: &[(i32,i32)], color: u8, width: u16) -> Result<Self> {
        let path = PathStorage::open(points, Paint::Stroke { color, width })?;
        Ok(Self::with_geometry(Geometry::Polyline(path)))
    }
    /// Open polyline with the default width
    pub fn polyline_default(points: &[(i32,i32)], color: u8) -> Result<Self> {
        Self::polyline(points, color, DEFAULT_LINE_WIDTH)
    }
    /// Line segment from (x1,y1) to (x2,y2)
    pub fn line(x1: i32, y1: i32, x2: i32, y2: i32, color: u8, width: u16) -> Result<Self> {
        let path = PathStorage::open(&[(x1,y1),(x2,y2)], Paint::Stroke { color, width })?;
        Ok(Self::with_geometry(Geometry::Line(path)))
    }
    /// Line segment with the default width
    pub fn line_default(x1: i32, y1: i32, x2: i32, y2: i32, color: u8) -> Result<Self> {
        Self::line(x1, y1, x2, y2, color, DEFAULT_LINE_WIDTH)
    }
    fn with_geometry(geometry: Geometry) -> Self {
        Self { geometry, translation: Translation::new() }
    }
    /// Move the shape to the pixel position (x,y)
    pub fn set_position(&mut self, x: i32, y: i32) -> &mut Self {
        self.translation.set_position(x, y);
        self
    }
    /// Move the shape, consuming and returning it
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.translation.set_position(x, y);
        self
    }
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Point list of non-rectangle shapes
    pub fn path(&self) -> Option<&PathStorage> {
        match &self.geometry {
            Geometry::Rect(_) => None,
            Geometry::Polygon(p) | Geometry::Polyline(p) | Geometry::Line(p) => Some(p),
        }
    }
    /// Start a new scan of the shape
    pub fn scan(&self) -> ShapeIter {
        ShapeIter::new(self)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.geometry {
            Geometry::Rect(r) => write!(f, "Rect({} x {},color[{}])", r.w, r.h, r.color)?,
            Geometry::Polygon(p) => write!(f, "Polygon({})", p)?,
            Geometry::Polyline(p) => write!(f, "Polyline({})", p)?,
            Geometry::Line(p) => write!(f, "Line({})", p)?,
        }
        write!(f, "@{}", self.translation)
    }
}
