//! Point list storage
//!
//! Polygons, polylines and lines all share one representation: an ordered
//! list of points with a paint. Polygons repeat their first point at the end
//! of the list so every consecutive pair of points is one segment.

use crate::math::xfx;
use crate::math::xfx_int;
use crate::math::MAX_COORD;
use crate::error::{Error, Result};

use std::fmt;

/// Point with a 9.4 fixed point X and a whole line Y
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point from whole pixel coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x: xfx(x), y }
    }
    /// Create a point from a fixed point X and a line Y
    pub fn from_fixed(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How a point list is drawn
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Paint {
    /// Fill the inside of a closed point list
    Fill(u8),
    /// Draw the segments with a thick pen
    Stroke { color: u8, width: u16 },
}

impl Paint {
    /// Color used to draw
    pub fn color(&self) -> u8 {
        match *self {
            Paint::Fill(c) => c,
            Paint::Stroke { color, .. } => color,
        }
    }
    fn validate(&self) -> Result<()> {
        match *self {
            Paint::Stroke { width, .. } if width < 1 =>
                Err(Error::InvalidDimension { what: "stroke width", value: i32::from(width) }),
            _ => Ok(()),
        }
    }
}

/// Bounding box of a point list
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// Ordered points plus paint attributes
#[derive(Debug,Clone,PartialEq)]
pub struct PathStorage {
    pub points: Vec<Point>,
    pub paint: Paint,
    pub closed: bool,
}

impl PathStorage {
    /// Create a closed point list, the first point is repeated at the end
    pub fn closed(points: &[(i32,i32)], paint: Paint) -> Result<Self> {
        let mut path = Self::open(points, paint)?;
        let first = path.points[0];
        path.points.push(first);
        path.closed = true;
        Ok(path)
    }
    /// Create an open point list
    pub fn open(points: &[(i32,i32)], paint: Paint) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints { expected: 2, found: points.len() });
        }
        paint.validate()?;
        let points = points.iter()
            .map(|&(x,y)| check_point(x, y).map(|_| Point::new(x,y)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points, paint, closed: false })
    }
    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
    /// Bounding box of all points
    pub fn bounds(&self) -> Bounds {
        list_minmax(&self.points)
    }
}

/// Bounding box of a slice of points
///
/// An empty slice gives an inverted box.
pub fn list_minmax(pts: &[Point]) -> Bounds {
    let init = Bounds { min_x: i32::MAX, max_x: i32::MIN,
                        min_y: i32::MAX, max_y: i32::MIN };
    pts.iter().fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x), max_x: b.max_x.max(p.x),
        min_y: b.min_y.min(p.y), max_y: b.max_y.max(p.y),
    })
}

fn check_point(x: i32, y: i32) -> Result<()> {
    if x < 0 || y < 0 || x > MAX_COORD || y > MAX_COORD {
        Err(Error::CoordinateOutOfRange { x, y })
    } else {
        Ok(())
    }
}

impl fmt::Display for PathStorage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "({},{})", xfx_int(p.x), p.y)?;
        }
        write!(f, "]")?;
        match self.paint {
            Paint::Fill(c) => write!(f, ",fill=color{}", c),
            Paint::Stroke { color, width } => write!(f, ",stroke=color{},width={}", color, width),
        }
    }
}
