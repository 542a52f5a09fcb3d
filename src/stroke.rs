//! Path Stroking
//!
//! Every segment of a stroked point list is turned into its own closed
//! outline: the segment swept by a box of the pen size. The outlines are
//! scan converted like any filled polygon and tagged with the segment they
//! came from so joints can be welded back together per line.

use crate::path_storage::{Point, PathStorage, list_minmax};
use crate::edge::EdgeTable;
use crate::math::{xfx, sign, udiff};

/// Narrowest pen used for offsets
pub const MIN_PEN : i32 = 3;

/// Half extents of the pen, X in 9.4 fixed point and Y in lines
pub fn half_extent(width: u16) -> (i32, i32) {
    let w = i32::from(width);
    if w >= MIN_PEN {
        (xfx(w) >> 1, (w - 1) >> 1)
    } else {
        (xfx(MIN_PEN) >> 1, 1)
    }
}

/// Closed outline of the segment p1-p2 swept by a pen of half extents (xr,yr)
///
/// Coordinates below zero saturate to zero.
pub fn segment_outline(p1: Point, p2: Point, xr: i32, yr: i32) -> [Point; 7] {
    let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
    let (a, b) = if dx < 0 { (p2, p1) } else { (p1, p2) };
    let pt = Point::from_fixed;
    let p = if sign(dx) == sign(dy) {
        // Falling to the right
        [pt(a.x + xr, udiff(a.y, yr)),
         pt(udiff(a.x, xr), udiff(a.y, yr)),
         pt(udiff(a.x, xr), a.y + yr),
         pt(udiff(b.x, xr), b.y + yr),
         pt(b.x + xr, b.y + yr),
         pt(b.x + xr, udiff(b.y, yr))]
    } else {
        // Rising to the right
        [pt(udiff(a.x, xr), udiff(a.y, yr)),
         pt(udiff(a.x, xr), a.y + yr),
         pt(a.x + xr, a.y + yr),
         pt(b.x + xr, b.y + yr),
         pt(b.x + xr, udiff(b.y, yr)),
         pt(udiff(b.x, xr), udiff(b.y, yr))]
    };
    [p[0], p[1], p[2], p[3], p[4], p[5], p[0]]
}

/// Build the edge table for a stroked point list
///
/// Segment ids start at 1.
pub fn stroke_edges(path: &PathStorage, width: u16) -> EdgeTable {
    let (xr, yr) = half_extent(width);
    let b = list_minmax(&path.points);
    let mut table = EdgeTable::new(udiff(b.min_y, yr), b.max_y + yr);
    for (i, (p1, p2)) in path.segments().enumerate() {
        let outline = segment_outline(p1, p2, xr, yr);
        table.add_path(i as u16 + 1, &outline);
    }
    log::trace!("stroke: {} segments, {} edges, lines {}..={}",
                path.points.len() - 1, table.len(), table.first_line(), table.last_line());
    table
}
