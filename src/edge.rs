//! Edge table
//!
//! Edges of closed point lists, bucketed by the first line they cover.
//! Each edge steps its X crossing from line to line with an exact rational
//! stepper, no floating point involved.

use crate::path_storage::Point;
use crate::math::sign;

/// Directed, non-horizontal edge
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Edge {
    /// Segment the edge belongs to
    pub id: u16,
    /// First line covered
    pub y_top: i32,
    /// Last line covered
    pub y_bot: i32,
    /// Current X crossing, whole part
    pub x: i32,
    num: i32,
    den: i32,
    dir: i32,
    num_step: i32,
}

impl Edge {
    /// Build the edge from (x1,y1) to (x2,y2)
    ///
    /// `y3` is the Y of the next vertex not level with (x2,y2). When the
    /// outline keeps moving in the same vertical direction past the shared
    /// vertex, the vertex line belongs to the following edge only.
    pub fn new(id: u16, p1: Point, p2: Point, y3: i32) -> Self {
        debug_assert_ne!(p1.y, p2.y, "horizontal edge");
        let num_step = (p1.x - p2.x).abs();
        if p2.y > p1.y {
            let den = p2.y - p1.y;
            let mut e = Edge { id, y_top: p1.y, y_bot: p2.y, x: p1.x,
                               num: den >> 1, den, dir: sign(p2.x - p1.x), num_step };
            if y3 > p2.y {
                e.y_bot -= 1;
            }
            e
        } else {
            let den = p1.y - p2.y;
            let mut e = Edge { id, y_top: p2.y, y_bot: p1.y, x: p2.x,
                               num: den >> 1, den, dir: sign(p1.x - p2.x), num_step };
            if y3 < p2.y {
                e.y_top += 1;
                e.step();
            }
            e
        }
    }
    /// Advance the X crossing by one line
    pub fn step(&mut self) {
        self.num += self.num_step;
        if self.num >= self.den {
            let q = self.num / self.den;
            self.x += self.dir * q;
            self.num -= q * self.den;
        }
    }
}

/// Edges held in an arena, bucketed by their first line
#[derive(Debug,Default)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    buckets: Vec<Vec<usize>>,
    y0: i32,
}

impl EdgeTable {
    /// Create an empty table for lines y0 ..= y1
    pub fn new(y0: i32, y1: i32) -> Self {
        let n = if y1 >= y0 { (y1 - y0 + 1) as usize } else { 0 };
        Self { edges: vec![], buckets: vec![vec![]; n], y0 }
    }
    /// First line of the table
    pub fn first_line(&self) -> i32 {
        self.y0
    }
    /// Last line of the table
    pub fn last_line(&self) -> i32 {
        self.y0 + self.buckets.len() as i32 - 1
    }
    /// Total number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
    pub fn edge(&self, i: usize) -> &Edge {
        &self.edges[i]
    }
    pub fn edge_mut(&mut self, i: usize) -> &mut Edge {
        &mut self.edges[i]
    }
    /// Edges whose first line is y, most recently added first
    pub fn starting(&self, y: i32) -> impl Iterator<Item = usize> + '_ {
        let idx = y - self.y0;
        let bucket = if idx >= 0 {
            self.buckets.get(idx as usize).map(|b| b.as_slice()).unwrap_or(&[])
        } else {
            &[]
        };
        bucket.iter().rev().cloned()
    }
    /// Add every non-horizontal segment of a closed point list
    ///
    /// The last point must repeat the first one.
    pub fn add_path(&mut self, id: u16, pts: &[Point]) {
        for i in 1 .. pts.len() {
            let (p1, p2) = (pts[i-1], pts[i]);
            if p1.y == p2.y {
                continue;
            }
            let y3 = next_level_change(pts, i);
            self.push(Edge::new(id, p1, p2, y3));
        }
    }
    fn push(&mut self, e: Edge) {
        let idx = e.y_top - self.y0;
        if idx < 0 || idx as usize >= self.buckets.len() {
            log::warn!("edge starting at line {} outside of table {}..={}",
                       e.y_top, self.y0, self.last_line());
            return;
        }
        self.buckets[idx as usize].push(self.edges.len());
        self.edges.push(e);
    }
}

/// Y of the first vertex after `i` not level with vertex `i`
///
/// Wraps around the closed list, skipping the first point which repeats
/// the last.
fn next_level_change(pts: &[Point], i: usize) -> i32 {
    let n = pts.len();
    let y2 = pts[i].y;
    let mut j = i;
    for _ in 0 .. n {
        j += 1;
        if j == n {
            j = 1;
        }
        if pts[j].y != y2 {
            return pts[j].y;
        }
    }
    y2
}
