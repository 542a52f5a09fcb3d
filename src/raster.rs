//! Shape scan iterators
//!
//! Each shape is converted lazily, one line at a time. A scan only moves
//! forward; build a new iterator with [`Shape::scan`] to scan again.
//!
//! [`Shape::scan`]: crate::Shape::scan

use crate::shape::{Shape, Geometry, Rectangle};
use crate::path_storage::{PathStorage, Paint};
use crate::transform::Translation;
use crate::edge::EdgeTable;
use crate::stroke::stroke_edges;
use crate::scan::Run;
use crate::math::XSCALE;
use crate::ScanLines;

/// Rectangle iterator, one run per line
#[derive(Debug)]
pub struct RectIter {
    y: i32,
    y2: i32,
    x1: i32,
    x2: i32,
    color: u8,
}

impl RectIter {
    pub fn new(rect: &Rectangle, tr: &Translation) -> Self {
        let (x1, y) = tr.apply(0, 0);
        let w = rect.w.saturating_sub(1).saturating_mul(XSCALE);
        let (x2, y2) = tr.apply(w, rect.h.saturating_sub(1));
        // next_run steps one line past y2
        Self { y, y2: y2.min(i32::MAX - 1), x1, x2, color: rect.color }
    }
}

impl ScanLines for RectIter {
    fn next_line(&mut self) -> Option<i32> {
        if self.y <= self.y2 { Some(self.y) } else { None }
    }
    fn next_run(&mut self, y: i32) -> Option<Run> {
        if self.y != y || self.y > self.y2 {
            return None;
        }
        self.y += 1;
        Some(Run::new(self.x1, self.x2, self.color))
    }
}

/// Active edge table iterator for filled and stroked point lists
#[derive(Debug)]
pub struct PolyIter {
    table: EdgeTable,
    /// Edges crossing the current line
    active: Vec<usize>,
    /// Sorted X crossings on the current line with their segment id
    crossings: Vec<(i32, u16)>,
    /// Segment ids seen while welding a stroke joint
    seen: Vec<(u16, i32)>,
    /// Next crossing to hand out
    cur: usize,
    /// Current line, shape local
    y: i32,
    tr: Translation,
    color: u8,
}

impl PolyIter {
    /// Fill the inside of a closed point list
    pub fn fill(path: &PathStorage, tr: &Translation) -> Self {
        let b = path.bounds();
        let mut table = EdgeTable::new(b.min_y, b.max_y);
        table.add_path(0, &path.points);
        Self::with_table(table, tr, path.paint.color())
    }
    /// Stroke every segment of a point list with a pen of width pixels
    pub fn stroke(path: &PathStorage, width: u16, tr: &Translation) -> Self {
        let table = stroke_edges(path, width);
        Self::with_table(table, tr, path.paint.color())
    }
    fn with_table(table: EdgeTable, tr: &Translation, color: u8) -> Self {
        let y = table.first_line();
        let mut it = Self { table, active: vec![], crossings: vec![], seen: vec![],
                            cur: 0, y, tr: *tr, color };
        it.load_line();
        it
    }
    /// Drop finished edges and admit the edges starting on line y
    fn advance(&mut self, y: i32) {
        let table = &self.table;
        self.active.retain(|&i| table.edge(i).y_bot >= y);
        self.active.extend(table.starting(y));
        self.y = y;
    }
    /// Find the next line with active edges and sort its crossings
    fn load_line(&mut self) {
        self.advance(self.y);
        while self.active.is_empty() && self.y < self.table.last_line() {
            self.advance(self.y + 1);
        }
        self.crossings.clear();
        for &i in &self.active {
            let e = self.table.edge_mut(i);
            self.crossings.push((e.x, e.id));
            e.step();
        }
        // Stable: equal crossings keep edge table order
        self.crossings.sort_by_key(|c| c.0);
        self.cur = 0;
    }
    /// Line currently handed out, None once every edge is done
    pub fn next_line(&mut self) -> Option<i32> {
        if self.active.is_empty() { None } else { Some(self.line()) }
    }
    fn line(&self) -> i32 {
        self.tr.apply(0, self.y).1
    }
    fn line_done(&mut self) {
        if self.cur >= self.crossings.len() {
            self.y += 1;
            self.load_line();
        }
    }
    fn is_current(&self, y: i32) -> bool {
        self.line() == y && self.cur < self.crossings.len()
    }
    fn run(&self, x1: i32, x2: i32) -> Run {
        let (x1, _) = self.tr.apply(x1, 0);
        let (x2, _) = self.tr.apply(x2, 0);
        Run::new(x1, x2, self.color)
    }
    /// Next fill run on line y, crossings paired left to right
    pub fn fill_run(&mut self, y: i32) -> Option<Run> {
        if !self.is_current(y) {
            return None;
        }
        let x1 = self.crossings[self.cur].0;
        let x2 = self.crossings.get(self.cur + 1).map(|c| c.0).unwrap_or(x1);
        self.cur += 2;
        let run = self.run(x1, x2);
        self.line_done();
        Some(run)
    }
    /// Next stroke run on line y
    ///
    /// A run opens at a crossing and closes at the next crossing of the same
    /// segment. Spans of other segments starting inside it extend it, so a
    /// joint is drawn as one run.
    pub fn stroke_run(&mut self, y: i32) -> Option<Run> {
        if !self.is_current(y) {
            return None;
        }
        let start = self.cur;
        let (x1, id) = self.crossings[start];
        let n = self.crossings.len();
        let mut x2 = x1;
        let mut end = start + 1;
        if end < n && self.crossings[end].1 == id {
            x2 = self.crossings[end].0;
        } else {
            while end < n && self.crossings[end].1 != id {
                end += 1;
            }
            if end < n {
                x2 = self.crossings[end].0;
                end = self.weld(start, end, x1, &mut x2);
            } else {
                // Unpaired crossing
                end = start;
            }
        }
        self.cur = end + 1;
        let run = self.run(x1, x2);
        self.line_done();
        Some(run)
    }
    /// Extend [x1,x2] over every span that starts inside it
    ///
    /// Returns the index of the crossing closing the extended run.
    fn weld(&mut self, start: usize, mut end: usize, x1: i32, x2: &mut i32) -> usize {
        self.seen.clear();
        for i in start .. self.crossings.len() {
            let (x, id) = self.crossings[i];
            let first = self.seen.iter().find(|s| s.0 == id).map(|s| s.1);
            match first {
                None => self.seen.push((id, x)),
                Some(first) => {
                    // Greater or equal keeps the last crossing at the end position
                    if x1 <= first && first <= *x2 && x >= *x2 {
                        *x2 = x;
                        end = i;
                    }
                }
            }
        }
        end
    }
}

/// Scan iterator for any shape
#[derive(Debug)]
pub enum ShapeIter {
    Rect(RectIter),
    Fill(PolyIter),
    Stroke(PolyIter),
}

impl ShapeIter {
    pub fn new(shape: &Shape) -> Self {
        let tr = &shape.translation;
        match shape.geometry() {
            Geometry::Rect(r) => ShapeIter::Rect(RectIter::new(r, tr)),
            Geometry::Polygon(p) | Geometry::Polyline(p) | Geometry::Line(p) => {
                match p.paint {
                    Paint::Fill(_) => ShapeIter::Fill(PolyIter::fill(p, tr)),
                    Paint::Stroke { width, .. } => ShapeIter::Stroke(PolyIter::stroke(p, width, tr)),
                }
            }
        }
    }
}

impl ScanLines for ShapeIter {
    fn next_line(&mut self) -> Option<i32> {
        match self {
            ShapeIter::Rect(it) => it.next_line(),
            ShapeIter::Fill(it) | ShapeIter::Stroke(it) => it.next_line(),
        }
    }
    fn next_run(&mut self, y: i32) -> Option<Run> {
        match self {
            ShapeIter::Rect(it) => it.next_run(y),
            ShapeIter::Fill(it) => it.fill_run(y),
            ShapeIter::Stroke(it) => it.stroke_run(y),
        }
    }
}
