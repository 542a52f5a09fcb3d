//! Scanline runs
//!
//! Runs from every shape on one line are collected, clipped to the raster,
//! sorted by start and merged so no part of the line is drawn twice.
//! Overlaps go to the run starting further left; there is no z-order.

use crate::math::{xfx, xfx_int, MIN_DX};

/// Most runs collected on a single line
pub const MAX_RUNS : usize = 128;

/// Horizontal interval [x1,x2) on one line, X in 9.4 fixed point
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Run {
    pub x1: i32,
    pub x2: i32,
    pub color: u8,
}

impl Run {
    pub fn new(x1: i32, x2: i32, color: u8) -> Self {
        Self { x1, x2, color }
    }
    /// Length of the run
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }
}

/// Runs of a single line
#[derive(Debug,Default)]
pub struct Scanline {
    /// Line number
    pub y: i32,
    /// Runs, merged and left to right after [`Scanline::merge`]
    pub runs: Vec<Run>,
    xres: i32,
    dropped: usize,
}

impl Scanline {
    /// Create a scanline for a raster xres wide (9.4 fixed point)
    pub fn new(xres: i32) -> Self {
        Self { y: 0, runs: Vec::with_capacity(MAX_RUNS), xres, dropped: 0 }
    }
    /// Clear all runs and move to line y
    pub fn reset(&mut self, y: i32) {
        self.y = y;
        self.runs.clear();
        self.dropped = 0;
    }
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
    /// Runs discarded on this line because the line was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }
    /// Add a run, clipped to the raster
    ///
    /// Empty and off-raster runs are ignored. Returns false if the run was
    /// discarded because the line already holds [`MAX_RUNS`] runs.
    pub fn add_run(&mut self, run: Run) -> bool {
        if run.x2 <= run.x1 || run.x1 >= self.xres || run.x2 <= 0 {
            return true;
        }
        if self.runs.len() >= MAX_RUNS {
            self.dropped += 1;
            return false;
        }
        let x1 = run.x1.max(0);
        let x2 = run.x2.min(self.xres - 1);
        if x2 > x1 {
            self.runs.push(Run::new(x1, x2, run.color));
        }
        true
    }
    /// Sort and merge the collected runs
    ///
    /// After merging runs are left to right, never overlap, are at least
    /// [`MIN_DX`] wide, and gaps between them are either zero or at least
    /// [`MIN_DX`]. Abutting runs of the same color are joined.
    pub fn merge(&mut self) {
        merge_runs(&mut self.runs);
    }
}

/// Sort and merge runs in place, see [`Scanline::merge`]
pub fn merge_runs(runs: &mut Vec<Run>) {
    if runs.is_empty() {
        return;
    }
    // Stable: equal starts keep collection order
    runs.sort_by_key(|r| r.x1);

    let mut o = 0;
    for i in 1 .. runs.len() {
        let mut r = runs[i];
        let end = runs[o].x2;
        if r.x1 >= end {
            let dx = r.x1 - end;
            if dx != 0 {
                if xfx_int(r.x1) == xfx_int(end) + 1 {
                    // Neighbouring pixels, meet at the pixel boundary
                    runs[o].x2 = xfx(xfx_int(r.x1));
                    r.x1 = runs[o].x2;
                } else if dx < MIN_DX {
                    r.x1 = end;
                }
            }
        } else {
            // Overlap, the earlier run keeps it
            r.x1 = end;
        }
        if r.x1 < r.x2 {
            if runs[o].x2 == r.x1 && runs[o].color == r.color {
                runs[o].x2 = r.x2;
            } else if r.width() >= MIN_DX {
                o += 1;
                runs[o] = r;
            }
        }
    }
    runs.truncate(o + 1);
    if runs[0].width() < MIN_DX {
        runs.remove(0);
    }
}
