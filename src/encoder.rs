//! Command stream encoder
//!
//! Merged runs are packed into 16 bit big-endian words. The high bits of a
//! word select its class, except for the draw word which carries a color
//! byte and a span byte and is only recognized by its position in the
//! stream.
//!
//! | Word     | Layout              |
//! |----------|---------------------|
//! | Jump     | `1111 yyyy yyyy yyyy` |
//! | NextLine | `101x xxxx xxxx xxxx` |
//! | Skip     | `100d dddd dddd dddd` |
//! | Draw     | `cccc cccc ssss ssss` |
//! | Continue | `110s ssss ssss ssss` |
//! | End      | `1111 1111 1111 1111` |
//!
//! X values, skips and spans are in 9.4 fixed point.

use std::fmt;
use std::io::Write;

use crate::buffer::CmdBuffer;
use crate::config::RasterConfig;
use crate::error::Result;
use crate::math::MIN_DX;
use crate::scan::Scanline;
use crate::Render;

/// Largest skip in a single word
pub const MAX_DX : i32 = 0x1fff;
/// Largest start X of a next line word
pub const MAX_NLX : i32 = 0x1fff;
/// Largest span of a continue word
pub const MAX_SPANX : i32 = 0x1fff;
/// Largest span of a draw word
pub const MAX_CLRX : i32 = 0xff;
/// Largest line of a jump word
pub const MAX_LINE : i32 = 0x0fff;
/// Bytes reserved per run when checking if a line fits in a chunk
pub const MAX_PACKED_SIZE : usize = 16;

pub const JUMP_TAG : u16 = 0xf000;
pub const NEXT_LINE_TAG : u16 = 0xa000;
pub const SKIP_TAG : u16 = 0x8000;
pub const CONTINUE_TAG : u16 = 0xc000;
pub const END_WORD : u16 = 0xffff;

/// Single command word
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Cmd {
    /// Move to line y, cursor to 0
    Jump(u16),
    /// Move to the following line, cursor to x
    NextLine(u16),
    /// Move the cursor right
    Skip(u16),
    /// Draw span units of color
    Draw { color: u8, span: u8 },
    /// Extend the previous draw
    Continue(u16),
    /// End of stream
    End,
}

impl Cmd {
    /// Packed 16 bit word
    pub fn to_word(self) -> u16 {
        match self {
            Cmd::Jump(y) => JUMP_TAG | (y & 0x0fff),
            Cmd::NextLine(x) => NEXT_LINE_TAG | (x & 0x1fff),
            Cmd::Skip(dx) => SKIP_TAG | (dx & 0x1fff),
            Cmd::Draw { color, span } => u16::from(color) << 8 | u16::from(span),
            Cmd::Continue(s) => CONTINUE_TAG | (s & 0x1fff),
            Cmd::End => END_WORD,
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cmd::Jump(y) => write!(f, "JUMP {}", y),
            Cmd::NextLine(x) => write!(f, "NEXT {}", x),
            Cmd::Skip(dx) => write!(f, "SKIP {}", dx),
            Cmd::Draw { color, span } => write!(f, "DRAW {} color[{}]", span, color),
            Cmd::Continue(s) => write!(f, "CONT {}", s),
            Cmd::End => write!(f, "END"),
        }
    }
}

/// First chunk of a value too large for a single field
///
/// Chosen so that after taking `sz0` and then as many `sz1` chunks as
/// needed, the trailing chunk is never narrower than [`MIN_DX`].
/// Only meaningful for `n > sz0`.
pub fn split_span(n: i32, sz0: i32, sz1: i32) -> i32 {
    let mut m = n - sz0;
    while m > sz1 {
        m -= sz1;
    }
    if m < MIN_DX {
        sz0 - (MIN_DX - m)
    } else {
        sz0
    }
}

/// Chunks of a value split across a first field of `sz0` and following
/// fields of `sz1`
///
/// Every chunk is at least [`MIN_DX`] if the value is, and the chunks sum
/// to the value.
#[derive(Debug,Clone)]
pub struct SpanSplit {
    rest: i32,
    first: Option<i32>,
    sz1: i32,
}

impl SpanSplit {
    pub fn new(n: i32, sz0: i32, sz1: i32) -> Self {
        debug_assert!(sz0 >= 2 * MIN_DX && sz1 >= MIN_DX, "field too narrow");
        let first = if n <= 0 {
            None
        } else if n <= sz0 {
            Some(n)
        } else {
            Some(split_span(n, sz0, sz1))
        };
        Self { rest: n, first, sz1 }
    }
}

impl Iterator for SpanSplit {
    type Item = i32;
    fn next(&mut self) -> Option<i32> {
        let v = match self.first.take() {
            Some(v) => v,
            None if self.rest > 0 => self.rest.min(self.sz1),
            None => return None,
        };
        self.rest -= v;
        Some(v)
    }
}

/// Packs merged scanlines into a command stream
///
/// The base address header is written on creation, the end word by
/// [`CmdEncoder::finish`].
#[derive(Debug)]
pub struct CmdEncoder<W: Write> {
    buf: CmdBuffer<W>,
    /// Last line emitted
    prev_y: Option<i32>,
    /// Drawn-to position on the current line
    cur_x: i32,
    lines: usize,
    words: usize,
}

impl<W: Write> CmdEncoder<W> {
    /// Create an encoder writing to sink in chunks of the configured size
    pub fn new(sink: W, config: &RasterConfig) -> Result<Self> {
        let mut buf = CmdBuffer::new(sink, config.chunk_size);
        buf.push_word(config.base_addr)?;
        Ok(Self { buf, prev_y: None, cur_x: 0, lines: 0, words: 0 })
    }
    fn emit(&mut self, cmd: Cmd) -> Result<()> {
        self.words += 1;
        self.buf.push_word(cmd.to_word())?;
        Ok(())
    }
    /// Encode the merged runs of one line
    ///
    /// Lines must come in increasing order. Empty lines are ignored and do
    /// not count as emitted.
    pub fn line(&mut self, sl: &Scanline) -> Result<()> {
        let y = sl.y;
        let first = match sl.runs.first() {
            Some(r) => r,
            None => return Ok(()),
        };
        debug_assert!((0 ..= MAX_LINE).contains(&y), "line {} out of range", y);
        debug_assert!(self.prev_y.map(|p| p < y).unwrap_or(true), "line {} out of order", y);

        // line word, one packed run each, end word
        self.buf.reserve(2 + sl.runs.len() * MAX_PACKED_SIZE + 2)?;

        if y > 0 {
            if self.prev_y == Some(y - 1) && first.x1 <= MAX_NLX {
                self.emit(Cmd::NextLine(first.x1 as u16))?;
                self.cur_x = first.x1;
            } else {
                self.emit(Cmd::Jump(y as u16))?;
                self.cur_x = 0;
            }
        } else {
            self.cur_x = 0;
        }

        for r in &sl.runs {
            let mut s = r.width();
            if s < MIN_DX {
                continue;
            }
            let mut dx = r.x1 - self.cur_x;
            if self.cur_x == 0 && dx > 0 && dx < MIN_DX {
                if y == 0 {
                    // Top left corner, no room for a skip
                    if r.x2 < 2 * MIN_DX {
                        continue;
                    }
                    dx = MIN_DX;
                    s = r.x2 - MIN_DX;
                } else {
                    // Cursor reset by a jump, draw the run from 0
                    dx = 0;
                    s = r.x2;
                }
            }
            if dx > 0 && dx < MIN_DX {
                log::error!("line {}: gap of {} before run {:?} is below the minimum, runs {:?}",
                            y, dx, r, sl.runs);
            }
            for chunk in SpanSplit::new(dx, MAX_DX, MAX_DX) {
                self.emit(Cmd::Skip(chunk as u16))?;
            }
            let mut spans = SpanSplit::new(s, MAX_CLRX, MAX_SPANX);
            if let Some(span) = spans.next() {
                self.emit(Cmd::Draw { color: r.color, span: span as u8 })?;
            }
            for chunk in spans {
                self.emit(Cmd::Continue(chunk as u16))?;
            }
            self.cur_x = r.x2;
        }
        log::trace!("line {}: {} runs, cursor {}", y, sl.runs.len(), self.cur_x);
        self.prev_y = Some(y);
        self.lines += 1;
        Ok(())
    }
    /// Write the end word and flush everything to the sink
    ///
    /// Returns the sink and the total number of bytes written to it.
    pub fn finish(mut self) -> Result<(W, usize)> {
        self.emit(Cmd::End)?;
        log::debug!("encoded {} lines, {} words, {} chunks flushed before the end",
                    self.lines, self.words, self.buf.chunks());
        let (sink, n) = self.buf.finish()?;
        Ok((sink, n))
    }
}

impl<W: Write> Render for CmdEncoder<W> {
    fn render(&mut self, sl: &Scanline) -> Result<()> {
        self.line(sl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Run;

    fn encode(lines: &[(i32, &[(i32,i32,u8)])]) -> Vec<u16> {
        let cfg = RasterConfig::new(4095, 4095);
        let mut enc = CmdEncoder::new(vec![], &cfg).unwrap();
        let mut sl = Scanline::new(cfg.xres());
        for (y, runs) in lines {
            sl.reset(*y);
            sl.runs.extend(runs.iter().map(|&(a,b,c)| Run::new(a,b,c)));
            enc.line(&sl).unwrap();
        }
        let (v, n) = enc.finish().unwrap();
        assert_eq!(v.len(), n);
        v.chunks(2).skip(1).map(|w| u16::from_be_bytes([w[0], w[1]])).collect()
    }

    #[test]
    fn split_matches_field_limits() {
        assert_eq!(split_span(300, MAX_CLRX, MAX_SPANX), MAX_CLRX);
        // 0xff + 5 would leave a sliver of 5
        assert_eq!(split_span(MAX_CLRX + 5, MAX_CLRX, MAX_SPANX), MAX_CLRX - 11);
        let v : Vec<_> = SpanSplit::new(MAX_CLRX + 5, MAX_CLRX, MAX_SPANX).collect();
        assert_eq!(v, vec![MAX_CLRX - 11, 16]);
        let v : Vec<_> = SpanSplit::new(100, MAX_CLRX, MAX_SPANX).collect();
        assert_eq!(v, vec![100]);
        assert_eq!(SpanSplit::new(0, MAX_DX, MAX_DX).count(), 0);
    }

    #[test]
    fn split_chunks_are_never_narrow() {
        let pairs = [(MAX_CLRX, MAX_SPANX), (MAX_DX, MAX_DX), (32, 32), (MAX_CLRX, 100), (40, 17)];
        for &(sz0, sz1) in &pairs {
            for n in MIN_DX ..= 10000 {
                let v : Vec<_> = SpanSplit::new(n, sz0, sz1).collect();
                assert_eq!(v.iter().sum::<i32>(), n, "n {} sz {} {}", n, sz0, sz1);
                assert!(v[0] <= sz0);
                for &c in &v {
                    assert!(c >= MIN_DX, "n {} sz {} {} chunks {:?}", n, sz0, sz1, v);
                }
                for &c in &v[1..] {
                    assert!(c <= sz1);
                }
            }
        }
    }

    #[test]
    fn words() {
        assert_eq!(Cmd::Jump(5).to_word(), 0xf005);
        assert_eq!(Cmd::NextLine(0x30).to_word(), 0xa030);
        assert_eq!(Cmd::Skip(0x1fff).to_word(), 0x9fff);
        assert_eq!(Cmd::Draw { color: 7, span: 0x30 }.to_word(), 0x0730);
        assert_eq!(Cmd::Continue(0x10).to_word(), 0xc010);
        assert_eq!(Cmd::End.to_word(), 0xffff);
        assert_eq!(format!("{}", Cmd::Draw { color: 7, span: 48 }), "DRAW 48 color[7]");
    }

    #[test]
    fn header_and_end() {
        let cfg = RasterConfig::new(100, 100).with_base_addr(0xbeef);
        let enc = CmdEncoder::new(vec![], &cfg).unwrap();
        let (v, n) = enc.finish().unwrap();
        assert_eq!(v, vec![0xbe, 0xef, 0xff, 0xff]);
        assert_eq!(n, 4);
    }

    #[test]
    fn next_line_and_jump() {
        let w = encode(&[(0, &[(0,48,7)]), (1, &[(32,48,7)]), (5, &[(0,48,2)])]);
        assert_eq!(w, vec![0x0730, 0xa020, 0x0710, 0xf005, 0x0230, 0xffff]);
    }

    #[test]
    fn first_line_jumps() {
        let w = encode(&[(3, &[(32,64,1)])]);
        assert_eq!(w, vec![0xf003, 0x8020, 0x0120, 0xffff]);
    }

    #[test]
    fn next_line_needs_narrow_start() {
        let w = encode(&[(1, &[(16,32,1)]), (2, &[(MAX_NLX + 1, MAX_NLX + 17,1)])]);
        assert_eq!(w, vec![0xf001, 0x8010, 0x0110, 0xf002, 0x9ff0, 0x8010, 0x0110, 0xffff]);
    }

    #[test]
    fn empty_line_is_not_emitted() {
        let w = encode(&[(1, &[(0,32,1)]), (2, &[]), (3, &[(0,32,1)])]);
        assert_eq!(w, vec![0xf001, 0x0120, 0xf003, 0x0120, 0xffff]);
    }

    #[test]
    fn long_skip_and_span_are_split() {
        let w = encode(&[(1, &[(MAX_DX + 5, MAX_DX + 5 + MAX_CLRX + MAX_SPANX + 3, 9)])]);
        assert_eq!(w, vec![0xf001,
                           0x8000 | (MAX_DX - 11) as u16, 0x8010,
                           0x0900 | (MAX_CLRX - 13) as u16,
                           0xc000 | MAX_SPANX as u16, 0xc010,
                           0xffff]);
    }

    #[test]
    fn top_left_corner() {
        // Sub minimum gap at the start of line 0 becomes a full skip
        let w = encode(&[(0, &[(4,64,3)])]);
        assert_eq!(w, vec![0x8010, 0x0330, 0xffff]);
        // Too narrow once moved
        let w = encode(&[(0, &[(4,30,3), (64,96,4)])]);
        assert_eq!(w, vec![0x8040, 0x0420, 0xffff]);
        // Runs at 0 are drawn as is
        let w = encode(&[(0, &[(0,30,3)])]);
        assert_eq!(w, vec![0x031e, 0xffff]);
    }

    #[test]
    fn jump_line_start_is_drawn_from_zero() {
        // Sub minimum gap after a jump, the run grows back to 0
        let w = encode(&[(6, &[(14,30,3)])]);
        assert_eq!(w, vec![0xf006, 0x031e, 0xffff]);
        let w = encode(&[(6, &[(4,64,3),(96,128,4)])]);
        assert_eq!(w, vec![0xf006, 0x0340, 0x8020, 0x0420, 0xffff]);
        // Whole pixel gaps still skip
        let w = encode(&[(6, &[(16,32,3)])]);
        assert_eq!(w, vec![0xf006, 0x8010, 0x0310, 0xffff]);
    }

    #[test]
    fn abutting_runs_have_no_skip() {
        let w = encode(&[(2, &[(0,32,1),(32,64,2),(96,112,3)])]);
        assert_eq!(w, vec![0xf002, 0x0120, 0x0220, 0x8020, 0x0310, 0xffff]);
    }
}
