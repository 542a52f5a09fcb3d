//! Command stream decoder
//!
//! The draw word has no tag bits, so a word is classified by what may
//! follow the previous one:
//!
//! - at the start, after a draw or a continue: any word
//! - after a next line: a draw
//! - after a jump or a skip: a skip or a draw
//!
//! A color byte whose high bits match a tag reads as the tagged word
//! wherever any word is allowed.

use crate::encoder::{Cmd, END_WORD};
use crate::error::{Error, Result};
use crate::scan::Run;

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
enum State {
    ExpectLine,
    ExpectDraw,
    ExpectSkipOrDraw,
}

fn is_skip(w: u16) -> bool {
    w & 0xe000 == 0x8000
}

fn draw(w: u16) -> Cmd {
    Cmd::Draw { color: (w >> 8) as u8, span: (w & 0xff) as u8 }
}

/// Iterator over the commands of a stream body, header excluded
///
/// Stops after the end word. A body missing its end word, or ending in
/// half a word, yields an error.
#[derive(Debug,Clone)]
pub struct CmdDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    /// Offset of `data` in the whole stream, for error reports
    origin: usize,
    state: State,
    done: bool,
}

impl<'a> CmdDecoder<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self::with_origin(body, 0)
    }
    fn with_origin(data: &'a [u8], origin: usize) -> Self {
        Self { data, pos: 0, origin, state: State::ExpectLine, done: false }
    }
    /// Offset of the next word in the stream
    pub fn offset(&self) -> usize {
        self.origin + self.pos
    }
    fn fail(&mut self, reason: &'static str) -> Option<Result<Cmd>> {
        self.done = true;
        Some(Err(Error::Decode { offset: self.offset(), reason }))
    }
    fn classify(&self, w: u16) -> Cmd {
        match self.state {
            State::ExpectDraw => draw(w),
            State::ExpectSkipOrDraw => {
                if is_skip(w) { Cmd::Skip(w & 0x1fff) } else { draw(w) }
            }
            State::ExpectLine => {
                if w == END_WORD {
                    Cmd::End
                } else if w & 0xf000 == 0xf000 {
                    Cmd::Jump(w & 0x0fff)
                } else if w & 0xe000 == 0xa000 {
                    Cmd::NextLine(w & 0x1fff)
                } else if is_skip(w) {
                    Cmd::Skip(w & 0x1fff)
                } else if w & 0xe000 == 0xc000 {
                    Cmd::Continue(w & 0x1fff)
                } else {
                    draw(w)
                }
            }
        }
    }
}

impl<'a> Iterator for CmdDecoder<'a> {
    type Item = Result<Cmd>;
    fn next(&mut self) -> Option<Result<Cmd>> {
        if self.done {
            return None;
        }
        match self.data.len() - self.pos {
            0 => return self.fail("missing end word"),
            1 => return self.fail("truncated word"),
            _ => {}
        }
        let w = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        let cmd = self.classify(w);
        self.pos += 2;
        self.state = match cmd {
            Cmd::End => {
                self.done = true;
                State::ExpectLine
            }
            Cmd::NextLine(_) => State::ExpectDraw,
            Cmd::Jump(_) | Cmd::Skip(_) => State::ExpectSkipOrDraw,
            Cmd::Draw { .. } | Cmd::Continue(_) => State::ExpectLine,
        };
        Some(Ok(cmd))
    }
}

/// Decode a stream body into commands, end word included
pub fn decode(body: &[u8]) -> Result<Vec<Cmd>> {
    CmdDecoder::new(body).collect()
}

/// Runs drawn on one line
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct DecodedLine {
    pub y: i32,
    pub runs: Vec<Run>,
}

/// Whole stream played back
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Replay {
    /// Address from the stream header
    pub base_addr: u16,
    /// Lines in stream order
    pub lines: Vec<DecodedLine>,
}

impl Replay {
    /// Runs of line y
    pub fn line(&self, y: i32) -> Option<&DecodedLine> {
        self.lines.iter().find(|l| l.y == y)
    }
}

/// Play back a whole stream, header and end word included
///
/// Runs are absolute, X in 9.4 fixed point. With `xres` given, a draw
/// past the raster width is an error.
pub fn replay(stream: &[u8], xres: Option<i32>) -> Result<Replay> {
    if stream.len() < 2 {
        return Err(Error::Decode { offset: 0, reason: "missing header" });
    }
    let base_addr = u16::from_be_bytes([stream[0], stream[1]]);
    let mut lines : Vec<DecodedLine> = vec![];
    let mut y = 0;
    let mut cur = 0;
    let mut dec = CmdDecoder::with_origin(&stream[2..], 2);
    loop {
        let offset = dec.offset();
        let cmd = match dec.next() {
            Some(cmd) => cmd?,
            None => break,
        };
        let err = |reason| Error::Decode { offset, reason };
        match cmd {
            Cmd::End => break,
            Cmd::Jump(ny) => {
                y = i32::from(ny);
                cur = 0;
            }
            Cmd::NextLine(x) => {
                y += 1;
                cur = i32::from(x);
            }
            Cmd::Skip(dx) => cur += i32::from(dx),
            Cmd::Draw { color, span } => {
                let x2 = cur + i32::from(span);
                let last_y = lines.last().map(|l| l.y);
                if last_y.map_or(false, |ly| ly > y) {
                    return Err(err("line out of order"));
                }
                if last_y != Some(y) {
                    lines.push(DecodedLine { y, runs: vec![] });
                }
                if let Some(l) = lines.last_mut() {
                    l.runs.push(Run::new(cur, x2, color));
                }
                cur = x2;
            }
            Cmd::Continue(s) => {
                let run = lines.last_mut()
                    .filter(|l| l.y == y)
                    .and_then(|l| l.runs.last_mut())
                    .ok_or_else(|| err("continue without a draw"))?;
                run.x2 += i32::from(s);
                cur = run.x2;
            }
        }
        if let Some(xres) = xres {
            if cur > xres && matches!(cmd, Cmd::Draw { .. } | Cmd::Continue(_)) {
                return Err(err("draw past raster width"));
            }
        }
    }
    Ok(Replay { base_addr, lines })
}
