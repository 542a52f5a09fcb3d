//! Hex dump of a command stream
//!
//! Every chunk handed over is written as uppercase hex on its own line.

use std::fmt::{self, Write as FmtWrite};
use std::io;

/// Byte sink writing hex text
#[derive(Debug)]
pub struct HexDump<W: fmt::Write> {
    out: W,
}

impl<W: fmt::Write> HexDump<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

fn fmt_err(_: fmt::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "hex dump formatting failed")
}

impl<W: fmt::Write> io::Write for HexDump<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for b in buf {
            write!(self.out, "{:02X}", b).map_err(fmt_err)?;
        }
        self.out.write_char('\n').map_err(fmt_err)?;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
