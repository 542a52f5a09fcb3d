//! Command buffer
//!
//! Words are collected in a fixed size chunk and handed to the sink a
//! chunk at a time, the way the display link takes them.

use std::io::{self, Write};

/// Chunked byte buffer in front of a sink
#[derive(Debug)]
pub struct CmdBuffer<W: Write> {
    sink: W,
    /// Pending bytes, never more than `cap`
    data: Vec<u8>,
    cap: usize,
    /// Bytes handed to the sink so far
    written: usize,
    chunks: usize,
}

impl<W: Write> CmdBuffer<W> {
    /// Create a new buffer flushing to sink every `cap` bytes
    pub fn new(sink: W, cap: usize) -> Self {
        let cap = cap.max(2);
        Self { sink, data: Vec::with_capacity(cap), cap, written: 0, chunks: 0 }
    }
    /// Chunks handed to the sink so far
    pub fn chunks(&self) -> usize {
        self.chunks
    }
    /// Flush first if `n` more bytes would not fit in the current chunk
    pub fn reserve(&mut self, n: usize) -> io::Result<()> {
        if self.data.len() + n > self.cap {
            self.flush()?;
        }
        Ok(())
    }
    /// Append a big-endian word
    pub fn push_word(&mut self, w: u16) -> io::Result<()> {
        self.reserve(2)?;
        self.data.extend_from_slice(&w.to_be_bytes());
        Ok(())
    }
    /// Hand the pending bytes to the sink as one chunk
    pub fn flush(&mut self) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        self.sink.write_all(&self.data)?;
        log::debug!("chunk {}: {} bytes", self.chunks, self.data.len());
        self.written += self.data.len();
        self.chunks += 1;
        self.data.clear();
        Ok(())
    }
    /// Flush everything and return the sink with the number of bytes written
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        self.flush()?;
        self.sink.flush()?;
        Ok((self.sink, self.written))
    }
}
