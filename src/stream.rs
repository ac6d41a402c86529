// This is a part of rust-encoding.
// Copyright (c) 2014-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Text readers and writers over byte streams.

use std::error::Error;
use std::io::{self, Read, Write};
use std::mem;

use log::trace;

use crate::incremental::{IncrementalDecoder, IncrementalEncoder};
use crate::types::{Encoding, ErrorPolicy};

/// The default number of bytes read from the underlying reader at once.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

fn invalid_data<E: Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

/// Reads text from a byte stream in given encoding.
///
/// Decoder errors are returned as `io::Error`s of the kind `InvalidData`
/// wrapping the `DecodeError`, whose position is counted from the start of the stream.
/// Any text decoded before the error is kept for the next read,
/// and the next read resumes right after the offending bytes.
pub struct StreamReader<R> {
    reader: R,
    decoder: IncrementalDecoder,
    buf: Vec<u8>,
    // bytes of `buf` not yet fed to the decoder
    start: usize,
    end: usize,
    pending: String,
    pending_chars: usize,
    eof: bool,
}

impl<R: Read> StreamReader<R> {
    pub fn new(reader: R, encoding: &dyn Encoding, policy: ErrorPolicy) -> StreamReader<R> {
        StreamReader {
            reader: reader,
            decoder: encoding.decoder(policy),
            buf: vec![0; DEFAULT_CHUNK_SIZE],
            start: 0,
            end: 0,
            pending: String::new(),
            pending_chars: 0,
            eof: false,
        }
    }

    /// Sets the number of bytes read from the underlying reader at once.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> StreamReader<R> {
        let mut buf = self.buf[self.start..self.end].to_vec();
        self.start = 0;
        self.end = buf.len();
        buf.resize(chunk_size.max(self.end).max(1), 0);
        self.buf = buf;
        self
    }

    /// Reads up to `max_chars` characters, or everything up to the end of stream if `None`.
    /// Fewer characters are returned only at the end of stream.
    pub fn read_text(&mut self, max_chars: Option<usize>) -> io::Result<String> {
        let max_chars = match max_chars {
            Some(n) => n,
            None => {
                while !self.eof {
                    self.fill()?;
                }
                return Ok(self.take_all());
            }
        };

        while !self.eof && self.pending_chars < max_chars {
            self.fill()?;
        }
        if self.pending_chars <= max_chars {
            return Ok(self.take_all());
        }
        let split = self.pending.char_indices().nth(max_chars)
                                .map_or(self.pending.len(), |(i, _)| i);
        let text = self.take_pending(split);
        self.pending_chars -= max_chars;
        Ok(text)
    }

    /// Reads a line including the trailing `\n`, if any.
    /// Returns an empty string at the end of stream.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut searched = 0;
        loop {
            if let Some(i) = self.pending[searched..].find('\n') {
                let line = self.take_pending(searched + i + 1);
                self.pending_chars -= line.chars().count();
                return Ok(line);
            }
            searched = self.pending.len();
            if self.eof {
                return Ok(self.take_all());
            }
            self.fill()?;
        }
    }

    /// Reads all remaining lines.
    pub fn read_lines(&mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns the underlying reader. Any text decoded but not yet read is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn take_pending(&mut self, upto: usize) -> String {
        let rest = self.pending.split_off(upto);
        mem::replace(&mut self.pending, rest)
    }

    fn take_all(&mut self) -> String {
        self.pending_chars = 0;
        mem::take(&mut self.pending)
    }

    // decodes the unfed bytes into `pending`, reading one chunk first if there are none.
    // the empty read finishes the decoder.
    fn fill(&mut self) -> io::Result<()> {
        if self.start == self.end {
            let nread = loop {
                match self.reader.read(&mut self.buf) {
                    Ok(n) => break n,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            trace!("read {} bytes", nread);
            self.start = 0;
            self.end = nread;
            if nread == 0 {
                self.eof = true;
            }
        }

        let base = self.decoder.position();
        let decoded = self.pending.len();
        let ret = self.decoder.feed_into(&self.buf[self.start..self.end], self.eof,
                                         &mut self.pending);
        self.pending_chars += self.pending[decoded..].chars().count();
        match ret {
            Ok(_) => {
                self.start = self.end;
                Ok(())
            }
            Err(err) => {
                let consumed = self.decoder.position().saturating_sub(base);
                self.start = (self.start + consumed).min(self.end);
                trace!("skipping {} bytes after {}", consumed, err);
                Err(invalid_data(err))
            }
        }
    }
}

/// Writes text to a byte stream in given encoding.
///
/// Encoder errors are returned as `io::Error`s of the kind `InvalidData`
/// wrapping the `EncodeError`; the bytes encoded before the offending character are written.
pub struct StreamWriter<W> {
    writer: W,
    encoder: IncrementalEncoder,
    buf: Vec<u8>,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(writer: W, encoding: &dyn Encoding, policy: ErrorPolicy) -> StreamWriter<W> {
        StreamWriter { writer: writer, encoder: encoding.encoder(policy), buf: Vec::new() }
    }

    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.write_chunk(text, false)
    }

    /// Writes each string in turn, without adding any separator.
    pub fn write_lines<I, S>(&mut self, lines: I) -> io::Result<()>
            where I: IntoIterator<Item = S>, S: AsRef<str> {
        for line in lines {
            self.write_chunk(line.as_ref(), false)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Finishes the encoder, flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_chunk("", true)?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Returns the underlying writer without finishing the encoder.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_chunk(&mut self, text: &str, last: bool) -> io::Result<()> {
        self.buf.clear();
        let ret = self.encoder.feed_into(text, last, &mut self.buf);
        trace!("writing {} bytes", self.buf.len());
        self.writer.write_all(&self.buf)?;
        ret.map(|_| ()).map_err(invalid_data)
    }
}
