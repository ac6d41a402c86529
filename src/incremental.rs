// This is a part of rust-encoding.
// Copyright (c) 2014-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

/*!
 * Incremental encoding and decoding sessions.
 *
 * A session wraps a raw encoder or decoder together with an error policy fixed at construction,
 * so that callers can feed the input in arbitrary chunks.
 * The raw codec keeps any state spanning chunk boundaries;
 * the session keeps the position of the input for error reporting.
 * A session must not be shared between concurrent callers.
 */

use std::borrow::Cow;

use crate::types::*;

/// An encoding session converting a Unicode string fed in chunks.
pub struct IncrementalEncoder {
    encoder: Box<dyn RawEncoder>,
    policy: ErrorPolicy,
    position: usize,
}

impl IncrementalEncoder {
    pub fn new(encoder: Box<dyn RawEncoder>, policy: ErrorPolicy) -> IncrementalEncoder {
        IncrementalEncoder { encoder: encoder, policy: policy, position: 0 }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Returns the number of characters consumed since the session started.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Discards any state and starts a new session.
    pub fn reset(&mut self) {
        self.encoder = self.encoder.from_self();
        self.position = 0;
    }

    /// Encodes the next chunk. `last` should be set for the final chunk,
    /// after which the session is reset.
    pub fn feed(&mut self, input: &str, last: bool) -> Result<Vec<u8>, EncodeError> {
        let mut ret = Vec::new();
        self.feed_into(input, last, &mut ret)?;
        Ok(ret)
    }

    /// Same as `feed` but pushes the output to given writer,
    /// and returns the number of characters consumed from `input`.
    ///
    /// On a strict failure the offending character counts as consumed,
    /// so the session can continue with the input following it.
    pub fn feed_into(&mut self, input: &str, last: bool,
                     output: &mut dyn ByteWriter) -> Result<usize, EncodeError> {
        let mut remaining = 0;
        let mut consumed = 0;
        loop {
            let (offset, err) = self.encoder.raw_feed(&input[remaining..], output);
            let unprocessed = remaining + offset;
            match err {
                Some(err) => {
                    let upto = (remaining as isize + err.upto) as usize;
                    consumed += input[remaining..unprocessed].chars().count();
                    let problem = &input[unprocessed..upto];
                    let ch = problem.chars().next().unwrap_or('\u{fffd}');
                    let at = self.position + consumed;
                    consumed += problem.chars().count();
                    self.trap(ch, at, self.position + consumed, err.cause, output)?;
                    remaining = upto;
                }
                None => {
                    consumed += input[remaining..].chars().count();
                    break;
                }
            }
        }

        self.position += consumed;
        if last {
            if let Some(err) = self.encoder.raw_finish(output) {
                // an incomplete sequence at the end has no single offending character
                let ch = input.chars().next_back().unwrap_or('\u{fffd}');
                let at = self.position;
                self.trap(ch, at, at, err.cause, output)?;
            }
            self.reset();
        }
        Ok(consumed)
    }

    fn trap(&mut self, ch: char, position: usize, resume: usize, cause: Cow<'static, str>,
            output: &mut dyn ByteWriter) -> Result<(), EncodeError> {
        if self.policy.trap_encode(ch, output) {
            Ok(())
        } else {
            self.position = resume;
            Err(EncodeError { ch: ch, position: position, cause: cause })
        }
    }
}

/// A decoding session converting a byte sequence fed in chunks.
pub struct IncrementalDecoder {
    decoder: Box<dyn RawDecoder>,
    policy: ErrorPolicy,
    position: usize,
}

impl IncrementalDecoder {
    pub fn new(decoder: Box<dyn RawDecoder>, policy: ErrorPolicy) -> IncrementalDecoder {
        IncrementalDecoder { decoder: decoder, policy: policy, position: 0 }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Returns the number of bytes consumed since the session started.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Discards any state and starts a new session.
    pub fn reset(&mut self) {
        self.decoder = self.decoder.from_self();
        self.position = 0;
    }

    /// Decodes the next chunk. `last` should be set for the final chunk,
    /// after which the session is reset.
    pub fn feed(&mut self, input: &[u8], last: bool) -> Result<String, DecodeError> {
        let mut ret = String::new();
        self.feed_into(input, last, &mut ret)?;
        Ok(ret)
    }

    /// Same as `feed` but pushes the output to given writer,
    /// and returns the number of bytes consumed from `input`.
    ///
    /// On a strict failure the offending bytes count as consumed,
    /// so the session can continue with `input[position - start..]`
    /// where `start` is the position before this call.
    pub fn feed_into(&mut self, input: &[u8], last: bool,
                     output: &mut dyn StringWriter) -> Result<usize, DecodeError> {
        let mut remaining = 0;
        loop {
            let (offset, err) = self.decoder.raw_feed(&input[remaining..], output);
            let unprocessed = remaining + offset;
            match err {
                Some(err) => {
                    let upto = (remaining as isize + err.upto) as usize;
                    let byte = input.get(unprocessed).cloned().unwrap_or(0);
                    let at = self.position + unprocessed;
                    self.trap(byte, at, self.position + upto, err.cause, output)?;
                    remaining = upto;
                }
                None => break,
            }
        }

        self.position += input.len();
        if last {
            if let Some(err) = self.decoder.raw_finish(output) {
                let byte = input.last().cloned().unwrap_or(0);
                let at = self.position;
                self.trap(byte, at, at, err.cause, output)?;
            }
            self.reset();
        }
        Ok(input.len())
    }

    fn trap(&mut self, byte: u8, position: usize, resume: usize, cause: Cow<'static, str>,
            output: &mut dyn StringWriter) -> Result<(), DecodeError> {
        if self.policy.trap_decode(byte, output) {
            Ok(())
        } else {
            self.position = resume;
            Err(DecodeError { byte: byte, position: position, cause: cause })
        }
    }
}
