// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

/*!
 * Interface to the character encoding.
 *
 * # Raw incremental interface
 *
 * Methods which name starts with `raw_` constitute the raw incremental interface,
 * the lowest-available API for encoders and decoders.
 * This interface divides the entire input to four parts:
 *
 * - **Processed** units do not affect the future result.
 * - **Unprocessed** units may affect the future result
 *   and can be a part of problematic sequence according to the future input.
 * - **Problematic** unit is the first unit that causes an error condition.
 * - **Remaining** units are not yet processed nor read,
 *   so the caller should feed any remaining units again.
 *
 * `raw_feed` returns an offset to the first unprocessed unit
 * and an optional `CodecError`, whose `upto` field points to the first remaining unit.
 * Error policies are never seen by raw encoders and decoders;
 * they are applied by `IncrementalEncoder` and `IncrementalDecoder` on top of this interface.
 */

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::trace;
use thiserror::Error;

use crate::incremental::{IncrementalDecoder, IncrementalEncoder};

/// Error information from either raw encoder or raw decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecError {
    /// The byte position of the first remaining byte, with respect to the *current* input.
    /// For the `raw_finish` call, this should be no more than zero (since there is no input).
    /// It can be negative if the remaining byte is in the prior inputs,
    /// as long as the remaining byte is not yet processed.
    pub upto: isize,
    /// A human-readable cause of the error.
    pub cause: Cow<'static, str>,
}

/// Byte writer used by encoders. In most cases this will be an owned vector of `u8`.
pub trait ByteWriter {
    /// Hints an expected lower bound on the length (in bytes) of the output
    /// until the next call to `writer_hint`,
    /// so that the writer can reserve the memory for writing.
    /// By default this method does nothing.
    fn writer_hint(&mut self, _expectedlen: usize) {}

    /// Writes a single byte.
    fn write_byte(&mut self, b: u8);

    /// Writes a number of bytes.
    fn write_bytes(&mut self, v: &[u8]);
}

impl ByteWriter for Vec<u8> {
    fn writer_hint(&mut self, expectedlen: usize) {
        self.reserve(expectedlen);
    }

    fn write_byte(&mut self, b: u8) {
        self.push(b);
    }

    fn write_bytes(&mut self, v: &[u8]) {
        self.extend_from_slice(v);
    }
}

/// String writer used by decoders. In most cases this will be an owned string.
pub trait StringWriter {
    /// Hints an expected lower bound on the length (in bytes) of the output
    /// until the next call to `writer_hint`,
    /// so that the writer can reserve the memory for writing.
    /// By default this method does nothing.
    fn writer_hint(&mut self, _expectedlen: usize) {}

    /// Writes a single character.
    fn write_char(&mut self, c: char);

    /// Writes a string.
    fn write_str(&mut self, s: &str);
}

impl StringWriter for String {
    fn writer_hint(&mut self, expectedlen: usize) {
        self.reserve(expectedlen);
    }

    fn write_char(&mut self, c: char) {
        self.push(c);
    }

    fn write_str(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// Encoder converting a Unicode string into a byte sequence.
/// This is a lower level interface, and normally `Encoding::encode` should be used instead.
pub trait RawEncoder: Send + 'static {
    /// Creates a fresh `RawEncoder` instance which parameters are same as `self`.
    fn from_self(&self) -> Box<dyn RawEncoder>;

    /// Returns true if this encoding is compatible to ASCII,
    /// i.e. U+0000 through U+007F always map to bytes 00 through 7F and nothing else.
    fn is_ascii_compatible(&self) -> bool { false }

    /// Feeds given portion of string to the encoder,
    /// pushes the an encoded byte sequence at the end of the given output,
    /// and returns a byte offset to the first unprocessed character
    /// (that can be zero when the first such character appeared in the prior calls to `raw_feed`)
    /// and optional error information (None means success).
    fn raw_feed(&mut self, input: &str, output: &mut dyn ByteWriter) -> (usize, Option<CodecError>);

    /// Finishes the encoder,
    /// pushes the an encoded byte sequence at the end of the given output,
    /// and returns optional error information (None means success).
    fn raw_finish(&mut self, output: &mut dyn ByteWriter) -> Option<CodecError>;

    /// A test-friendly interface to `raw_feed`. Internal use only.
    #[cfg(test)]
    fn test_feed(&mut self, input: &str) -> (usize, Option<CodecError>, Vec<u8>) {
        let mut buf = Vec::new();
        let (nprocessed, err) = self.raw_feed(input, &mut buf);
        (nprocessed, err, buf)
    }

    /// A test-friendly interface to `raw_finish`. Internal use only.
    #[cfg(test)]
    fn test_finish(&mut self) -> (Option<CodecError>, Vec<u8>) {
        let mut buf = Vec::new();
        let err = self.raw_finish(&mut buf);
        (err, buf)
    }

    /// Concatenates two input sequences into one. Internal use only.
    #[cfg(test)]
    fn test_concat(&self, a: &str, b: &str) -> String {
        let mut s = a.to_string();
        s.push_str(b);
        s
    }
}

/// Decoder converting a byte sequence into a Unicode string.
/// This is a lower level interface, and normally `Encoding::decode` should be used instead.
pub trait RawDecoder: Send + 'static {
    /// Creates a fresh `RawDecoder` instance which parameters are same as `self`.
    fn from_self(&self) -> Box<dyn RawDecoder>;

    /// Returns true if this encoding is compatible to ASCII,
    /// i.e. bytes 00 through 7F always map to U+0000 through U+007F and nothing else.
    fn is_ascii_compatible(&self) -> bool { false }

    /// Feeds given portion of byte sequence to the decoder,
    /// pushes the a decoded string at the end of the given output,
    /// and returns an offset to the first unprocessed byte
    /// (that can be zero when the first such byte appeared in the prior calls to `raw_feed`)
    /// and optional error information (None means success).
    fn raw_feed(&mut self, input: &[u8], output: &mut dyn StringWriter) -> (usize, Option<CodecError>);

    /// Finishes the decoder,
    /// pushes the a decoded string at the end of the given output,
    /// and returns optional error information (None means success).
    fn raw_finish(&mut self, output: &mut dyn StringWriter) -> Option<CodecError>;

    /// A test-friendly interface to `raw_feed`. Internal use only.
    #[cfg(test)]
    fn test_feed(&mut self, input: &[u8]) -> (usize, Option<CodecError>, String) {
        let mut buf = String::new();
        let (nprocessed, err) = self.raw_feed(input, &mut buf);
        (nprocessed, err, buf)
    }

    /// A test-friendly interface to `raw_finish`. Internal use only.
    #[cfg(test)]
    fn test_finish(&mut self) -> (Option<CodecError>, String) {
        let mut buf = String::new();
        let err = self.raw_finish(&mut buf);
        (err, buf)
    }

    /// Concatenates two input sequences into one. Internal use only.
    #[cfg(test)]
    fn test_concat(&self, a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut v = Vec::with_capacity(a.len() + b.len());
        v.extend_from_slice(a);
        v.extend_from_slice(b);
        v
    }
}

/// A shared, thread-safe reference to the encoding,
/// for code where the encoding is not known at compile-time.
pub type EncodingRef = Arc<dyn Encoding + Send + Sync>;

/// Character encoding.
pub trait Encoding {
    /// Returns the canonical name of given encoding.
    /// This is the name under which the encoding is registered.
    fn name(&self) -> &'static str;

    /// Creates a new raw encoder.
    fn raw_encoder(&self) -> Box<dyn RawEncoder>;

    /// Creates a new raw decoder.
    fn raw_decoder(&self) -> Box<dyn RawDecoder>;

    /// Opens an incremental encoding session with a fixed error policy.
    fn encoder(&self, policy: ErrorPolicy) -> IncrementalEncoder {
        IncrementalEncoder::new(self.raw_encoder(), policy)
    }

    /// Opens an incremental decoding session with a fixed error policy.
    fn decoder(&self, policy: ErrorPolicy) -> IncrementalDecoder {
        IncrementalDecoder::new(self.raw_decoder(), policy)
    }

    /// An easy-to-use interface to `RawEncoder`.
    /// On the encoder error `policy` decides
    /// whether to skip the character, to replace it or to return the error.
    fn encode(&self, input: &str, policy: ErrorPolicy) -> Result<Vec<u8>, EncodeError> {
        let mut ret = Vec::new();
        self.encode_to(input, policy, &mut ret)?;
        Ok(ret)
    }

    /// Same as `encode` but pushes the output to given writer,
    /// and returns the number of characters consumed (always the entire input on success).
    /// On the strict failure the error's `position` is the number of characters consumed.
    fn encode_to(&self, input: &str, policy: ErrorPolicy,
                 output: &mut dyn ByteWriter) -> Result<usize, EncodeError> {
        self.encoder(policy).feed_into(input, true, output)
    }

    /// An easy-to-use interface to `RawDecoder`.
    /// On the decoder error `policy` decides
    /// whether to skip the byte, to replace it or to return the error.
    fn decode(&self, input: &[u8], policy: ErrorPolicy) -> Result<String, DecodeError> {
        let mut ret = String::new();
        self.decode_to(input, policy, &mut ret)?;
        Ok(ret)
    }

    /// Same as `decode` but pushes the output to given writer,
    /// and returns the number of bytes consumed (always the entire input on success).
    /// On the strict failure the error's `position` is the number of bytes consumed.
    fn decode_to(&self, input: &[u8], policy: ErrorPolicy,
                 output: &mut dyn StringWriter) -> Result<usize, DecodeError> {
        self.decoder(policy).feed_into(input, true, output)
    }
}

/// Strategy for unmappable characters and invalid bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Immediately fails on errors.
    /// Corresponds to WHATWG "fatal" error algorithm.
    #[default]
    Strict,
    /// Silently ignores an error, effectively replacing it with an empty sequence.
    Ignore,
    /// Replaces an error with a byte `?` (encoder) or U+FFFD (decoder).
    Replace,
}

impl ErrorPolicy {
    /// Returns the conventional name of the policy.
    pub fn name(self) -> &'static str {
        match self {
            ErrorPolicy::Strict => "strict",
            ErrorPolicy::Ignore => "ignore",
            ErrorPolicy::Replace => "replace",
        }
    }

    /// Handles an encoder error. May write to the output writer.
    /// Returns true only when it is fine to keep going.
    ///
    /// `?` is written as a raw byte, so this works even for encodings
    /// that cannot represent `?` at all.
    pub(crate) fn trap_encode(self, ch: char, output: &mut dyn ByteWriter) -> bool {
        match self {
            ErrorPolicy::Strict => false,
            ErrorPolicy::Ignore => { trace!("ignoring unrepresentable {:?}", ch); true }
            ErrorPolicy::Replace => { output.write_byte(b'?'); true }
        }
    }

    /// Handles a decoder error. May write to the output writer.
    /// Returns true only when it is fine to keep going.
    pub(crate) fn trap_decode(self, byte: u8, output: &mut dyn StringWriter) -> bool {
        match self {
            ErrorPolicy::Strict => false,
            ErrorPolicy::Ignore => { trace!("ignoring invalid byte {:#04x}", byte); true }
            ErrorPolicy::Replace => { output.write_char('\u{fffd}'); true }
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<ErrorPolicy, UnknownPolicy> {
        match s {
            "strict" => Ok(ErrorPolicy::Strict),
            "ignore" => Ok(ErrorPolicy::Ignore),
            "replace" => Ok(ErrorPolicy::Replace),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Returned when an error policy name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown error policy {0:?}")]
pub struct UnknownPolicy(pub String);

/// A character which the encoding cannot represent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{cause} {ch:?} at position {position}")]
pub struct EncodeError {
    /// The offending character.
    pub ch: char,
    /// The index of the offending character, counted in characters from the start of the session.
    pub position: usize,
    /// A human-readable cause of the error.
    pub cause: Cow<'static, str>,
}

/// A byte which the encoding does not map to any character.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{cause} 0x{byte:02x} at position {position}")]
pub struct DecodeError {
    /// The offending byte.
    pub byte: u8,
    /// The index of the offending byte from the start of the session.
    pub position: usize,
    /// A human-readable cause of the error.
    pub cause: Cow<'static, str>,
}
