// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Asymmetric or special encoding constructions required by the WHATWG Encoding standard.

use std::sync::Arc;

use crate::codec::charmap::{CharmapEncoder, CharmapTable};
use crate::types::*;

/// Algorithmic mapping for `x-user-defined` encoding.
pub mod x_user_defined {
    #[inline]
    pub fn forward(code: u8) -> Option<char> {
        if code < 0x80 {
            Some(code as char)
        } else {
            ::std::char::from_u32(0xf700 + code as u32)
        }
    }

    #[inline]
    pub fn backward(ch: char) -> Option<u8> {
        match ch as u32 {
            code @ 0x00..=0x7f => Some(code as u8),
            code @ 0xf780..=0xf7ff => Some((code - 0xf700) as u8),
            _ => None,
        }
    }
}

/// Builds the `x-user-defined` table,
/// which maps bytes 80 through FF to the Private Use Area U+F780 through U+F7FF.
pub fn x_user_defined_table() -> CharmapTable {
    let table = CharmapTable::from_fn(x_user_defined::forward);
    debug_assert!(table.decoding_table().iter().enumerate().all(|(b, &ch)| {
        ch.and_then(x_user_defined::backward) == Some(b as u8)
    }));
    table
}

/// Replacement encoding used to refuse encodings that are unsafe to interpret in HTML.
/// Any non-empty input decodes to a single U+FFFD regardless of the error policy,
/// and no character can be encoded.
#[derive(Clone, Debug)]
pub struct ReplacementEncoding {
    table: Arc<CharmapTable>,
}

impl ReplacementEncoding {
    pub fn new() -> ReplacementEncoding {
        ReplacementEncoding { table: Arc::new(CharmapTable::empty()) }
    }

    pub fn table(&self) -> &Arc<CharmapTable> {
        &self.table
    }
}

impl Default for ReplacementEncoding {
    fn default() -> ReplacementEncoding { ReplacementEncoding::new() }
}

impl Encoding for ReplacementEncoding {
    fn name(&self) -> &'static str { "replacement" }
    fn raw_encoder(&self) -> Box<dyn RawEncoder> { CharmapEncoder::new(self.table.clone()) }
    fn raw_decoder(&self) -> Box<dyn RawDecoder> { ReplacementDecoder::new() }
}

/// A decoder which emits U+FFFD once for the first byte of the session
/// and silently consumes everything after it.
#[derive(Clone, Copy)]
pub struct ReplacementDecoder {
    emitted: bool,
}

impl ReplacementDecoder {
    pub fn new() -> Box<dyn RawDecoder> {
        Box::new(ReplacementDecoder { emitted: false })
    }
}

impl RawDecoder for ReplacementDecoder {
    fn from_self(&self) -> Box<dyn RawDecoder> { ReplacementDecoder::new() }

    fn raw_feed(&mut self, input: &[u8], output: &mut dyn StringWriter) -> (usize, Option<CodecError>) {
        if !input.is_empty() && !self.emitted {
            output.write_char('\u{fffd}');
            self.emitted = true;
        }
        (input.len(), None)
    }

    fn raw_finish(&mut self, _output: &mut dyn StringWriter) -> Option<CodecError> {
        self.emitted = false;
        None
    }
}
