// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Common codec implementation for table-driven single-byte encodings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::*;
use crate::util::StrCharIndex;

/// A bidirectional mapping between 256 byte values and Unicode scalar values.
///
/// Built once, then shared read-only by every encoder and decoder of the encoding.
#[derive(Clone)]
pub struct CharmapTable {
    decoding_table: [Option<char>; 256],
    encoding_table: HashMap<char, u8>,
    ascii_compatible: bool,
}

impl CharmapTable {
    /// Builds a table from the byte-indexed decoding table.
    /// The encoding table is its inverse; if several bytes decode to the same character,
    /// the highest such byte is used for encoding.
    pub fn from_decoding_table(decoding_table: [Option<char>; 256]) -> CharmapTable {
        let mut encoding_table = HashMap::with_capacity(256);
        for (byte, ch) in decoding_table.iter().enumerate() {
            if let Some(ch) = *ch {
                encoding_table.insert(ch, byte as u8);
            }
        }
        let ascii_compatible = (0..0x80u8).all(|b| decoding_table[b as usize] == Some(b as char));
        CharmapTable {
            decoding_table: decoding_table,
            encoding_table: encoding_table,
            ascii_compatible: ascii_compatible,
        }
    }

    /// Builds a table by calling `forward` for every byte.
    pub fn from_fn<F: Fn(u8) -> Option<char>>(forward: F) -> CharmapTable {
        let mut decoding_table = [None; 256];
        for (byte, slot) in decoding_table.iter_mut().enumerate() {
            *slot = forward(byte as u8);
        }
        CharmapTable::from_decoding_table(decoding_table)
    }

    /// A table where no byte and no character is mapped.
    pub fn empty() -> CharmapTable {
        CharmapTable::from_decoding_table([None; 256])
    }

    #[inline]
    pub fn decode_byte(&self, byte: u8) -> Option<char> {
        self.decoding_table[byte as usize]
    }

    #[inline]
    pub fn encode_char(&self, ch: char) -> Option<u8> {
        self.encoding_table.get(&ch).cloned()
    }

    pub fn decoding_table(&self) -> &[Option<char>; 256] {
        &self.decoding_table
    }

    /// Returns the number of bytes with a defined mapping.
    pub fn len(&self) -> usize {
        self.decoding_table.iter().filter(|ch| ch.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.encoding_table.is_empty()
    }

    /// Returns true if bytes 00 through 7F map to U+0000 through U+007F.
    pub fn is_ascii_compatible(&self) -> bool {
        self.ascii_compatible
    }
}

impl fmt::Debug for CharmapTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CharmapTable")
         .field("len", &self.len())
         .field("ascii_compatible", &self.ascii_compatible)
         .finish()
    }
}

/// A single-byte encoding driven by a `CharmapTable`.
#[derive(Clone, Debug)]
pub struct CharmapEncoding {
    name: &'static str,
    table: Arc<CharmapTable>,
}

impl CharmapEncoding {
    pub fn new(name: &'static str, table: Arc<CharmapTable>) -> CharmapEncoding {
        CharmapEncoding { name: name, table: table }
    }

    pub fn table(&self) -> &Arc<CharmapTable> {
        &self.table
    }
}

impl Encoding for CharmapEncoding {
    fn name(&self) -> &'static str { self.name }
    fn raw_encoder(&self) -> Box<dyn RawEncoder> { CharmapEncoder::new(self.table.clone()) }
    fn raw_decoder(&self) -> Box<dyn RawDecoder> { CharmapDecoder::new(self.table.clone()) }
}

/// An encoder for table-driven single-byte encodings.
#[derive(Clone)]
pub struct CharmapEncoder {
    table: Arc<CharmapTable>,
}

impl CharmapEncoder {
    pub fn new(table: Arc<CharmapTable>) -> Box<dyn RawEncoder> {
        Box::new(CharmapEncoder { table: table })
    }
}

impl RawEncoder for CharmapEncoder {
    fn from_self(&self) -> Box<dyn RawEncoder> { CharmapEncoder::new(self.table.clone()) }
    fn is_ascii_compatible(&self) -> bool { self.table.is_ascii_compatible() }

    fn raw_feed(&mut self, input: &str, output: &mut dyn ByteWriter) -> (usize, Option<CodecError>) {
        output.writer_hint(input.len());

        for ((i, j), ch) in input.index_iter() {
            match self.table.encode_char(ch) {
                Some(byte) => output.write_byte(byte),
                None => {
                    return (i, Some(CodecError {
                        upto: j as isize, cause: "unrepresentable character".into()
                    }));
                }
            }
        }
        (input.len(), None)
    }

    fn raw_finish(&mut self, _output: &mut dyn ByteWriter) -> Option<CodecError> {
        None
    }
}

/// A decoder for table-driven single-byte encodings.
#[derive(Clone)]
pub struct CharmapDecoder {
    table: Arc<CharmapTable>,
}

impl CharmapDecoder {
    pub fn new(table: Arc<CharmapTable>) -> Box<dyn RawDecoder> {
        Box::new(CharmapDecoder { table: table })
    }
}

impl RawDecoder for CharmapDecoder {
    fn from_self(&self) -> Box<dyn RawDecoder> { CharmapDecoder::new(self.table.clone()) }
    fn is_ascii_compatible(&self) -> bool { self.table.is_ascii_compatible() }

    fn raw_feed(&mut self, input: &[u8], output: &mut dyn StringWriter) -> (usize, Option<CodecError>) {
        output.writer_hint(input.len());

        for (i, &byte) in input.iter().enumerate() {
            match self.table.decode_byte(byte) {
                Some(ch) => output.write_char(ch),
                None => {
                    return (i, Some(CodecError {
                        upto: i as isize + 1, cause: "invalid sequence".into()
                    }));
                }
            }
        }
        (input.len(), None)
    }

    fn raw_finish(&mut self, _output: &mut dyn StringWriter) -> Option<CodecError> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use super::{CharmapTable, CharmapEncoding};
    use crate::types::*;

    // ASCII plus Latin-1 letters at A0..FF, with 80..9F left undefined and 0x7F doubling as 0xFF.
    fn holey_table() -> CharmapTable {
        CharmapTable::from_fn(|b| match b {
            0x00..=0x7e => Some(b as char),
            0x7f => Some('\u{ff}'),
            0x80..=0x9f => None,
            _ => Some(b as char),
        })
    }

    fn holey() -> CharmapEncoding {
        CharmapEncoding::new("holey", Arc::new(holey_table()))
    }

    #[test]
    fn test_table_inverse() {
        let table = holey_table();
        for b in 0..=0xffu8 {
            if let Some(ch) = table.decode_byte(b) {
                if b != 0x7f {
                    assert_eq!(table.encode_char(ch), Some(b));
                }
            }
        }
        // the higher byte wins when two bytes share a character
        assert_eq!(table.encode_char('\u{ff}'), Some(0xff));
        assert_eq!(table.encode_char('\u{80}'), None);
        assert_eq!(table.len(), 256 - 32);
        assert!(!table.is_ascii_compatible());
    }

    #[test]
    fn test_empty_table() {
        let table = CharmapTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.decode_byte(0x41), None);
        assert_eq!(table.encode_char('A'), None);
    }

    #[test]
    fn test_encoder() {
        let mut e = holey().raw_encoder();
        assert_feed_ok!(e, "A", "", b"A");
        assert_feed_ok!(e, "BC\u{e9}", "", b"BC\xe9");
        assert_feed_ok!(e, "", "", b"");
        assert_feed_err!(e, "x", "\u{80}", "y", b"x");
        assert_feed_err!(e, "", "\u{f780}", "", b"");
        assert_feed_err!(e, "A", "\u{1f600}", "B", b"A");
        assert_finish_ok!(e, b"");
    }

    #[test]
    fn test_decoder() {
        let mut d = holey().raw_decoder();
        assert_feed_ok!(d, b"A", b"", "A");
        assert_feed_ok!(d, b"BC\xe9\x7f", b"", "BC\u{e9}\u{ff}");
        assert_feed_ok!(d, b"", b"", "");
        assert_feed_err!(d, b"x", b"\x80", b"y", "x");
        assert_feed_err!(d, b"", b"\x9f", b"", "");
        assert_finish_ok!(d, "");
    }

    #[test]
    fn test_bulk_with_policies() {
        let enc = holey();
        assert_eq!(enc.decode(b"a\x81b", ErrorPolicy::Replace), Ok("a\u{fffd}b".to_string()));
        assert_eq!(enc.decode(b"a\x81b", ErrorPolicy::Ignore), Ok("ab".to_string()));
        assert_eq!(enc.decode(b"a\x81b", ErrorPolicy::Strict),
                   Err(DecodeError { byte: 0x81, position: 1, cause: "invalid sequence".into() }));
        assert_eq!(enc.encode("a\u{80}b", ErrorPolicy::Replace), Ok(b"a?b".to_vec()));
        assert_eq!(enc.encode("a\u{80}b", ErrorPolicy::Ignore), Ok(b"ab".to_vec()));
        assert_eq!(enc.encode("\u{e9}a\u{80}b", ErrorPolicy::Strict),
                   Err(EncodeError { ch: '\u{80}', position: 2,
                                     cause: "unrepresentable character".into() }));
    }

    #[test]
    fn test_bulk_consumed_count() {
        let enc = holey();
        let mut text = String::new();
        assert_eq!(enc.decode_to(b"abc\x90", ErrorPolicy::Ignore, &mut text), Ok(4));
        assert_eq!(text, "abc");
        let mut bytes = Vec::new();
        assert_eq!(enc.encode_to("\u{e9}\u{e9}", ErrorPolicy::Strict, &mut bytes), Ok(2));
        assert_eq!(bytes, b"\xe9\xe9".to_vec());
    }
}
