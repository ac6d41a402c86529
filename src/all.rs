// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! A list of all supported encodings.
//!
//! Every call builds a fresh encoding with its own table.
//! Build each once and share it (for example through a `Registry`) rather than per use.

use std::sync::Arc;

use crate::codec::charmap::CharmapEncoding;
use crate::codec::whatwg::{self, ReplacementEncoding};
use crate::types::EncodingRef;

/// `x-user-defined`, mapping bytes 80 through FF to U+F780 through U+F7FF.
pub fn x_user_defined() -> CharmapEncoding {
    CharmapEncoding::new("x-user-defined", Arc::new(whatwg::x_user_defined_table()))
}

/// `replacement`, which decodes any non-empty input to a single U+FFFD and encodes nothing.
pub fn replacement() -> ReplacementEncoding {
    ReplacementEncoding::new()
}

/// Returns every supported encoding.
pub fn encodings() -> Vec<EncodingRef> {
    vec![Arc::new(x_user_defined()) as EncodingRef, Arc::new(replacement()) as EncodingRef]
}
