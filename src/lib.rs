// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

/*!

# encoding-custom

The two non-standard encodings an HTML parser needs besides the usual ones,
following the [WHATWG Encoding Standard](https://encoding.spec.whatwg.org/):

* `x-user-defined` maps bytes 00 through 7F to U+0000 through U+007F,
  and bytes 80 through FF to the Private Use Area U+F780 through U+F7FF,
  so that arbitrary bytes survive a round trip through text.
* `replacement` decodes any non-empty input to a single U+FFFD and cannot encode anything.
  It stands for the encodings that a document must never be interpreted in.

## Simple Usage

To decode and encode with `x-user-defined`:

```rust
use encoding_custom::{Encoding, ErrorPolicy};
use encoding_custom::all::x_user_defined;

let xud = x_user_defined();
assert_eq!(xud.decode(&[0x41, 0x80, 0xff], ErrorPolicy::Strict),
           Ok("A\u{f780}\u{f7ff}".to_string()));
assert_eq!(xud.encode("A\u{f780}\u{f7ff}", ErrorPolicy::Strict),
           Ok(vec![0x41, 0x80, 0xff]));
```

To encode a string with unrepresentable characters:

```rust
use encoding_custom::{Encoding, ErrorPolicy};
use encoding_custom::all::x_user_defined;

let xud = x_user_defined();
assert!(xud.encode("caf\u{e9}", ErrorPolicy::Strict).is_err());
assert_eq!(xud.encode("caf\u{e9}", ErrorPolicy::Replace), Ok(b"caf?".to_vec()));
assert_eq!(xud.encode("caf\u{e9}", ErrorPolicy::Ignore), Ok(b"caf".to_vec()));
```

The `replacement` encoding never fails to decode, whatever the policy:

```rust
use encoding_custom::{Encoding, ErrorPolicy};
use encoding_custom::all::replacement;

let enc = replacement();
assert_eq!(enc.decode(b"\x1b$B8!", ErrorPolicy::Strict), Ok("\u{fffd}".to_string()));
assert_eq!(enc.decode(b"", ErrorPolicy::Strict), Ok(String::new()));
assert!(enc.encode("a", ErrorPolicy::Strict).is_err());
```

Getting the encoding by name from a registry:

```rust
use encoding_custom::{Encoding, ErrorPolicy, Registry};

let registry = Registry::default();
let enc = registry.lookup("x-user-defined").unwrap();
let mut decoder = enc.decoder(ErrorPolicy::Strict);
let mut text = decoder.feed(b"ab\x80", false).unwrap();
text.push_str(&decoder.feed(b"\x81", true).unwrap());
assert_eq!(text, "ab\u{f780}\u{f781}");
```

## Detailed Usage

**`Encoding`** is a single character encoding.
It contains `encode` and `decode` methods for converting `String` to `Vec<u8>` and vice versa,
with an **`ErrorPolicy`** deciding what happens to unmappable characters or bytes.

**`IncrementalEncoder`** and **`IncrementalDecoder`** are sessions with a fixed policy
which accept the input in arbitrary chunks;
**`StreamReader`** and **`StreamWriter`** put them on top of `std::io` streams.

**`Registry`** maps canonical names to encodings.
It is an ordinary value; construct it once and hand it to whoever resolves encoding labels.

Below them is the raw incremental interface (`RawEncoder` and `RawDecoder`)
described in the `types` module, which new encodings implement.

*/

#[cfg(test)] #[macro_use] mod testutils;

mod util;

pub mod types;

/// Codec implementations.
pub mod codec {
    pub mod charmap;
    pub mod whatwg;
}

pub mod incremental;
pub mod stream;
pub mod all;
pub mod registry;

pub use crate::types::{CodecError, ByteWriter, StringWriter, RawEncoder, RawDecoder,
                       EncodingRef, Encoding, ErrorPolicy, UnknownPolicy,
                       EncodeError, DecodeError}; // reexport
pub use crate::incremental::{IncrementalEncoder, IncrementalDecoder};
pub use crate::stream::{StreamReader, StreamWriter};
pub use crate::registry::Registry;
