// This is a part of rust-encoding.
// Copyright (c) 2014-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

use encoding_custom::all::{replacement, x_user_defined};
use encoding_custom::{Encoding, ErrorPolicy};
use proptest::prelude::*;

fn gen_policy() -> impl Strategy<Value = ErrorPolicy> {
    prop_oneof![
        Just(ErrorPolicy::Strict),
        Just(ErrorPolicy::Ignore),
        Just(ErrorPolicy::Replace),
    ]
}

#[test]
fn x_user_defined_maps_every_byte() {
    let xud = x_user_defined();
    for b in 0..=0xffu8 {
        let expected = if b < 0x80 { b as u32 } else { b as u32 + 0xf700 };
        let decoded = xud.decode(&[b], ErrorPolicy::Strict).unwrap();
        assert_eq!(decoded.chars().map(|c| c as u32).collect::<Vec<_>>(), vec![expected]);
        assert_eq!(xud.encode(&decoded, ErrorPolicy::Strict), Ok(vec![b]));
    }
}

#[test]
fn x_user_defined_table_is_inverse() {
    let xud = x_user_defined();
    let table = xud.table();
    for (b, ch) in table.decoding_table().iter().enumerate() {
        let ch = ch.expect("every byte is mapped");
        assert_eq!(table.encode_char(ch), Some(b as u8));
    }
}

#[test]
fn replacement_refuses_to_encode() {
    let enc = replacement();
    assert!(enc.encode("a", ErrorPolicy::Strict).is_err());
    assert_eq!(enc.encode("a", ErrorPolicy::Ignore), Ok(Vec::new()));
    assert_eq!(enc.encode("a", ErrorPolicy::Replace), Ok(b"?".to_vec()));
}

proptest! {
    #[test]
    fn prop_x_user_defined_round_trip(input in prop::collection::vec(any::<u8>(), 0..64)) {
        let xud = x_user_defined();
        let decoded = xud.decode(&input, ErrorPolicy::Strict).unwrap();
        prop_assert_eq!(decoded.chars().count(), input.len());
        prop_assert_eq!(xud.encode(&decoded, ErrorPolicy::Strict).unwrap(), input);
    }

    #[test]
    fn prop_x_user_defined_chunking(input in prop::collection::vec(any::<u8>(), 0..64),
                                    split in any::<prop::sample::Index>()) {
        let xud = x_user_defined();
        let split = split.index(input.len() + 1);
        let mut decoder = xud.decoder(ErrorPolicy::Strict);
        let mut chunked = decoder.feed(&input[..split], false).unwrap();
        chunked.push_str(&decoder.feed(&input[split..], true).unwrap());
        prop_assert_eq!(chunked, xud.decode(&input, ErrorPolicy::Strict).unwrap());
    }

    #[test]
    fn prop_replacement_decodes_to_one_fffd(input in prop::collection::vec(any::<u8>(), 0..64),
                                            policy in gen_policy()) {
        let decoded = replacement().decode(&input, policy).unwrap();
        let expected = if input.is_empty() { "" } else { "\u{fffd}" };
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn prop_replacement_encoding(input in "\\PC{1,16}") {
        let enc = replacement();
        prop_assert!(enc.encode(&input, ErrorPolicy::Strict).is_err());
        prop_assert_eq!(enc.encode(&input, ErrorPolicy::Ignore).unwrap(), Vec::<u8>::new());
        prop_assert_eq!(enc.encode(&input, ErrorPolicy::Replace).unwrap(),
                        vec![b'?'; input.chars().count()]);
    }
}
