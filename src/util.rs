// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Internal utilities.

use std::str::Chars;

/// External iterator for a string's characters with its corresponding byte offset range.
pub struct StrCharIndexIterator<'r> {
    index: usize,
    chars: Chars<'r>,
}

impl<'r> Iterator for StrCharIndexIterator<'r> {
    type Item = ((usize, usize), char);

    #[inline]
    fn next(&mut self) -> Option<((usize, usize), char)> {
        let ch = self.chars.next()?;
        let prev = self.index;
        self.index += ch.len_utf8();
        Some(((prev, self.index), ch))
    }
}

/// A trait providing an `index_iter` method.
pub trait StrCharIndex<'r> {
    fn index_iter(&self) -> StrCharIndexIterator<'r>;
}

impl<'r> StrCharIndex<'r> for &'r str {
    /// Iterates over each character with corresponding byte offset range.
    fn index_iter(&self) -> StrCharIndexIterator<'r> {
        StrCharIndexIterator { index: 0, chars: self.chars() }
    }
}

#[cfg(test)]
mod tests {
    use super::StrCharIndex;

    #[test]
    fn test_index_iter() {
        let ranges: Vec<_> = "a\u{e9}\u{f780}\u{1f600}".index_iter().collect();
        assert_eq!(ranges, vec![((0, 1), 'a'), ((1, 3), '\u{e9}'),
                                ((3, 6), '\u{f780}'), ((6, 10), '\u{1f600}')]);
        assert_eq!("".index_iter().next(), None);
    }
}
