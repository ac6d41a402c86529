// This is a part of rust-encoding.
// Copyright (c) 2013-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Macros for testing.

macro_rules! assert_feed_ok {
    ($this:expr, $processed:expr, $unprocessed:expr, $output:expr) => ({
        let processed = &$processed[..];
        let unprocessed = &$unprocessed[..];
        let output = &$output[..];
        let input = $this.test_concat(processed, unprocessed);
        let (nprocessed, err, buf) = $this.test_feed(&input);
        let upto = err.map(|e| e.upto);
        assert!(processed.len() == nprocessed && None == upto,
                "raw_feed should return {:?}, but instead returned {:?}",
                (processed.len(), None::<isize>), (nprocessed, upto));
        assert!(output == &buf[..],
                "raw_feed should push {:?}, but instead pushed {:?}", output, &buf[..]);
    })
}

macro_rules! assert_feed_err {
    ($this:expr, $processed:expr, $problem:expr, $remaining:expr, $output:expr) => ({
        let processed = &$processed[..];
        let problem = &$problem[..];
        let remaining = &$remaining[..];
        let output = &$output[..];
        let input = $this.test_concat(&$this.test_concat(processed, problem), remaining);
        let (nprocessed, err, buf) = $this.test_feed(&input);
        let upto = err.map(|e| e.upto);
        let expected_upto = (processed.len() + problem.len()) as isize;
        assert!(processed.len() == nprocessed && Some(expected_upto) == upto,
                "raw_feed should return {:?}, but instead returned {:?}",
                (processed.len(), Some(expected_upto)), (nprocessed, upto));
        assert!(output == &buf[..],
                "raw_feed should push {:?}, but instead pushed {:?}", output, &buf[..]);
    })
}

macro_rules! assert_finish_ok {
    ($this:expr, $output:expr) => ({
        let output = &$output[..];
        let (err, buf) = $this.test_finish();
        let upto = err.map(|e| e.upto);
        assert!(None == upto,
                "raw_finish should return {:?}, but instead returned {:?}", None::<isize>, upto);
        assert!(output == &buf[..],
                "raw_finish should push {:?}, but instead pushed {:?}", output, &buf[..]);
    })
}
