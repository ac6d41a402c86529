// This is a part of rust-encoding.
// Copyright (c) 2014-2015, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! An explicit name-to-encoding registry.
//!
//! Label normalization is left to the caller; names are matched exactly.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::all;
use crate::types::EncodingRef;

/// A set of encodings keyed by their canonical names.
#[derive(Clone)]
pub struct Registry {
    encodings: HashMap<&'static str, EncodingRef>,
}

impl Registry {
    /// Creates an empty registry. `Registry::default()` has every supported encoding.
    pub fn new() -> Registry {
        Registry { encodings: HashMap::new() }
    }

    /// Registers the encoding under its name,
    /// returning the encoding previously registered under the same name if any.
    pub fn register(&mut self, encoding: EncodingRef) -> Option<EncodingRef> {
        let name = encoding.name();
        debug!("registering encoding {}", name);
        self.encodings.insert(name, encoding)
    }

    pub fn lookup(&self, name: &str) -> Option<EncodingRef> {
        let ret = self.encodings.get(name).cloned();
        if ret.is_none() {
            debug!("no encoding registered as {:?}", name);
        }
        ret
    }

    /// Returns the registered names in the sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.encodings.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Registry {
        let mut registry = Registry::new();
        for encoding in all::encodings() {
            registry.register(encoding);
        }
        registry
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use super::Registry;
    use crate::codec::charmap::{CharmapEncoding, CharmapTable};
    use crate::types::*;

    #[test]
    fn test_default_registry() {
        let registry = Registry::default();
        assert_eq!(registry.names(), vec!["replacement", "x-user-defined"]);
        assert_eq!(registry.len(), 2);

        let xud = registry.lookup("x-user-defined").unwrap();
        assert_eq!(xud.name(), "x-user-defined");
        assert_eq!(xud.decode(b"\x80", ErrorPolicy::Strict), Ok("\u{f780}".to_string()));

        let replacement = registry.lookup("replacement").unwrap();
        assert_eq!(replacement.decode(b"abc", ErrorPolicy::Strict), Ok("\u{fffd}".to_string()));
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = Registry::default();
        assert!(registry.lookup("X-User-Defined").is_none());
        assert!(registry.lookup(" replacement").is_none());
        assert!(registry.lookup("utf-8").is_none());
        assert!(Registry::new().lookup("replacement").is_none());
        assert!(Registry::new().is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::default();
        let table = CharmapTable::from_fn(|b| Some(b as char));
        let latin1 = Arc::new(CharmapEncoding::new("x-user-defined", Arc::new(table)));
        let old = registry.register(latin1).unwrap();
        assert_eq!(old.decode(b"\xe9", ErrorPolicy::Strict), Ok("\u{f7e9}".to_string()));
        let new = registry.lookup("x-user-defined").unwrap();
        assert_eq!(new.decode(b"\xe9", ErrorPolicy::Strict), Ok("\u{e9}".to_string()));
        assert_eq!(registry.len(), 2);
        assert_eq!(format!("{:?}", registry), r#"{"replacement", "x-user-defined"}"#);
    }

    #[test]
    fn test_shared_table() {
        let registry = Registry::default();
        let a = registry.lookup("x-user-defined").unwrap();
        let b = registry.lookup("x-user-defined").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
