//! String interning for identifiers and parameter names.
//!
//! Identifiers recur constantly across a source file (the same variable or
//! parameter name is tokenized and compared many times), so rather than
//! allocate and compare `String`s everywhere, each distinct spelling is
//! interned once into a global table and referred to afterwards by a small
//! `Copy` handle. Two symbols are equal iff they intern the same spelling,
//! which turns identifier comparison into a `u32` comparison.
//!
//! This mirrors the interning scheme used elsewhere in this lineage of
//! tooling, trimmed down to what a single-file, single-threaded-per-run
//! interpreter needs: no eviction, no stats, no concurrent writers beyond
//! what a `Mutex` already buys us for free.

use std::fmt;
use std::sync::{Mutex, OnceLock};

struct Interner {
    strings: Vec<&'static str>,
    lookup: rustc_hash::FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: rustc_hash::FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.lookup.get(s) {
            return id;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.lookup.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

fn interner() -> &'static Mutex<Interner> {
    static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| Mutex::new(Interner::new()))
}

/// An interned string. Cheap to copy and compare; two `Symbol`s are equal
/// iff the strings they were interned from are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        Symbol(interner().lock().unwrap().intern(s))
    }

    pub fn as_str(&self) -> &'static str {
        interner().lock().unwrap().resolve(self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}
