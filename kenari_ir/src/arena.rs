use bumpalo::Bump;
use indexmap::IndexSet;
use std::cell::RefCell;
use std::hash::Hash;

/// Allocation substrate for a single compilation: every IR node and every
/// interned string lives for the lifetime of the backing bump allocator.
pub struct IrArena<'a> {
    bump: &'a Bump,
    symbols: RefCell<IndexSet<&'a str>>,
}

impl<'a> IrArena<'a> {
    pub fn new(bump: &'a Bump) -> Self {
        Self {
            bump,
            symbols: RefCell::new(IndexSet::default()),
        }
    }

    pub fn symbol(&self, text: &str) -> Symbol<'a> {
        let mut symbols = self.symbols.borrow_mut();
        if let Some(&interned) = symbols.get(text) {
            Symbol(interned)
        } else {
            let interned = self.bump.alloc_str(text);
            symbols.insert(interned);
            Symbol(interned)
        }
    }

    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.bump.alloc(value)
    }

    pub fn alloc_str(&self, text: &str) -> &'a str {
        self.bump.alloc_str(text)
    }
}

/// Interned string. Interning makes pointer identity coincide with string
/// equality for symbols produced by the same arena.
pub struct Symbol<'a>(&'a str);

impl<'a> Symbol<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> Clone for Symbol<'a> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for Symbol<'a> {}

impl<'a> PartialEq for Symbol<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<'a> Eq for Symbol<'a> {}

impl<'a> Hash for Symbol<'a> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.0 as *const str).hash(state)
    }
}

impl<'a> std::fmt::Debug for Symbol<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.0, f)
    }
}

impl<'a> std::fmt::Display for Symbol<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.0, f)
    }
}

impl<'a> std::ops::Deref for Symbol<'a> {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a> AsRef<str> for Symbol<'a> {
    fn as_ref(&self) -> &str {
        self.0
    }
}
