//! Function name namespace
//!
//! A single interner for function names shared by the front end (which
//! produces the syntax tree) and the evaluator (which indexes its function
//! table by [`Name`]). The namespace is created once, filled while the tree
//! is built, and then moved into the loaded program, so both phases agree on
//! every handle without a translation step.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Interned function name. Only meaningful together with the [`Namespace`]
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// Position in the owning namespace; also the function-table slot.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    names: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, Name>,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    /// Return the handle for `text`, allocating one on first use.
    ///
    /// # Panics
    /// When more than `u32::MAX` distinct names have been interned.
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.lookup.get(text) {
            return name;
        }
        let index =
            u32::try_from(self.names.len()).expect("namespace is limited to u32::MAX names");
        let name = Name(index);
        let text: Arc<str> = Arc::from(text);
        self.names.push(text.clone());
        self.lookup.insert(text, name);
        name
    }

    /// Look up an existing handle without allocating.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.lookup.get(text).copied()
    }

    /// Text of a handle allocated by this namespace.
    ///
    /// # Panics
    /// When `name` came from a different namespace; use
    /// [`Namespace::try_resolve`] for handles of unknown origin.
    pub fn resolve(&self, name: Name) -> &str {
        &self.names[name.index()]
    }

    /// Text of `name`, or `None` if this namespace never allocated it.
    pub fn try_resolve(&self, name: Name) -> Option<&str> {
        self.names.get(name.index()).map(|text| text.as_ref())
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over every interned name in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &str)> {
        // intern caps the length at u32::MAX, so every index fits
        self.names
            .iter()
            .enumerate()
            .map(|(i, text)| (Name(i as u32), text.as_ref()))
    }

    /// Pair a handle with this namespace for display.
    ///
    /// A handle this namespace did not allocate is shown as `#<index>`.
    pub fn display(&self, name: Name) -> DisplayName<'_> {
        DisplayName {
            namespace: self,
            name,
        }
    }
}

pub struct DisplayName<'a> {
    namespace: &'a Namespace,
    name: Name,
}

impl fmt::Display for DisplayName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace.try_resolve(self.name) {
            Some(text) => f.write_str(text),
            None => write!(f, "#{}", self.name.index()),
        }
    }
}
