//! Lexically-scoped name→value frames.
//!
//! A frame owns its local bindings; its parent is a shared handle. `get`
//! walks the parent chain; `set` always writes the current frame, never
//! searching upward — shadowing in a nested scope is therefore always
//! possible, and there is no way to mutate an outer binding except by
//! capturing its frame directly (closures do exactly this).

use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;

use mini_util::Symbol;
use rustc_hash::FxHashMap;

use crate::value::ValueAtom;

struct EnvironmentInner {
    label: String,
    vars: FxHashMap<Symbol, ValueAtom>,
    parent: Option<Environment>,
}

/// A reference-counted handle to an environment frame. Cloning an
/// `Environment` clones the handle, not the frame — this is how closures
/// and nested blocks share a frame with their definer.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentInner>>);

impl Environment {
    pub fn root() -> Self {
        Self::with_label("<root>", None)
    }

    /// A fresh frame whose parent is `self`, used for block scopes and
    /// function call frames alike.
    pub fn child(&self, label: impl Into<String>) -> Self {
        Self::with_label(label, Some(self.clone()))
    }

    fn with_label(label: impl Into<String>, parent: Option<Environment>) -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentInner {
            label: label.into(),
            vars: FxHashMap::default(),
            parent,
        })))
    }

    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    /// Walks the parent chain looking for `name`. Returns `None` if the
    /// chain is exhausted without finding a binding.
    pub fn get(&self, name: Symbol) -> Option<ValueAtom> {
        let inner = self.0.borrow();
        if let Some(v) = inner.vars.get(&name) {
            return Some(v.clone());
        }
        inner.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Binds `name` in the current frame only — never searches upward.
    pub fn set(&self, name: Symbol, value: ValueAtom) {
        self.0.borrow_mut().vars.insert(name, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment({})", self.label())
    }
}
