//! A small global symbol interner for `Value::Sym` atoms.
//!
//! Symbolic atoms (`nil`, `true`, relation names used as tags, and so on)
//! show up constantly and are compared far more often than they are
//! created, so they are interned once into a process-wide table and
//! afterwards compared by a cheap `Copy` key, the same way `lasso` is used
//! to intern identifiers in other logic-engine codebases.
use lasso::{Spur, ThreadedRodeo};
use std::sync::OnceLock;

/// An interned symbol. Cheap to copy, compare, and hash.
pub type Symbol = Spur;

fn rodeo() -> &'static ThreadedRodeo {
    static RODEO: OnceLock<ThreadedRodeo> = OnceLock::new();
    RODEO.get_or_init(ThreadedRodeo::new)
}

/// Interns `s`, returning a `Symbol` that compares equal to the result of
/// interning any other string with the same contents.
pub fn intern(s: &str) -> Symbol {
    rodeo().get_or_intern(s)
}

/// Resolves a previously interned `Symbol` back to its string contents.
pub fn resolve(sym: Symbol) -> &'static str {
    rodeo().resolve(&sym)
}
