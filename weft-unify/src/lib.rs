//! The binding store and unifier.
//!
//! This crate implements the two lowest non-trivial layers of the
//! engine: a trail-journaled binding store (`Bindings`) and a recursive
//! structural unifier (`unify`) that walks terms against it. Both are
//! deliberately free of any notion of "search" -- backtracking over
//! multiple solutions is `weft-engine`'s job; this crate only guarantees
//! that a single `mark`/`rollback` pair restores the store exactly.

mod store;
mod unify;

pub use store::{Bindings, Mark};
pub use unify::{occurs_in, unify};
