//! Term representation for the weft logic engine.
//!
//! This crate owns exactly the data model described by the engine's term
//! model: atomic host values, logic variables identified by a
//! process-unique handle, and finite ordered sequences of sub-terms. It
//! knows nothing about unification, binding stores, or search; those live
//! in `weft-unify` and `weft-engine` respectively, one layer up.

mod interner;
mod term;
mod value;
mod var;

pub use interner::{intern, resolve, Symbol};
pub use term::Term;
pub use value::Value;
pub use var::{Var, VarId};
