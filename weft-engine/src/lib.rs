//! The lazy solution-stream abstraction and the `AND`/`OR` search
//! combinators.
//!
//! This is the heart of the engine: every predicate, built-in or
//! user-defined, is ultimately a [`Stream`], and every goal tree is
//! built by composing streams with [`and`] and [`or`]. Depth-first
//! search with chronological backtracking falls out of how the
//! combinators call `pull`/`close` on their children -- there is no
//! separate "solver" driving the search from outside; pulling the
//! top-level stream *is* the search.
//!
//! Per the engine's design notes, this is implemented as explicit state
//! machines (an index for `OR`, a stack of live sub-streams for `AND`)
//! rather than with host coroutines/generators, which Rust does not
//! offer as a language primitive anyway.

mod combinators;
mod primitives;
mod stream;

pub use combinators::{and, or};
pub use primitives::{fail, pure, unify_goal};
pub use stream::{Fault, Goal, GoalThunk, Solved, Stream};
