//! Weft is an embeddable Prolog-style logic engine: unification over a
//! term model with logic variables, a trail-based binding store with
//! O(k) rollback, and lazy pull-based solution streams composed with
//! `AND`/`OR` combinators into depth-first, chronologically
//! backtracking search.
//!
//! The engine is a stack of layers, leaves first:
//!
//! - [`weft_ir`] — terms, atoms, variables.
//! - [`weft_unify`] — the binding store and the unifier.
//! - [`weft_engine`] — the `Stream` contract and the `and`/`or`
//!   combinators that realize search.
//! - [`weft_solve`] — the standard predicate library and the
//!   `run`/`run_one`/`run_all` query driver.
//!
//! Host code typically only needs this crate's re-exports:
//!
//! ```
//! use weft::*;
//!
//! let mut program = Program::new();
//! program.define_facts(
//!     "parent",
//!     vec![
//!         vec![Term::sym("a"), Term::sym("b")],
//!         vec![Term::sym("b"), Term::sym("c")],
//!     ],
//! );
//!
//! let g = Term::var(Some("G"));
//! let c = Term::var(Some("C"));
//! let m = Term::var(None);
//! let (g1, m1, m2, c1) = (g.clone(), m.clone(), m.clone(), c.clone());
//! let program2 = program.clone();
//! let goal = and(vec![
//!     Box::new(move || program.call("parent", &[g1.clone(), m1.clone()])),
//!     Box::new(move || program2.call("parent", &[m2.clone(), c1.clone()])),
//! ]);
//!
//! let solutions = run_all(goal, &[("G", g), ("C", c)]).unwrap();
//! assert_eq!(solutions.len(), 1);
//! ```

pub use weft_engine::{and, fail, or, pure, unify_goal, Fault, Goal, GoalThunk, Solved, Stream};
pub use weft_ir::{intern, resolve, Symbol, Term, Value, Var, VarId};
pub use weft_solve::{
    append, between, gt, gte, length, lt, lte, member, minus, plus, run, run_all, run_one, times,
    EngineConfig, EngineError, PartialRun, Program, Query, Relation, Snapshot, SnapshotValue,
    SolutionIter,
};
pub use weft_unify::{occurs_in, unify, Bindings, Mark};
