//! The standard predicate library and the top-level query driver.
//!
//! This is the layer a host application actually touches: everything
//! below (`weft-ir`, `weft-unify`, `weft-engine`) is plumbing for terms,
//! bindings, and streams. Here, those pieces become `member`, `append`,
//! `between`, and the rest of the built-ins, plus `run`/`run_one`/
//! `run_all` to pull solutions out of a goal as ordinary Rust values.

mod error;
mod driver;
mod predicates;
mod program;

pub use error::EngineError;
pub use driver::{run, run_all, run_one, EngineConfig, PartialRun, Query, Snapshot, SolutionIter, SnapshotValue};
pub use predicates::{append, between, gt, gte, length, lt, lte, member, minus, plus, times};
pub use program::{Program, Relation};
