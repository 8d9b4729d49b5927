use std::fmt;
use std::sync::Arc;

use weft_engine::{Goal, Solved, Stream};
use weft_ir::{Term, Value};
use weft_unify::Bindings;

use crate::error::EngineError;

/// The one tunable the core genuinely needs: a ceiling on how many
/// `pull`s a single query may perform before the driver gives up on it.
/// There is no other persistent configuration surface -- programs are
/// supplied directly through the combinator API, not loaded from a
/// config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub max_steps: Option<usize>,
}

/// An immutable mapping from a query's named variables to their
/// dereferenced values at one yielded solution.
pub type Snapshot = Vec<(Arc<str>, SnapshotValue)>;

/// The dereferenced shape of one snapshot entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotValue {
    Atom(Value),
    List(Vec<SnapshotValue>),
    /// The variable was still unbound when the snapshot was taken.
    Unbound,
}

/// The store-aware counterpart of `Term`'s store-independent `Display`:
/// since a `SnapshotValue` has already been walked to a fixed point,
/// rendering it never needs a `Bindings` reference at print time.
impl fmt::Display for SnapshotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotValue::Atom(v) => write!(f, "{v:?}"),
            SnapshotValue::Unbound => write!(f, "_"),
            SnapshotValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn snapshot_value(bindings: &Bindings, term: &Term) -> SnapshotValue {
    match bindings.walk(term) {
        Term::Atom(v) => SnapshotValue::Atom(v),
        Term::Var(_) => SnapshotValue::Unbound,
        Term::Seq(items) => {
            SnapshotValue::List(items.iter().map(|t| snapshot_value(bindings, t)).collect())
        }
    }
}

/// Describes a query before it starts running: the goal to pull and the
/// named variables to report back in each snapshot.
pub struct Query {
    goal: Goal,
    vars: Vec<(Arc<str>, Term)>,
    config: EngineConfig,
}

impl Query {
    pub fn new(goal: Goal, vars: &[(&str, Term)]) -> Self {
        Query {
            goal,
            vars: vars.iter().map(|(n, t)| (Arc::from(*n), t.clone())).collect(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(goal: Goal, vars: &[(&str, Term)], config: EngineConfig) -> Self {
        Query {
            config,
            ..Query::new(goal, vars)
        }
    }

    /// Starts the query, returning an iterator that pulls the goal
    /// stream one step at a time.
    pub fn run(self) -> SolutionIter {
        SolutionIter {
            goal: Some(self.goal),
            bindings: Bindings::new(),
            vars: self.vars,
            steps: 0,
            max_steps: self.config.max_steps,
        }
    }
}

/// A lazy, pull-based iterator over a query's solutions.
///
/// Each `next()` call performs exactly one `pull` on the underlying goal
/// stream -- this is what makes `run_one`'s laziness guarantee hold
/// without any special-casing: taking the first item from this iterator
/// and then dropping it does at most the work one solution requires.
pub struct SolutionIter {
    goal: Option<Goal>,
    bindings: Bindings,
    vars: Vec<(Arc<str>, Term)>,
    steps: usize,
    max_steps: Option<usize>,
}

impl SolutionIter {
    /// Declares that no further solutions will be pulled, restoring the
    /// store. Safe to call more than once, and safe to call after the
    /// goal has already exhausted itself.
    pub fn close(&mut self) {
        if let Some(mut goal) = self.goal.take() {
            goal.close(&mut self.bindings);
        }
    }

    fn snapshot(&self) -> Snapshot {
        self.vars
            .iter()
            .map(|(name, term)| (name.clone(), snapshot_value(&self.bindings, term)))
            .collect()
    }
}

impl Iterator for SolutionIter {
    type Item = Result<Snapshot, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let goal = self.goal.as_mut()?;

        if let Some(budget) = self.max_steps {
            if self.steps >= budget {
                self.close();
                return Some(Err(EngineError::ContractViolation(
                    "query exceeded its configured step budget".to_string(),
                )));
            }
        }
        self.steps += 1;

        match goal.pull(&mut self.bindings) {
            Ok(Solved::Yielded) => {
                tracing::debug!(steps = self.steps, "query yielded a solution");
                Some(Ok(self.snapshot()))
            }
            Ok(Solved::Done) => {
                self.goal = None;
                None
            }
            Err(fault) => {
                self.close();
                Some(Err(EngineError::TypeError {
                    expected: fault.expected,
                    found: fault.found,
                }))
            }
        }
    }
}

impl Drop for SolutionIter {
    /// Closes the stream on early termination -- e.g. a consumer that
    /// stops iterating (`for`-loop `break`, or dropping the iterator
    /// outright) before exhaustion. Unlike a combinator's internal
    /// sub-streams, `SolutionIter` owns its `Bindings` directly rather
    /// than borrowing one from a caller, so `Drop` can run the real
    /// `close` here -- this is the one place in the crate where that is
    /// possible.
    fn drop(&mut self) {
        self.close();
    }
}

/// Runs `goal`, reporting `vars` at each solution.
pub fn run(goal: Goal, vars: &[(&str, Term)]) -> SolutionIter {
    Query::new(goal, vars).run()
}

/// Pulls exactly one solution (if any) and closes the stream
/// unconditionally, matching the early-termination rule: a caller that
/// only wants the first answer never leaves the store in the
/// "mid-search" state.
pub fn run_one(goal: Goal, vars: &[(&str, Term)]) -> Option<Result<Snapshot, EngineError>> {
    let mut iter = run(goal, vars);
    let first = iter.next();
    iter.close();
    first
}

/// The result of `run_all` when enumeration is cut short by a fatal
/// error: what was gathered before the error, plus the error itself.
/// (**expansion**: the bare contract only requires surfacing the error,
/// but a host debugging a type error partway through enumeration wants
/// to see how far it got.)
#[derive(Debug, Clone, PartialEq)]
pub struct PartialRun {
    pub collected: Vec<Snapshot>,
    pub error: EngineError,
}

/// Materializes every solution of `goal` into an ordered list.
pub fn run_all(goal: Goal, vars: &[(&str, Term)]) -> Result<Vec<Snapshot>, PartialRun> {
    let mut collected = Vec::new();
    for item in run(goal, vars) {
        match item {
            Ok(snapshot) => collected.push(snapshot),
            Err(error) => return Err(PartialRun { collected, error }),
        }
    }
    Ok(collected)
}
