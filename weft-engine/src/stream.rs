use std::fmt;
use weft_unify::Bindings;

/// The result of one `pull` on a [`Stream`].
#[derive(Debug, PartialEq, Eq)]
pub enum Solved {
    /// One solution was found; the binding store currently reflects it.
    /// The caller may inspect bindings until the next `pull` or `close`.
    Yielded,
    /// The stream is exhausted. By the exhaustion rule, the store has
    /// already been restored to its creation-time state -- this is
    /// equivalent to an implicit `close`.
    Done,
}

/// A fatal fault raised from inside a stream's `pull`, as opposed to an
/// ordinary logical failure (which is just `Done`).
///
/// Kept dependency-free of `thiserror` here since only the driver layer
/// (`weft-solve`) needs a richly-derived error type; built-ins in this
/// crate only ever need to name what shape they expected and what they
/// actually walked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub expected: &'static str,
    pub found: String,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl std::error::Error for Fault {}

/// A pull-based, resumable producer of solutions.
///
/// Implementations must uphold the stream contract: `close` restores the
/// binding store to exactly its state at stream creation and is
/// idempotent; between a `Yielded` return and the next `pull`, the
/// stream undoes the bindings it made for that solution before searching
/// for the next one; `Done` implies the store was already restored. A
/// violation of this contract by a host-written predicate corrupts
/// search for every ancestor combinator, which is why `weft-unify`
/// exposes `Bindings::assert_balanced` for combinators to check
/// themselves against in debug builds.
///
/// A built-in that receives a term of the wrong shape (e.g. a
/// comparison over a non-number) returns `Err(Fault)` instead of
/// `Ok(Solved::Done)` -- this is the one case where failure is *not*
/// recovered by backtracking. Combinators must propagate a `Fault`
/// outward after closing whatever sub-streams they still hold open, so
/// the store is left empty by the time the fault reaches the driver.
pub trait Stream {
    /// Advances the search by one step, returning whether a solution was
    /// found, or a fatal fault.
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault>;

    /// Declares that no further `pull` calls will be made. Must restore
    /// the store to its creation-time state. Must be safe to call more
    /// than once.
    fn close(&mut self, bindings: &mut Bindings);
}

/// A boxed, type-erased goal. Goals are always heap-allocated trait
/// objects rather than a monomorphized generic tree: `and`/`or` accept a
/// dynamic number of heterogeneous goals (built-ins, user relations, and
/// nested combinators all mixed together), which only a trait object (or
/// an enum covering every possible goal shape) can express without
/// forcing every goal-producing function in the crate to be generic over
/// its caller's combinator tree shape.
pub type Goal = Box<dyn Stream>;

/// A deferred goal construction.
///
/// `AND`'s non-first conjuncts and every one of `OR`'s disjuncts must be
/// supplied this way rather than as a prebuilt `Goal`, because
/// constructing the underlying stream may need to observe bindings
/// established earlier in the search -- a thunk lets the combinator
/// defer that construction to exactly the moment control reaches it.
pub type GoalThunk = Box<dyn Fn() -> Goal>;
