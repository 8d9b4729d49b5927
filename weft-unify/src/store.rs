use std::collections::HashMap;
use weft_ir::{Term, VarId};

/// An opaque trail position. `Bindings::mark` returns one; `Bindings::rollback`
/// consumes one. The only valid uses of a `Mark` are against the `Bindings`
/// that produced it, though nothing prevents misuse at the type level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

/// A trail-journaled map from variable handle to binding.
///
/// Absence of an entry means "unbound." Every `bind` call appends the
/// bound variable's id to the trail in insertion order, so rolling back to
/// an earlier `mark` is an O(k) pop-and-remove for the `k` bindings made
/// since, never a full-store copy.
///
/// Unlike a union-find table with rank and path compression (useful when
/// inference variables may be unioned with each other in either
/// direction), a Prolog trail never needs to re-parent a binding: once
/// `bind(v, t)` succeeds, `v` stays bound to exactly `t` until rolled
/// back. A flat map plus a journal of keys is the whole data structure.
#[derive(Default)]
pub struct Bindings {
    slots: HashMap<VarId, Term>,
    trail: Vec<VarId>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Follows the binding chain from `t` to its most-resolved form:
    /// either a non-variable term, or an unbound variable. Does not
    /// allocate when `t` is already a non-`Var` term or an unbound `Var`,
    /// since both cases return directly without consulting `slots`.
    pub fn walk(&self, t: &Term) -> Term {
        let mut current = t.clone();
        loop {
            let Term::Var(v) = &current else {
                return current;
            };
            match self.slots.get(&v.id()) {
                Some(bound) => current = bound.clone(),
                None => return current,
            }
        }
    }

    /// Alias for `walk`, named to match the external-interface vocabulary
    /// (`deref`) used by host code doing introspection.
    pub fn deref(&self, t: &Term) -> Term {
        self.walk(t)
    }

    /// True if a walk starting from `var` terminates at a non-variable
    /// term.
    pub fn is_bound(&self, var: VarId) -> bool {
        match self.slots.get(&var) {
            None => false,
            Some(bound) => !matches!(self.walk(bound), Term::Var(_)),
        }
    }

    /// Binds `var` to `term`, recording the binding on the trail.
    ///
    /// Precondition: `var` must be unbound (callers always walk first).
    /// This is enforced with a debug assertion rather than silently
    /// overwriting, since a double-bind without an intervening rollback
    /// indicates a bug in the unifier, not a normal control-flow outcome.
    pub fn bind(&mut self, var: VarId, term: Term) {
        debug_assert!(
            !self.slots.contains_key(&var),
            "bind() called on an already-bound variable; the caller should have walked first"
        );
        tracing::trace!(?var, ?term, "bind");
        self.slots.insert(var, term);
        self.trail.push(var);
    }

    /// Returns the current trail length, to be paired with a later
    /// `rollback` call.
    pub fn mark(&self) -> Mark {
        Mark(self.trail.len())
    }

    /// Removes every binding made since `mark`, restoring the store to
    /// exactly its state when `mark` was taken -- regardless of what
    /// happened in between, including a partial failure mid-unification.
    pub fn rollback(&mut self, mark: Mark) {
        debug_assert!(
            mark.0 <= self.trail.len(),
            "rollback target is ahead of the current trail"
        );
        while self.trail.len() > mark.0 {
            let var = self.trail.pop().expect("trail shrunk under us");
            self.slots.remove(&var);
        }
        tracing::trace!(mark = mark.0, "rollback");
    }

    /// Debug-only contract check: a stream or combinator that claims to
    /// have restored the store to `mark` should find the trail back at
    /// that length. Engine code calls this from `Drop`/`close` paths to
    /// catch the "programming error" class of host-contract violation
    /// (spec's unbalanced bind/rollback) as early as possible.
    pub fn assert_balanced(&self, mark: Mark) {
        debug_assert_eq!(
            self.trail.len(),
            mark.0,
            "stream did not restore the trail to its creation-time mark"
        );
    }

    #[cfg(test)]
    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }
}
