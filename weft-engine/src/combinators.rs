use crate::primitives::pure;
use crate::stream::{Fault, Goal, GoalThunk, Solved, Stream};
use weft_unify::Bindings;

/// Forms the Cartesian product of `thunks` in left-to-right order: for
/// each solution of the first goal, every solution of the second is
/// enumerated, and so on recursively. A solution is yielded only when
/// every goal has yielded and the cumulative bindings are consistent
/// (which they are by construction, since each later goal is pulled
/// against the store left exactly as the earlier goals' bindings set
/// it).
///
/// `thunks[0]` is constructed eagerly on first `pull`; `thunks[i]` for
/// `i >= 1` is constructed only once control actually reaches it, i.e.
/// after `thunks[i - 1]`'s current stream has yielded -- this is what
/// lets later goals reference variables bound by earlier ones.
pub fn and(thunks: Vec<GoalThunk>) -> Goal {
    if thunks.is_empty() {
        // The empty conjunction is vacuously true.
        return pure(true);
    }
    Box::new(AndStream {
        thunks,
        stack: Vec::new(),
        done: false,
    })
}

struct AndStream {
    thunks: Vec<GoalThunk>,
    /// Live sub-streams, one per goal currently "open" -- `stack[i]` was
    /// constructed from `thunks[i]` once `thunks[i - 1]` (or nothing, for
    /// `i == 0`) had already yielded. The stack's length is always the
    /// depth we are currently searching at, `stack.len() - 1`.
    stack: Vec<Goal>,
    done: bool,
}

impl Stream for AndStream {
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault> {
        if self.done {
            return Ok(Solved::Done);
        }
        if self.stack.is_empty() {
            self.stack.push((self.thunks[0])());
        }
        loop {
            let depth = self.stack.len() - 1;
            match self.stack[depth].pull(bindings) {
                Ok(Solved::Yielded) => {
                    if depth + 1 == self.thunks.len() {
                        // Every conjunct has a solution; this is one
                        // full answer for the conjunction.
                        tracing::trace!(depth, "and: full conjunction yielded");
                        return Ok(Solved::Yielded);
                    }
                    // This goal's bindings are now in the store; build
                    // the next conjunct against them.
                    tracing::trace!(depth, "and: descending into next conjunct");
                    self.stack.push((self.thunks[depth + 1])());
                }
                Ok(Solved::Done) => {
                    // This sub-stream already restored its own bindings
                    // (the exhaustion rule). Backtrack to the previous
                    // conjunct and ask it for its next solution.
                    tracing::trace!(depth, "and: conjunct exhausted, backtracking");
                    self.stack.pop();
                    if self.stack.is_empty() {
                        self.done = true;
                        return Ok(Solved::Done);
                    }
                }
                Err(fault) => {
                    self.close(bindings);
                    return Err(fault);
                }
            }
        }
    }

    fn close(&mut self, bindings: &mut Bindings) {
        // Close innermost first, then walk outward -- each sub-stream
        // rolls back only its own mark, so closing in this order always
        // leaves the store correctly restored regardless of how deep the
        // search had gotten.
        while let Some(mut g) = self.stack.pop() {
            g.close(bindings);
        }
        self.done = true;
    }
}

/// Yields every solution of `thunks[0]`, then every solution of
/// `thunks[1]`, and so on. Each goal is constructed only once control
/// reaches it; between branches the store is at the combinator's
/// creation-time state, since the previous branch has either exhausted
/// (and self-restored) or been closed.
pub fn or(thunks: Vec<GoalThunk>) -> Goal {
    Box::new(OrStream {
        thunks,
        index: 0,
        current: None,
    })
}

struct OrStream {
    thunks: Vec<GoalThunk>,
    index: usize,
    current: Option<Goal>,
}

impl Stream for OrStream {
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault> {
        loop {
            if self.current.is_none() {
                if self.index >= self.thunks.len() {
                    return Ok(Solved::Done);
                }
                tracing::trace!(branch = self.index, "or: entering branch");
                self.current = Some((self.thunks[self.index])());
                self.index += 1;
            }
            let branch = self.current.as_mut().expect("just constructed above");
            match branch.pull(bindings) {
                Ok(Solved::Yielded) => return Ok(Solved::Yielded),
                Ok(Solved::Done) => {
                    self.current = None;
                }
                Err(fault) => {
                    self.close(bindings);
                    return Err(fault);
                }
            }
        }
    }

    fn close(&mut self, bindings: &mut Bindings) {
        if let Some(mut branch) = self.current.take() {
            branch.close(bindings);
        }
        self.index = self.thunks.len();
    }
}
