use crate::stream::{Fault, Goal, Solved, Stream};
use weft_ir::Term;
use weft_unify::{unify, Bindings, Mark};

/// A stream wrapping a single unification attempt. Unification is
/// deterministic -- it yields at most one solution -- so `UnifyStream`
/// only ever needs to remember whether it has already produced its one
/// answer.
enum UnifyState {
    Fresh,
    Yielded(Mark),
    Exhausted,
}

struct UnifyStream {
    a: Term,
    b: Term,
    state: UnifyState,
}

impl Stream for UnifyStream {
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault> {
        match self.state {
            UnifyState::Fresh => {
                let mark = bindings.mark();
                if unify(bindings, &self.a, &self.b) {
                    self.state = UnifyState::Yielded(mark);
                    Ok(Solved::Yielded)
                } else {
                    bindings.rollback(mark);
                    self.state = UnifyState::Exhausted;
                    Ok(Solved::Done)
                }
            }
            UnifyState::Yielded(mark) => {
                bindings.rollback(mark);
                self.state = UnifyState::Exhausted;
                Ok(Solved::Done)
            }
            UnifyState::Exhausted => Ok(Solved::Done),
        }
    }

    fn close(&mut self, bindings: &mut Bindings) {
        if let UnifyState::Yielded(mark) = self.state {
            bindings.rollback(mark);
        }
        self.state = UnifyState::Exhausted;
    }
}

/// The primitive unification goal: succeeds at most once, binding
/// whatever `a` and `b` require to become equal.
pub fn unify_goal(a: Term, b: Term) -> Goal {
    Box::new(UnifyStream {
        a,
        b,
        state: UnifyState::Fresh,
    })
}

/// A stream that yields exactly once (if `ok`) or never (if `!ok`),
/// without touching the binding store. Used by built-ins that need to
/// report a deterministic success or failure -- e.g. a numeric
/// comparison -- without constructing a real sub-search.
struct PureStream {
    remaining: bool,
}

impl Stream for PureStream {
    fn pull(&mut self, _bindings: &mut Bindings) -> Result<Solved, Fault> {
        if self.remaining {
            self.remaining = false;
            Ok(Solved::Yielded)
        } else {
            Ok(Solved::Done)
        }
    }

    fn close(&mut self, _bindings: &mut Bindings) {
        self.remaining = false;
    }
}

pub fn pure(ok: bool) -> Goal {
    Box::new(PureStream { remaining: ok })
}

/// A stream that never yields. Equivalent to `pure(false)`, given a
/// distinct name because "fail unconditionally" is a common enough
/// built-in outcome (a mode error, a type mismatch treated as logical
/// failure) to read better at call sites than `pure(false)`.
pub fn fail() -> Goal {
    pure(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unify_goal_yields_once_then_done() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let mut g = unify_goal(x.clone(), Term::from(5));
        assert_eq!(g.pull(&mut b), Ok(Solved::Yielded));
        assert_eq!(b.walk(&x), Term::from(5));
        assert_eq!(g.pull(&mut b), Ok(Solved::Done));
        assert!(!b.is_bound(x.as_var().unwrap().id()));
    }

    #[test]
    fn unify_goal_close_restores_store() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let m = b.mark();
        let mut g = unify_goal(x.clone(), Term::from(5));
        assert_eq!(g.pull(&mut b), Ok(Solved::Yielded));
        g.close(&mut b);
        assert_eq!(b.mark(), m);
        g.close(&mut b); // idempotent
        assert_eq!(b.mark(), m);
    }

    #[test]
    fn pure_false_never_yields() {
        let mut b = Bindings::new();
        let mut g = fail();
        assert_eq!(g.pull(&mut b), Ok(Solved::Done));
    }
}
