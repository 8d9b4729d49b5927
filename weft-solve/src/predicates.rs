use weft_engine::{and, fail, or, pure, unify_goal, Fault, Goal, GoalThunk, Solved, Stream};
use weft_ir::{Term, Value};
use weft_unify::{unify, Bindings, Mark};

/// Wraps a goal construction that needs to observe the current bindings
/// before it knows which stream to build -- every predicate in this
/// module is "lazy" in this sense, since its mode (which arguments are
/// bound) is only known once the store it runs against is live.
///
/// The wrapped closure runs exactly once, on the first `pull`; from then
/// on `Lazy` is a thin forwarder to whatever goal it built.
struct Lazy<F> {
    build: Option<F>,
    inner: Option<Goal>,
}

fn lazy<F>(build: F) -> Goal
where
    F: FnOnce(&mut Bindings) -> Result<Goal, Fault> + 'static,
{
    Box::new(Lazy {
        build: Some(build),
        inner: None,
    })
}

impl<F> Stream for Lazy<F>
where
    F: FnOnce(&mut Bindings) -> Result<Goal, Fault>,
{
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault> {
        if self.inner.is_none() {
            let build = self
                .build
                .take()
                .expect("Lazy::pull called again after its goal was already built and exhausted");
            self.inner = Some(build(bindings)?);
        }
        self.inner.as_mut().expect("just built above").pull(bindings)
    }

    fn close(&mut self, bindings: &mut Bindings) {
        if let Some(mut goal) = self.inner.take() {
            goal.close(bindings);
        }
        self.build = None;
    }
}

/// A bound argument of the wrong shape is a type error; an unbound one
/// just means the predicate's mode isn't decided yet (logical failure,
/// not a fault).
fn require_int(term: &Term) -> Result<Option<i64>, Fault> {
    match term {
        Term::Var(_) => Ok(None),
        Term::Atom(Value::Int(n)) => Ok(Some(*n)),
        Term::Atom(other) => Err(Fault {
            expected: "integer",
            found: format!("{other:?}"),
        }),
        Term::Seq(_) => Err(Fault {
            expected: "integer",
            found: "sequence".to_string(),
        }),
    }
}

fn require_seq(term: &Term) -> Result<Option<Vec<Term>>, Fault> {
    match term {
        Term::Var(_) => Ok(None),
        Term::Seq(items) => Ok(Some(items.to_vec())),
        Term::Atom(v) => Err(Fault {
            expected: "sequence",
            found: format!("{v:?}"),
        }),
    }
}

/// `member(X, L)`: `L` unifies (after walk) with a sequence; yields one
/// solution per element, binding `X` to that element, left to right.
pub fn member(x: Term, l: Term) -> Goal {
    lazy(move |bindings| {
        let walked = bindings.walk(&l);
        match require_seq(&walked)? {
            Some(items) => {
                let thunks: Vec<GoalThunk> = items
                    .into_iter()
                    .map(|item| {
                        let x = x.clone();
                        let thunk: GoalThunk = Box::new(move || unify_goal(x.clone(), item.clone()));
                        thunk
                    })
                    .collect();
                Ok(or(thunks))
            }
            None => Ok(fail()),
        }
    })
}

/// `append(Xs, Ys, Zs)`: `Zs` is the concatenation of `Xs` and `Ys`.
///
/// When `Xs` and `Ys` both walk to sequences, there is exactly one
/// solution: unify `Zs` with their concatenation. Otherwise, when `Zs`
/// walks to a sequence, every split of it into a prefix/suffix pair is
/// enumerated, from the empty prefix to the full sequence.
pub fn append(xs: Term, ys: Term, zs: Term) -> Goal {
    lazy(move |bindings| {
        let wx = require_seq(&bindings.walk(&xs))?;
        let wy = require_seq(&bindings.walk(&ys))?;
        if let (Some(mut xi), Some(yi)) = (wx, wy) {
            xi.extend(yi);
            return Ok(unify_goal(zs.clone(), Term::seq(xi)));
        }

        let wz = require_seq(&bindings.walk(&zs))?;
        if let Some(items) = wz {
            let thunks: Vec<GoalThunk> = (0..=items.len())
                .map(|split| {
                    let front = Term::seq(items[..split].to_vec());
                    let back = Term::seq(items[split..].to_vec());
                    let xs = xs.clone();
                    let ys = ys.clone();
                    let thunk: GoalThunk = Box::new(move || {
                        let front = front.clone();
                        let back = back.clone();
                        let xs = xs.clone();
                        let ys = ys.clone();
                        and(vec![
                            Box::new(move || unify_goal(xs.clone(), front.clone())),
                            Box::new(move || unify_goal(ys.clone(), back.clone())),
                        ])
                    });
                    thunk
                })
                .collect();
            return Ok(or(thunks));
        }

        Ok(fail())
    })
}

/// `length(L, N)`: if `L` walks to a sequence, verify its length against
/// `N`; if `N` walks to a non-negative integer and `L` is free, generate
/// a sequence of that many fresh variables. Both free is undefined and
/// fails.
pub fn length(l: Term, n: Term) -> Goal {
    lazy(move |bindings| {
        if let Some(items) = require_seq(&bindings.walk(&l))? {
            return Ok(unify_goal(n.clone(), Term::from(items.len() as i64)));
        }
        if let Some(k) = require_int(&bindings.walk(&n))? {
            if k < 0 {
                return Ok(fail());
            }
            let items: Vec<Term> = (0..k).map(|_| Term::var(None)).collect();
            return Ok(unify_goal(l.clone(), Term::seq(items)));
        }
        Ok(fail())
    })
}

#[derive(Clone, Copy)]
enum ArithOp {
    Plus,
    Minus,
    Times,
}

/// `Z = X op Y` for `op` in `{+, -, *}`. At least two of the three
/// arguments must be bound to integers after walking; the third is
/// solved for and unified. All three bound is just a verification via
/// `unify`. Fewer than two bound is an undecidable mode and fails.
fn arith(op: ArithOp, x: Term, y: Term, z: Term) -> Goal {
    lazy(move |bindings| {
        let a = require_int(&bindings.walk(&x))?;
        let b = require_int(&bindings.walk(&y))?;
        let c = require_int(&bindings.walk(&z))?;

        let solved = match (a, b, c) {
            (Some(a), Some(b), _) => apply(op, a, b).map(|c| (z.clone(), c)),
            (Some(a), None, Some(c)) => invert_rhs(op, a, c).map(|b| (y.clone(), b)),
            (None, Some(b), Some(c)) => invert_lhs(op, b, c).map(|a| (x.clone(), a)),
            _ => None,
        };

        match solved {
            Some((target, value)) => Ok(unify_goal(target, Term::from(value))),
            None => Ok(fail()),
        }
    })
}

fn apply(op: ArithOp, a: i64, b: i64) -> Option<i64> {
    match op {
        ArithOp::Plus => a.checked_add(b),
        ArithOp::Minus => a.checked_sub(b),
        ArithOp::Times => a.checked_mul(b),
    }
}

/// Given `a op y = c`, solves for `y`.
fn invert_rhs(op: ArithOp, a: i64, c: i64) -> Option<i64> {
    match op {
        ArithOp::Plus => c.checked_sub(a),
        ArithOp::Minus => a.checked_sub(c),
        ArithOp::Times => {
            if a == 0 || c % a != 0 {
                None
            } else {
                Some(c / a)
            }
        }
    }
}

/// Given `x op b = c`, solves for `x`.
fn invert_lhs(op: ArithOp, b: i64, c: i64) -> Option<i64> {
    match op {
        ArithOp::Plus => c.checked_sub(b),
        ArithOp::Minus => c.checked_add(b),
        ArithOp::Times => {
            if b == 0 || c % b != 0 {
                None
            } else {
                Some(c / b)
            }
        }
    }
}

pub fn plus(x: Term, y: Term, z: Term) -> Goal {
    arith(ArithOp::Plus, x, y, z)
}

pub fn minus(x: Term, y: Term, z: Term) -> Goal {
    arith(ArithOp::Minus, x, y, z)
}

pub fn times(x: Term, y: Term, z: Term) -> Goal {
    arith(ArithOp::Times, x, y, z)
}

/// A stream that enumerates `current..=hi` one step per `pull`, binding
/// `x` to each value in turn. Unlike routing the same enumeration
/// through `or(Vec<GoalThunk>)`, this never materializes more than one
/// candidate ahead of the consumer -- the shape `between`'s free mode
/// needs to stay a genuinely resumable generator rather than a
/// precomputed list of alternatives, the same way `UnifyStream` stays
/// resumable for a single unification attempt.
struct RangeStream {
    x: Term,
    current: i64,
    hi: i64,
    mark: Option<Mark>,
    exhausted: bool,
}

impl Stream for RangeStream {
    fn pull(&mut self, bindings: &mut Bindings) -> Result<Solved, Fault> {
        if let Some(mark) = self.mark.take() {
            bindings.rollback(mark);
        }
        if self.exhausted || self.current > self.hi {
            self.exhausted = true;
            return Ok(Solved::Done);
        }
        let mark = bindings.mark();
        let v = self.current;
        if v == self.hi {
            self.exhausted = true;
        } else {
            self.current += 1;
        }
        let bound = unify(bindings, &self.x, &Term::from(v));
        debug_assert!(bound, "x is free by construction; unify cannot fail here");
        self.mark = Some(mark);
        Ok(Solved::Yielded)
    }

    fn close(&mut self, bindings: &mut Bindings) {
        if let Some(mark) = self.mark.take() {
            bindings.rollback(mark);
        }
        self.exhausted = true;
    }
}

/// `between(Lo, Hi, X)`: `Lo` and `Hi` must walk to integers. If `X`
/// walks to an integer, verify `Lo <= X <= Hi`; if `X` is free, enumerate
/// `Lo, Lo + 1, ..., Hi` in order (empty if `Lo > Hi`).
pub fn between(lo: Term, hi: Term, x: Term) -> Goal {
    lazy(move |bindings| {
        let (lo_v, hi_v) = match (
            require_int(&bindings.walk(&lo))?,
            require_int(&bindings.walk(&hi))?,
        ) {
            (Some(l), Some(h)) => (l, h),
            _ => return Ok(fail()),
        };

        match require_int(&bindings.walk(&x))? {
            Some(k) => Ok(pure(lo_v <= k && k <= hi_v)),
            None => Ok(Box::new(RangeStream {
                x: x.clone(),
                current: lo_v,
                hi: hi_v,
                mark: None,
                exhausted: false,
            })),
        }
    })
}

fn compare(op: fn(i64, i64) -> bool, x: Term, y: Term) -> Goal {
    lazy(move |bindings| {
        match (
            require_int(&bindings.walk(&x))?,
            require_int(&bindings.walk(&y))?,
        ) {
            (Some(a), Some(b)) => Ok(pure(op(a, b))),
            _ => Ok(fail()),
        }
    })
}

pub fn gt(x: Term, y: Term) -> Goal {
    compare(|a, b| a > b, x, y)
}

pub fn lt(x: Term, y: Term) -> Goal {
    compare(|a, b| a < b, x, y)
}

pub fn gte(x: Term, y: Term) -> Goal {
    compare(|a, b| a >= b, x, y)
}

pub fn lte(x: Term, y: Term) -> Goal {
    compare(|a, b| a <= b, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(mut goal: Goal, x: &Term, b: &mut Bindings) -> Vec<i64> {
        let mut out = Vec::new();
        while goal.pull(b).expect("no type error expected") == Solved::Yielded {
            out.push(b.walk(x).as_int().expect("integer result"));
        }
        out
    }

    #[test]
    fn member_enumerates_left_to_right() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let l = Term::seq([Term::from(1), Term::from(2), Term::from(3)]);
        let got = solutions(member(x.clone(), l), &x, &mut b);
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn member_against_non_sequence_fails_silently() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let mut goal = member(x, Term::from(5));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Done));
    }

    #[test]
    fn append_forward_mode_concatenates() {
        let mut b = Bindings::new();
        let zs = Term::var(Some("Zs"));
        let xs = Term::seq([Term::from(1), Term::from(2)]);
        let ys = Term::seq([Term::from(3)]);
        let mut goal = append(xs, ys, zs.clone());
        assert_eq!(goal.pull(&mut b), Ok(Solved::Yielded));
        assert_eq!(
            b.walk(&zs),
            Term::seq([Term::from(1), Term::from(2), Term::from(3)])
        );
        assert_eq!(goal.pull(&mut b), Ok(Solved::Done));
    }

    #[test]
    fn append_backward_mode_enumerates_all_splits() {
        let mut b = Bindings::new();
        let xs = Term::var(Some("Xs"));
        let ys = Term::var(Some("Ys"));
        let zs = Term::seq([Term::from(1), Term::from(2)]);
        let mut goal = append(xs.clone(), ys.clone(), zs);

        let mut splits = Vec::new();
        while goal.pull(&mut b).unwrap() == Solved::Yielded {
            splits.push((b.walk(&xs), b.walk(&ys)));
        }
        assert_eq!(
            splits,
            vec![
                (Term::nil(), Term::seq([Term::from(1), Term::from(2)])),
                (Term::seq([Term::from(1)]), Term::seq([Term::from(2)])),
                (Term::seq([Term::from(1), Term::from(2)]), Term::nil()),
            ]
        );
    }

    #[test]
    fn length_verifies_bound_sequence() {
        let mut b = Bindings::new();
        let l = Term::seq([Term::from(1), Term::from(2)]);
        let mut goal = length(l, Term::from(2));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Yielded));
    }

    #[test]
    fn length_generates_fresh_sequence_from_free_list() {
        let mut b = Bindings::new();
        let l = Term::var(Some("L"));
        let mut goal = length(l.clone(), Term::from(3));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Yielded));
        let items = b.walk(&l);
        assert_eq!(items.as_seq().unwrap().len(), 3);
    }

    #[test]
    fn plus_solves_for_missing_argument() {
        let mut b = Bindings::new();
        let y = Term::var(Some("Y"));
        let mut goal = plus(Term::from(2), y.clone(), Term::from(5));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Yielded));
        assert_eq!(b.walk(&y), Term::from(3));
    }

    #[test]
    fn times_rejects_indivisible_quotient() {
        let mut b = Bindings::new();
        let y = Term::var(Some("Y"));
        let mut goal = times(Term::from(3), y, Term::from(7));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Done));
    }

    #[test]
    fn between_generates_inclusive_range() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let got = solutions(between(Term::from(1), Term::from(3), x.clone()), &x, &mut b);
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn between_is_empty_when_lo_exceeds_hi() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let mut goal = between(Term::from(5), Term::from(1), x);
        assert_eq!(goal.pull(&mut b), Ok(Solved::Done));
    }

    #[test]
    fn comparisons_require_both_sides_bound() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let mut goal = gt(x, Term::from(1));
        assert_eq!(goal.pull(&mut b), Ok(Solved::Done));
    }

    #[test]
    fn comparison_against_non_integer_is_a_type_error() {
        let mut b = Bindings::new();
        let mut goal = gt(Term::from("not a number"), Term::from(1));
        assert!(goal.pull(&mut b).is_err());
    }
}
