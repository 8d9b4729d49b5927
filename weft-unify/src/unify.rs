use crate::store::Bindings;
use weft_ir::{Term, VarId};

/// Structurally unifies `a` and `b` under `bindings`, walking both sides
/// first.
///
/// On success, any bindings made are left in `bindings` (appended to the
/// trail); the caller is responsible for rolling back to a mark taken
/// before the call if it wants to discard a failed or abandoned attempt.
/// On the *first* failing sub-term, `unify` stops immediately without
/// attempting to undo the bindings it already made along the way --
/// that is the surrounding stream combinator's job, since only the
/// combinator knows the mark to roll back to.
pub fn unify(bindings: &mut Bindings, a: &Term, b: &Term) -> bool {
    let a = bindings.walk(a);
    let b = bindings.walk(b);

    match (&a, &b) {
        (Term::Var(va), Term::Var(vb)) if va.id() == vb.id() => true,

        (Term::Var(va), _) => bind_var(bindings, va.id(), b.clone()),
        (_, Term::Var(vb)) => bind_var(bindings, vb.id(), a.clone()),

        (Term::Atom(x), Term::Atom(y)) => x == y,

        (Term::Seq(xs), Term::Seq(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            xs.iter().zip(ys.iter()).all(|(x, y)| unify(bindings, x, y))
        }

        _ => false,
    }
}

/// Binds `var` to `term`, enforcing the occurs policy: a compound target
/// is rejected if `var` appears anywhere inside it after walking.
/// Variable-to-variable aliasing is exempt, since it can never construct
/// a cycle -- it always links to an unbound representative.
fn bind_var(bindings: &mut Bindings, var: VarId, term: Term) -> bool {
    if let Term::Seq(_) = &term {
        if occurs_in(bindings, var, &term) {
            return false;
        }
    }
    bindings.bind(var, term);
    true
}

/// True if `var` appears anywhere within `term`, after walking `term`'s
/// sub-terms against `bindings`. Used by the unifier's occurs check and,
/// separately, by `weft-engine`'s builtins that need the same recursive
/// walk shape (e.g. validating that a generated term is acyclic before
/// reporting it).
pub fn occurs_in(bindings: &Bindings, var: VarId, term: &Term) -> bool {
    match bindings.walk(term) {
        Term::Var(v) => v.id() == var,
        Term::Atom(_) => false,
        Term::Seq(items) => items.iter().any(|t| occurs_in(bindings, var, t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unify_same_variable_binds_nothing() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let m = b.mark();
        assert!(unify(&mut b, &x, &x));
        assert_eq!(b.mark(), m, "aliasing a variable with itself must not bind");
    }

    #[test]
    fn unify_binds_unbound_variable() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        assert!(unify(&mut b, &x, &Term::from(7)));
        assert_eq!(b.walk(&x), Term::from(7));
    }

    #[test]
    fn unify_is_symmetric() {
        let mut b1 = Bindings::new();
        let x = Term::var(Some("X"));
        assert!(unify(&mut b1, &x, &Term::from(9)));

        let mut b2 = Bindings::new();
        let x2 = Term::var(Some("X"));
        assert!(unify(&mut b2, &Term::from(9), &x2));

        assert_eq!(b1.walk(&x), b2.walk(&x2));
    }

    #[test]
    fn unify_sequences_elementwise() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let a = Term::seq([Term::from(1), x.clone()]);
        let c = Term::seq([Term::from(1), Term::from(2)]);
        assert!(unify(&mut b, &a, &c));
        assert_eq!(b.walk(&x), Term::from(2));
    }

    #[test]
    fn unify_rejects_mismatched_lengths() {
        let mut b = Bindings::new();
        let a = Term::seq([Term::from(1), Term::from(2)]);
        let c = Term::seq([Term::from(1), Term::from(2), Term::from(3)]);
        assert!(!unify(&mut b, &a, &c));
    }

    #[test]
    fn occurs_check_rejects_infinite_term() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let cyclic = Term::seq([x.clone(), Term::from(1)]);
        assert!(!unify(&mut b, &x, &cyclic));
        assert!(!b.is_bound(x.as_var().unwrap().id()));
    }

    #[test]
    fn var_to_var_aliasing_needs_no_occurs_check() {
        let mut b = Bindings::new();
        let x = Term::var(Some("X"));
        let y = Term::var(Some("Y"));
        assert!(unify(&mut b, &x, &y));
    }
}
