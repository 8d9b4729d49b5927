use crate::value::Value;
use crate::var::Var;
use std::fmt;
use std::sync::Arc;

/// A term: an atomic host value, a logic variable, or a finite ordered
/// sequence of sub-terms.
///
/// `Seq` is backed by `Arc<[Term]>` rather than `Vec<Term>` so that
/// cloning a compound term during unification or when a stream forks a
/// branch is O(1).
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(Value),
    Var(Var),
    Seq(Arc<[Term]>),
}

impl Term {
    pub fn atom(v: impl Into<Value>) -> Self {
        Term::Atom(v.into())
    }

    pub fn sym(name: &str) -> Self {
        Term::Atom(Value::sym(name))
    }

    /// Builds a fresh, unbound logic variable term. This is the `make_var`
    /// operation of the external interface.
    pub fn var(name: Option<&str>) -> Self {
        Term::Var(Var::fresh(name))
    }

    /// Builds a sequence term out of any ordered collection of terms,
    /// including nested sequences and variables.
    pub fn seq<I: IntoIterator<Item = Term>>(items: I) -> Self {
        Term::Seq(items.into_iter().collect())
    }

    pub fn nil() -> Self {
        Term::Seq(Arc::from([]))
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Term]> {
        match self {
            Term::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Atom(v) => v.as_int(),
            _ => None,
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(v) => write!(f, "{v:?}"),
            Term::Var(v) => write!(f, "{v:?}"),
            Term::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A store-independent rendering: an unbound variable prints as its
/// name or handle, never as whatever it might eventually be bound to.
/// Host code that wants a term's *current* binding rendered should walk
/// it against a `Bindings` first and print the result.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::atom(n)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::atom(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_identity_ignores_name() {
        let a = Var::fresh(Some("X"));
        let b = Var::fresh(Some("X"));
        assert_ne!(a, b, "two fresh variables with the same name are distinct");
    }

    #[test]
    fn seq_clone_is_structural_eq() {
        let a = Term::seq([Term::from(1), Term::from(2)]);
        let b = Term::seq([Term::from(1), Term::from(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn debug_renders_list_like_sequences() {
        let t = Term::seq([Term::from(1), Term::sym("x")]);
        assert_eq!(format!("{t:?}"), "[1, x]");
    }
}
