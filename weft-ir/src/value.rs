use crate::interner::{intern, resolve, Symbol};
use std::fmt;
use std::sync::Arc;

/// The host-value payload carried by `Term::Atom`.
///
/// This fixes atoms to a closed set of variants so that `Value` can
/// derive `PartialEq`/`Eq`/`Hash` directly rather than requiring callers
/// to supply their own equality witnesses. Numeric atoms are
/// integer-only, keeping `Eq`/`Hash`/`Ord` all total; a host that needs
/// floats can model them as `Str`-tagged atoms or extend this enum.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(Arc<str>),
    Sym(Symbol),
}

impl Value {
    pub fn sym(name: &str) -> Self {
        Value::Sym(intern(name))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Sym(s) => write!(f, "{}", resolve(*s)),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}
