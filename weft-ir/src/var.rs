use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Process-unique handle identifying a logic variable.
///
/// `VarId` is the identity half of a variable; the binding store
/// (`weft-unify::Bindings`) owns the state half. Two variables are the
/// same variable iff their ids are equal -- never by name, per the
/// engine's data model.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Mints a fresh, globally-unique id.
    fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        VarId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, useful as a `Bindings` table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// A logic variable: an id plus an optional display name.
///
/// The name is descriptive only -- it never participates in equality,
/// hashing, or ordering, and is not part of the variable's identity (see
/// the data model's variable-lifecycle invariants).
#[derive(Clone)]
pub struct Var {
    id: VarId,
    name: Option<Arc<str>>,
}

impl Var {
    /// Creates a fresh variable with an optional display name.
    pub fn fresh(name: Option<&str>) -> Self {
        Var {
            id: VarId::fresh(),
            name: name.map(Arc::from),
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl std::hash::Hash for Var {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "?{}{:?}", name, self.id),
            None => write!(f, "_G{:?}", self.id),
        }
    }
}
