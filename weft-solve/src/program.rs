use std::collections::HashMap;
use std::sync::Arc;

use weft_engine::{and, or, unify_goal, Goal, GoalThunk};
use weft_ir::Term;

/// A named relation: given a call's argument terms, builds the goal
/// that decides them. Stored behind `Arc` so a `Program` can be cloned
/// cheaply and relations can recursively call back into the same
/// program (e.g. `grandparent` calling `parent` twice).
pub type Relation = Arc<dyn Fn(&[Term]) -> Goal>;

/// A bundle of named relations, so host code can define
/// `grandparent(G, C) := AND(parent(G, M), parent(M, C))`-shaped
/// programs without hand-rolling the thunk boilerplate every call site.
/// This is additive sugar over `and`/`or`; it introduces no new
/// combinator semantics of its own.
#[derive(Default, Clone)]
pub struct Program {
    relations: HashMap<Arc<str>, Relation>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Registers a relation built from an arbitrary combinator tree.
    pub fn define(&mut self, name: &str, relation: impl Fn(&[Term]) -> Goal + 'static) {
        self.relations.insert(Arc::from(name), Arc::new(relation));
    }

    /// Registers a relation as a flat set of ground fact rows, e.g.
    /// `parent(a, b)` and `parent(b, c)` as two rows of arity two. A
    /// call unifies its arguments against each row in turn, like `OR`
    /// over one `unify` conjunction per row.
    pub fn define_facts(&mut self, name: &str, rows: Vec<Vec<Term>>) {
        self.define(name, move |args: &[Term]| {
            let args = args.to_vec();
            let thunks: Vec<GoalThunk> = rows
                .iter()
                .cloned()
                .map(|row| {
                    let args = args.clone();
                    let thunk: GoalThunk = Box::new(move || {
                        let conjuncts: Vec<GoalThunk> = args
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned())
                            .map(|(arg, value)| {
                                let thunk: GoalThunk =
                                    Box::new(move || unify_goal(arg.clone(), value.clone()));
                                thunk
                            })
                            .collect();
                        and(conjuncts)
                    });
                    thunk
                })
                .collect();
            or(thunks)
        });
    }

    /// Calls a registered relation. Calling an undefined name is a
    /// program-construction mistake, not a query-time mode error, but
    /// this still fails silently (rather than panicking) so a host
    /// exploring partially-defined programs interactively doesn't crash
    /// the whole query.
    pub fn call(&self, name: &str, args: &[Term]) -> Goal {
        match self.relations.get(name) {
            Some(relation) => relation(args),
            None => weft_engine::fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_engine::{Solved, Stream};
    use weft_unify::Bindings;

    #[test]
    fn grandparent_derives_from_parent_facts() {
        let mut program = Program::new();
        program.define_facts(
            "parent",
            vec![
                vec![Term::sym("a"), Term::sym("b")],
                vec![Term::sym("b"), Term::sym("c")],
                vec![Term::sym("b"), Term::sym("d")],
            ],
        );

        let g = Term::var(Some("G"));
        let c = Term::var(Some("C"));
        let m = Term::var(None);
        let program_ref = program.clone();
        let program_ref2 = program.clone();
        let g1 = g.clone();
        let m1 = m.clone();
        let m2 = m.clone();
        let c1 = c.clone();
        let mut goal = and(vec![
            Box::new(move || program_ref.call("parent", &[g1.clone(), m1.clone()])),
            Box::new(move || program_ref2.call("parent", &[m2.clone(), c1.clone()])),
        ]);

        let mut b = Bindings::new();
        let mut results = Vec::new();
        while goal.pull(&mut b).unwrap() == Solved::Yielded {
            results.push((b.walk(&g), b.walk(&c)));
        }
        assert_eq!(
            results,
            vec![
                (Term::sym("a"), Term::sym("c")),
                (Term::sym("a"), Term::sym("d")),
            ]
        );
    }
}
