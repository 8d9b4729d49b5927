//! Defines a small set of `parent` facts and derives `grandparent` from
//! them, printing every solution the engine finds.

use weft::*;

fn main() {
    tracing_subscriber::fmt::init();

    let mut parents = Program::new();
    parents.define_facts(
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

    let (g1, m1, m2, c1) = (g.clone(), m.clone(), m.clone(), c.clone());
    let parents2 = parents.clone();
    let grandparent = and(vec![
        Box::new(move || parents.call("parent", &[g1.clone(), m1.clone()])),
        Box::new(move || parents2.call("parent", &[m2.clone(), c1.clone()])),
    ]);

    for solution in run_all(grandparent, &[("G", g), ("C", c)]).expect("no type errors here") {
        println!("{}", describe(&solution));
    }
}

fn describe(snapshot: &Snapshot) -> String {
    snapshot
        .iter()
        .map(|(name, value)| format!("{name} = {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
