use weft::*;

#[test]
fn grandparent_is_derived_from_parent_facts() {
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

    let solutions = run_all(grandparent, &[("G", g), ("C", c)]).unwrap();
    let pairs: Vec<(String, String)> = solutions
        .iter()
        .map(|snap| {
            let sym = |name: &str| -> String {
                let (_, v) = snap.iter().find(|(n, _)| n.as_ref() == name).unwrap();
                match v {
                    SnapshotValue::Atom(Value::Sym(s)) => resolve(*s).to_string(),
                    other => panic!("expected a symbol, got {other:?}"),
                }
            };
            (sym("G"), sym("C"))
        })
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "c".to_string()),
            ("a".to_string(), "d".to_string()),
        ]
    );
}
