use weft::*;

fn snapshot_int(snapshot: &Snapshot, name: &str) -> i64 {
    let (_, value) = snapshot.iter().find(|(n, _)| n.as_ref() == name).unwrap();
    match value {
        SnapshotValue::Atom(Value::Int(n)) => *n,
        other => panic!("expected an integer snapshot, got {other:?}"),
    }
}

#[test]
fn unifying_a_variable_with_a_constant() {
    let x = Term::var(Some("X"));
    let goal = unify_goal(x.clone(), Term::from(42));
    let solutions = run_all(goal, &[("X", x)]).unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(snapshot_int(&solutions[0], "X"), 42);
}

#[test]
fn member_enumerates_every_element_in_order() {
    let x = Term::var(Some("X"));
    let list = Term::seq([Term::from(1), Term::from(2), Term::from(3)]);
    let goal = member(x.clone(), list);
    let solutions = run_all(goal, &[("X", x)]).unwrap();
    let got: Vec<i64> = solutions.iter().map(|s| snapshot_int(s, "X")).collect();
    assert_eq!(got, vec![1, 2, 3]);
}

#[test]
fn and_of_two_members_is_a_lexicographic_cartesian_product() {
    let x = Term::var(Some("X"));
    let y = Term::var(Some("Y"));
    let list = Term::seq([Term::from(1), Term::from(2), Term::from(3)]);
    let (x1, y1) = (x.clone(), y.clone());
    let (list1, list2) = (list.clone(), list);
    let goal = and(vec![
        Box::new(move || member(x1.clone(), list1.clone())),
        Box::new(move || member(y1.clone(), list2.clone())),
    ]);

    let solutions = run_all(goal, &[("X", x), ("Y", y)]).unwrap();
    assert_eq!(solutions.len(), 9);
    assert_eq!(
        (snapshot_int(&solutions[0], "X"), snapshot_int(&solutions[0], "Y")),
        (1, 1)
    );
    assert_eq!(
        (
            snapshot_int(&solutions[8], "X"),
            snapshot_int(&solutions[8], "Y")
        ),
        (3, 3)
    );
}

#[test]
fn mismatched_sequences_never_unify() {
    let goal = unify_goal(
        Term::seq([Term::from(1), Term::from(2)]),
        Term::seq([Term::from(1), Term::from(2), Term::from(3)]),
    );
    let solutions = run_all(goal, &[]).unwrap();
    assert!(solutions.is_empty());
}

#[test]
fn an_inconsistent_conjunction_leaves_its_variable_unbound() {
    let x = Term::var(Some("X"));
    let (x1, x2) = (x.clone(), x.clone());
    let goal = and(vec![
        Box::new(move || unify_goal(x1.clone(), Term::from(1))),
        Box::new(move || unify_goal(x2.clone(), Term::from(2))),
    ]);
    let solutions = run_all(goal, &[("X", x.clone())]).unwrap();
    assert!(solutions.is_empty());

    // A second, independent query against a fresh store confirms there
    // is no lingering binding to leak across queries.
    let probe = run_one(unify_goal(x.clone(), x), &[]);
    assert!(probe.is_some());
}

#[test]
fn comparing_a_non_integer_is_a_fatal_type_error() {
    let result = run_all(gt(Term::from("five"), Term::from(1)), &[]);
    assert!(result.is_err());
}
