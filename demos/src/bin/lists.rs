//! Exercises `append` and `between` in their "generate" modes: every
//! split of a ground list, and a lazily-enumerated integer range.

use weft::*;

fn main() {
    tracing_subscriber::fmt::init();

    let xs = Term::var(Some("Xs"));
    let ys = Term::var(Some("Ys"));
    let zs = Term::seq([Term::from(1), Term::from(2), Term::from(3)]);

    println!("append(Xs, Ys, [1, 2, 3]):");
    let splits = run_all(append(xs.clone(), ys.clone(), zs), &[("Xs", xs), ("Ys", ys)])
        .expect("no type errors here");
    for split in &splits {
        println!("  {}", render(split));
    }

    println!("between(1, 5, X), first solution only:");
    let x = Term::var(Some("X"));
    if let Some(first) = run_one(between(Term::from(1), Term::from(5), x.clone()), &[("X", x)]) {
        println!("  {}", render(&first.expect("no type errors here")));
    }
}

fn render(snapshot: &Snapshot) -> String {
    snapshot
        .iter()
        .map(|(name, value)| format!("{name} = {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
