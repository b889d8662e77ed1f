use condrule::{evaluate_detailed, parse, Context};

fn main() {
    let ast = parse(
        "((age > 30 AND department = 'Marketing')) AND (salary > 20000 OR experience > 5)",
    )
    .expect("failed to parse rule");

    let ctx = Context::new()
        .set("age", 42_i64)
        .set("department", "Marketing")
        .set("salary", 18000_i64)
        .set("experience", 9_i64);

    let report = evaluate_detailed(&ast, &ctx);

    println!("{report}");
    println!();
    println!("Conditions that held: {:?}", report.satisfied());
    println!("Duration: {:?}", report.duration());
}
