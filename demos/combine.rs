use condrule::{combine, evaluate, Context, OperatorCounting, RuleEngine};

fn main() {
    let rules = [
        "(age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')",
        "salary > 50000 OR experience > 5",
        "tenure > 2",
    ];

    let combined = combine(rules).expect("failed to combine rules");
    println!("Combined: {combined}");
    print!("{}", combined.outline());

    let ctx = Context::new()
        .set("age", 35_i64)
        .set("department", "Sales")
        .set("salary", 60000_i64)
        .set("tenure", 4_i64);
    println!("Result: {}", evaluate(&combined, &ctx));

    // Count only operators that survived parsing.
    let engine = RuleEngine::builder()
        .operator_counting(OperatorCounting::Parsed)
        .build();
    let parsed = engine
        .combine(["tag = 'OR' AND x > 1", "note = 'OR OR'"])
        .expect("failed to combine rules");
    println!("Parsed counting: {parsed}");
}
