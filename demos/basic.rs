use condrule::{evaluate, parse, Context};

fn main() {
    let ast = parse("age > 30 AND department = 'Sales'").expect("failed to parse rule");

    println!("{ast}");
    print!("{}", ast.outline());

    // Evaluate against a context
    let ctx = Context::new()
        .set("age", 35_i64)
        .set("department", "Sales");

    println!("Result: {}", evaluate(&ast, &ctx));
}
