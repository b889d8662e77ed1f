use std::sync::Arc;
use std::thread;

use condrule::{combine, parse, Ast, Context};

#[test]
fn evaluate_across_threads() {
    let ast = Arc::new(
        parse("(age >= 18 AND status = 'active') OR role = 'admin'").unwrap(),
    );

    let cases = vec![
        // adult, active
        (Context::new().set("age", 25_i64).set("status", "active"), true),
        // minor, active
        (Context::new().set("age", 15_i64).set("status", "active"), false),
        // adult, inactive
        (Context::new().set("age", 40_i64).set("status", "inactive"), false),
        // admin overrides everything
        (Context::new().set("role", "admin"), true),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(ctx, expected)| {
            let ast = Arc::clone(&ast);
            thread::spawn(move || (condrule::evaluate(&ast, &ctx), expected))
        })
        .collect();

    for h in handles {
        let (got, expected) = h.join().unwrap();
        assert_eq!(got, expected);
    }
}

#[test]
fn parse_and_combine_on_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let rules = [format!("x > {i}"), format!("y < {i} OR z = {i}")];
                combine(&rules).unwrap()
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        let ast: Ast = h.join().unwrap();
        assert_eq!(ast.to_string(), format!("(x > {i} OR (y < {i} OR z = {i}))"));
    }
}

#[test]
fn shared_ast_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Ast>();
    assert_send_sync::<Context>();
    assert_send_sync::<condrule::RuleEngine>();
}
