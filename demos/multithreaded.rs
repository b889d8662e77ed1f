use std::sync::Arc;
use std::thread;

use condrule::{parse, Context};

fn main() {
    let ast = Arc::new(
        parse("age >= 18 AND status = 'active'").expect("failed to parse rule"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ast = Arc::clone(&ast);
            thread::spawn(move || {
                let ctx = Context::new()
                    .set("age", 16_i64 + i64::from(i))
                    .set("status", "active");

                let result = condrule::evaluate(&ast, &ctx);
                println!("Thread {i}: {result}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
