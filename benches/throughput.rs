use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use condrule::{parse, Ast, Context};

fn build_shared_rule() -> (Arc<Ast>, Arc<Context>) {
    let n = 20;
    let mut ctx = Context::new();
    let mut conditions = Vec::with_capacity(n);

    for i in 0..n {
        conditions.push(format!("f{i} >= 1"));
        ctx = ctx.set(&format!("f{i}"), 10_i64);
    }

    let ast = parse(&conditions.join(" AND ")).unwrap();
    (Arc::new(ast), Arc::new(ctx))
}

fn bench_throughput(c: &mut Criterion) {
    let thread_counts = [1, 2, 4, 8];

    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(5));

    for &threads in &thread_counts {
        let (ast, ctx) = build_shared_rule();

        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter_custom(|iters| {
                let per_thread = iters / threads as u64;
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let ast = Arc::clone(&ast);
                        let ctx = Arc::clone(&ctx);
                        thread::spawn(move || {
                            let start = Instant::now();
                            for _ in 0..per_thread {
                                let _ = condrule::evaluate(&ast, &ctx);
                            }
                            start.elapsed()
                        })
                    })
                    .collect();

                let mut max_elapsed = Duration::ZERO;
                for h in handles {
                    let elapsed = h.join().unwrap();
                    if elapsed > max_elapsed {
                        max_elapsed = elapsed;
                    }
                }
                max_elapsed
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
