use criterion::{black_box, criterion_group, criterion_main, Criterion};
use condrule::{combine, evaluate, evaluate_detailed, parse, Context};

/// Build a rule with `n` conditions (each comparing a unique attribute)
/// joined by alternating AND/OR, plus a context that satisfies all of them.
fn build_rule(n: usize) -> (String, Context) {
    let mut rule = String::new();
    let mut ctx = Context::new();

    for i in 0..n {
        if i > 0 {
            rule.push_str(if i % 2 == 0 { " OR " } else { " AND " });
        }
        rule.push_str(&format!("f{i} >= 1"));
        ctx = ctx.set(&format!("f{i}"), 10_i64);
    }
    (rule, ctx)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for &n in &[5, 20, 50] {
        let (rule, _) = build_rule(n);
        group.bench_function(&format!("{n}_conditions"), |b| {
            b.iter(|| parse(black_box(&rule)).unwrap());
        });

        let nested = format!("({})", rule.replace(" OR ", ") OR ("));
        group.bench_function(&format!("{n}_conditions_grouped"), |b| {
            b.iter(|| parse(black_box(&nested)).unwrap());
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_eval");

    for &n in &[5, 20, 50] {
        let (rule, ctx) = build_rule(n);
        let ast = parse(&rule).unwrap();

        group.bench_function(&format!("{n}_conditions"), |b| {
            b.iter(|| evaluate(black_box(&ast), black_box(&ctx)));
        });
        group.bench_function(&format!("{n}_conditions_detailed"), |b| {
            b.iter(|| evaluate_detailed(black_box(&ast), black_box(&ctx)));
        });
    }

    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for &n in &[5, 20, 50] {
        let rules: Vec<String> = (0..n)
            .map(|i| format!("(a{i} > {i} AND b{i} = 'x') OR c{i} < {i}"))
            .collect();

        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| combine(black_box(&rules)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_combine);
criterion_main!(benches);
