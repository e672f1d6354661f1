use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use namedq::{BindStyle, args, bind, compile, project};

/// Build a template with `n` named parameters:
/// SELECT col0, col1, ... FROM t WHERE col0 = :p0 AND col1 = :p1 ...
fn build_template(n: usize) -> String {
    let mut sql = String::from("SELECT ");
    for i in 0..n {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&format!("col{i}"));
    }
    sql.push_str(" FROM t WHERE ");
    for i in 0..n {
        if i > 0 {
            sql.push_str(" AND ");
        }
        sql.push_str(&format!("col{i} = :p{i}"));
    }
    sql
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("named/compile");

    for n in [1, 5, 10, 50, 100] {
        let template = build_template(n);
        for style in [BindStyle::Question, BindStyle::Dollar, BindStyle::Named] {
            group.bench_with_input(
                BenchmarkId::new(style.as_str(), n),
                &template,
                |b, template| {
                    b.iter(|| black_box(compile(template, style).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn bench_bind_and_project(c: &mut Criterion) {
    let compiled = compile(
        "insert into records (content,ttl,prio,type,domain_id,disabled,name,ordername,auth) \
         values (:content,:ttl,:priority,:qtype,:domain_id,:disabled,:qname,:ordername,:auth)",
        BindStyle::Dollar,
    )
    .unwrap();

    c.bench_function("args/bind_and_project", |b| {
        b.iter(|| {
            let bound = bind(args![
                "content", "192.0.2.1",
                "ttl", 300,
                "priority", 0,
                "qtype", "A",
                "domain_id", 1,
                "disabled", false,
                "qname", "www.example.com",
                "ordername", "www",
                "auth", true,
            ])
            .unwrap();
            black_box(project(compiled.names(), &bound))
        });
    });
}

criterion_group!(benches, bench_compile, bench_bind_and_project);
criterion_main!(benches);
