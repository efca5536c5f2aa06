use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
    Throughput,
};
use serde_json::{json, Value};

use json_arena::{BuildOptions, EmitOptions, SizeMode};

fn make_uniform_repos(count: usize) -> Value {
    let repos: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("repo-{i}"),
                "full_name": format!("org/repo-{i}"),
                "private": i % 10 == 0,
                "language": match i % 5 {
                    0 => Value::from("Rust"),
                    1 => Value::from("Go"),
                    2 => Value::from("TypeScript"),
                    _ => Value::Null,
                },
                "stars": i * 13,
                "score": i as f64 / 7.0,
                "topics": [format!("topic-{}", i % 10), format!("topic-{}", (i + 3) % 10)],
                "owner": {"id": i % 100, "login": format!("user-{}", i % 100)},
            })
        })
        .collect();
    Value::Array(repos)
}

fn make_tree(depth: usize, width: usize, seed: u64) -> Value {
    let children: Vec<Value> = if depth > 0 {
        (0..width)
            .map(|i| make_tree(depth - 1, width, seed * 31 + i as u64))
            .collect()
    } else {
        Vec::new()
    };
    json!({
        "name": format!("node-{seed}"),
        "value": seed as i64 - 500,
        "flags": [format!("f{}", seed % 5), format!("f{}", (seed + 2) % 5)],
        "children": children,
    })
}

fn bench_build(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, json_text: &str) {
    group.throughput(Throughput::Bytes(json_text.len() as u64));
    group.bench_function(BenchmarkId::new("dedupe", name), |b| {
        b.iter(|| {
            let built = json_arena::build_from_str(black_box(json_text)).unwrap();
            black_box(built);
        });
    });

    let copy_strings = BuildOptions::new().with_dedupe_strings(false);
    group.bench_function(BenchmarkId::new("no_dedupe", name), |b| {
        b.iter(|| {
            let built =
                json_arena::build_from_str_with_options(black_box(json_text), &copy_strings)
                    .unwrap();
            black_box(built);
        });
    });

    group.bench_function(BenchmarkId::new("serde_json_value", name), |b| {
        b.iter(|| {
            let value: Value = serde_json::from_str(black_box(json_text)).unwrap();
            black_box(value);
        });
    });
}

fn bench_emit(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, json_text: &str) {
    let built = json_arena::build_from_str(json_text).unwrap();
    let document = built.document();

    for mode in [SizeMode::Standard, SizeMode::Large] {
        let options = EmitOptions::new(name).with_mode(mode);
        let len = json_arena::emit(&document, &options).unwrap().len();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(BenchmarkId::new(format!("{mode:?}").to_lowercase(), name), |b| {
            b.iter(|| {
                let source = json_arena::emit(black_box(&document), &options).unwrap();
                black_box(source);
            });
        });
    }
}

fn bench_navigate(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, json_text: &str) {
    let built = json_arena::build_from_str(json_text).unwrap();
    let document = built.document();
    let value: Value = serde_json::from_str(json_text).unwrap();

    group.bench_function(BenchmarkId::new("arena", name), |b| {
        b.iter(|| {
            let total: i64 = document
                .root()
                .as_array()
                .unwrap()
                .iter()
                .filter_map(|repo| repo.get("stars").and_then(|stars| stars.as_i64().ok()))
                .sum();
            black_box(total);
        });
    });

    group.bench_function(BenchmarkId::new("serde_json_value", name), |b| {
        b.iter(|| {
            let total: i64 = value
                .as_array()
                .unwrap()
                .iter()
                .filter_map(|repo| repo.get("stars").and_then(Value::as_i64))
                .sum();
            black_box(total);
        });
    });
}

fn quick_run(json_text: &str, name: &str) {
    let built = json_arena::build_from_str(black_box(json_text)).unwrap();
    let source = json_arena::emit(&built.document(), &EmitOptions::new(name)).unwrap();
    black_box(source);
}

fn criterion_config() -> Criterion {
    if std::env::var("ARENA_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(1)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let repos_json = serde_json::to_string(&make_uniform_repos(2000)).unwrap();
    let tree_json = serde_json::to_string(&make_tree(5, 3, 1)).unwrap();

    if std::env::var("ARENA_BENCH_QUICK").is_ok() {
        quick_run(&repos_json, "uniform_repos");
        quick_run(&tree_json, "deep_tree");
        return;
    }

    let mut build = c.benchmark_group("build");
    bench_build(&mut build, "uniform_repos", &repos_json);
    bench_build(&mut build, "deep_tree", &tree_json);
    build.finish();

    let mut emit = c.benchmark_group("emit");
    bench_emit(&mut emit, "uniform_repos", &repos_json);
    bench_emit(&mut emit, "deep_tree", &tree_json);
    emit.finish();

    let mut navigate = c.benchmark_group("navigate");
    bench_navigate(&mut navigate, "uniform_repos", &repos_json);
    navigate.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
