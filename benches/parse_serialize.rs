use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsontree::{parse, serialize, Node};

fn build_document(records: usize) -> String {
    let mut root = Node::array();
    for idx in 0..records {
        let mut record = Node::object();
        record.add_pair("id", Node::Int(idx as i64)).unwrap();
        record
            .add_pair("name", Node::from(format!("user \"{idx}\" caf\u{e9}")))
            .unwrap();
        record.add_pair("score", Node::Float(idx as f64 * 0.25)).unwrap();
        record.add_pair("active", Node::Bool(idx % 3 == 0)).unwrap();
        let mut tags = Node::array();
        for tag in ["a", "b/c", "\u{4f60}\u{597d}"] {
            tags.push(Node::from(tag)).unwrap();
        }
        record.add_pair("tags", tags).unwrap();
        root.push(record).unwrap();
    }
    serialize(&root).unwrap()
}

fn bench_parse_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_serialize");
    group.measurement_time(Duration::from_secs(5));

    for records in [10usize, 100, 1_000] {
        let text = build_document(records);
        let tree = parse(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", records), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("serialize", records), &tree, |b, tree| {
            b.iter(|| serialize(black_box(tree)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("copy", records), &tree, |b, tree| {
            b.iter(|| jsontree::copy_tree(black_box(tree)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_serialize);
criterion_main!(benches);
