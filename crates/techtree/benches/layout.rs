use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use techtree::{LayoutEngine, LayoutOptions, Node};

/// `levels` tiers below a root; every node depends on one or two nodes of the tier above.
fn tiered_tree(levels: usize, width: usize) -> Vec<Node> {
    let mut nodes = vec![Node::new("root", "root")];
    let mut previous = vec!["root".to_string()];
    for level in 0..levels {
        let mut tier = Vec::with_capacity(width);
        for i in 0..width {
            let id = format!("l{level}n{i}");
            let mut deps = vec![previous[i % previous.len()].clone()];
            if i % 3 == 0 && previous.len() > 1 {
                deps.push(previous[(i + 1) % previous.len()].clone());
            }
            nodes.push(Node::new(id.clone(), id.clone()).with_dependencies(deps));
            tier.push(id);
        }
        previous = tier;
    }
    // Reverse so most nodes have to wait for a later pass.
    nodes.reverse();
    nodes
}

fn bench_layout(c: &mut Criterion) {
    let engine = LayoutEngine::new(LayoutOptions::default().with_max_fan_out(64));
    let mut group = c.benchmark_group("layout");
    for levels in [4usize, 8, 16] {
        let nodes = tiered_tree(levels, 6);
        assert!(engine.layout(&nodes).is_ok());
        group.bench_with_input(BenchmarkId::from_parameter(levels), &nodes, |b, nodes| {
            b.iter(|| engine.layout(black_box(nodes)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
