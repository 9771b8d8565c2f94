use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use forest_distance::{IndexedTree, LevenshteinCost, Selkow, TreeNode, ZhangShasha};
use itertools::Itertools;

fn tree(leaves: Vec<TreeNode<String>>, r: usize, depth: usize) -> TreeNode<String> {
    let label = format!("n{depth}");
    if leaves.len() < r {
        TreeNode::with_children(label, leaves)
    } else {
        let chunks = (leaves.len() + r - 1) / r;
        let children: Vec<_> = leaves
            .into_iter()
            .chunks(chunks)
            .into_iter()
            .map(|c| tree(c.collect(), r, depth + 1))
            .collect();
        TreeNode::with_children(label, children)
    }
}

fn leaves(n: usize, offset: usize) -> Vec<TreeNode<String>> {
    (0..n).map(|i| TreeNode::new(format!("{}", i + offset))).collect()
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("n-tree distance");
    for r in [4, 8, 16] {
        let a = IndexedTree::new(&tree(leaves(100, 0), r, 0));
        let b = IndexedTree::new(&tree(leaves(100, 7), r, 0));

        group.bench_with_input(BenchmarkId::new("selkow", r), &(&a, &b), |bench, &(a, b)| {
            bench.iter(|| Selkow::new(a, b, LevenshteinCost::default()).cost())
        });

        group.bench_with_input(
            BenchmarkId::new("zhang-shasha", r),
            &(&a, &b),
            |bench, &(a, b)| bench.iter(|| ZhangShasha::new(a, b).distance()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
