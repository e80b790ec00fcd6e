//! Model compilation benchmarks.
//!
//! Measures compiling wide objects, deep nesting and cyclic graphs under both
//! cycle policies, plus serialization of the produced model.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tymo_compiler::arena::{TypeArena, TypeId};
use tymo_compiler::{CompilerOptions, CyclePolicy, TypeModelCompiler, classify};

/// An object with `width` properties cycling through a few value shapes.
fn wide_object(arena: &mut TypeArena, width: usize) -> TypeId {
    let list = arena.array(TypeId::STRING);
    let pair = arena.tuple(vec![TypeId::NUMBER, TypeId::BOOLEAN]);
    let maybe = arena.union(vec![TypeId::STRING, TypeId::UNDEFINED]);
    let values = [TypeId::STRING, TypeId::NUMBER, list, pair, maybe];

    let props = (0..width)
        .map(|i| {
            let name = format!("field{i}");
            let value = values[i % values.len()];
            if i % 3 == 0 {
                arena.optional_property(&name, value)
            } else {
                arena.property(&name, value)
            }
        })
        .collect();
    arena.object_with_index(props, Some(TypeId::UNKNOWN), None)
}

/// `depth` objects each holding the next one in a `child` property.
fn deep_object(arena: &mut TypeArena, depth: usize) -> TypeId {
    let mut ty = TypeId::STRING;
    for _ in 0..depth {
        let child = arena.property("child", ty);
        ty = arena.object(vec![child]);
    }
    ty
}

/// `type Tree = { label: string; children: Tree[]; parent?: Tree }`
fn cyclic_tree(arena: &mut TypeArena) -> TypeId {
    let tree = arena.reserve();
    let label = arena.property("label", TypeId::STRING);
    let children = arena.array(tree);
    let children = arena.property("children", children);
    let parent = arena.optional_property("parent", tree);
    let shape = arena.object(vec![label, children, parent]);
    arena.define(tree, shape);
    tree
}

fn bench_wide_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_object");
    for width in [10, 100, 1_000] {
        let mut arena = TypeArena::new();
        let ty = wide_object(&mut arena, width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &ty, |b, ty| {
            b.iter(|| black_box(classify(&arena, ty)))
        });
    }
    group.finish();
}

fn bench_deep_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_object");
    for depth in [10, 100, 400] {
        let mut arena = TypeArena::new();
        let ty = deep_object(&mut arena, depth);
        for policy in [CyclePolicy::Detect, CyclePolicy::Trust] {
            let id = BenchmarkId::new(format!("{policy:?}"), depth);
            group.bench_with_input(id, &ty, |b, ty| {
                b.iter(|| {
                    let options = CompilerOptions::default().with_cycle_policy(policy);
                    black_box(TypeModelCompiler::with_options(&arena, options).compile(ty))
                })
            });
        }
    }
    group.finish();
}

fn bench_cyclic_graph(c: &mut Criterion) {
    let mut arena = TypeArena::new();
    let tree = cyclic_tree(&mut arena);
    c.bench_function("cyclic_tree", |b| {
        b.iter(|| black_box(classify(&arena, &tree)))
    });
}

fn bench_serialization(c: &mut Criterion) {
    let mut arena = TypeArena::new();
    let ty = wide_object(&mut arena, 1_000);
    let model = classify(&arena, &ty);
    c.bench_function("to_json_string/1000", |b| {
        b.iter(|| black_box(model.to_json_string()))
    });
}

criterion_group!(
    compile_benches,
    bench_wide_objects,
    bench_deep_objects,
    bench_cyclic_graph,
    bench_serialization
);
criterion_main!(compile_benches);
