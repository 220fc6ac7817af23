use std::hint::black_box;
use std::time::Instant;

use marionette_common::{Axis, NullScene};
use marionette_kernel::{Figure, FigureParams, SegmentId};

fn bench_build(iterations: usize) {
    let mut scene = NullScene::new();
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(Figure::build(FigureParams::default(), &mut scene));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  build ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_rotate(id: SegmentId, iterations: usize) {
    let mut scene = NullScene::new();
    let Ok(mut figure) = Figure::build(FigureParams::default(), &mut scene) else {
        println!("  rotate {id}: figure build failed");
        return;
    };

    let start = Instant::now();
    for i in 0..iterations {
        let angle = if i % 2 == 0 { 0.1 } else { -0.1 };
        let _ = figure.rotate_segment(black_box(id), black_box(angle), Axis::X, &mut scene);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  rotate {id} ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_walk(iterations: usize) {
    let mut scene = NullScene::new();
    let Ok(mut figure) = Figure::build(FigureParams::default(), &mut scene) else {
        println!("  walk: figure build failed");
        return;
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = figure.rotate_torso(black_box(0.01), &mut scene);
        let _ = figure.move_torso(black_box(0.1), &mut scene);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  turn+move ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Pose Update Benchmarks ===\n");

    println!("Build:");
    bench_build(10_000);

    println!("\nRotate (leaf vs. root subtree):");
    bench_rotate(SegmentId::LeftForearm, 100_000);
    bench_rotate(SegmentId::LeftArm, 100_000);
    bench_rotate(SegmentId::Torso, 100_000);

    println!("\nWalk:");
    bench_walk(100_000);

    println!("\n=== Done ===");
}
