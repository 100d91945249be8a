use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use medvox_volume::{Direction, VolumeSize};
use medvox_voxproc::filter::gaussian_smooth;

fn bench_gaussian_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Smooth 3D");

    for (width, height, depth) in [(64, 64, 32), (128, 128, 64), (256, 256, 128)].iter() {
        for sigma in [0.5f32, 1.0, 2.5].iter() {
            let size = VolumeSize {
                width: *width,
                height: *height,
                depth: *depth,
            };
            group.throughput(criterion::Throughput::Elements(size.num_voxels() as u64));

            let parameter_string = format!("{}x{}x{}_s{}", width, height, depth, sigma);
            let data: Vec<f32> = (0..size.num_voxels())
                .map(|i| ((i * 13 + 5) % 97) as f32)
                .collect();

            group.bench_with_input(
                BenchmarkId::new("gaussian_smooth_f32", &parameter_string),
                &data,
                |b, d| {
                    let mut volume = d.clone();
                    b.iter(|| {
                        black_box(gaussian_smooth(
                            &mut volume,
                            size,
                            &[Direction::X, Direction::Y, Direction::Z],
                            &[*sigma, *sigma, *sigma],
                        ))
                    })
                },
            );

            let bytes: Vec<u8> = (0..size.num_voxels()).map(|i| (i % 251) as u8).collect();
            group.bench_with_input(
                BenchmarkId::new("gaussian_smooth_u8", &parameter_string),
                &bytes,
                |b, d| {
                    let mut volume = d.clone();
                    b.iter(|| {
                        black_box(gaussian_smooth(
                            &mut volume,
                            size,
                            &[Direction::X, Direction::Y, Direction::Z],
                            &[*sigma, *sigma, *sigma],
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_gaussian_smooth);
criterion_main!(benches);
