use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use xsteg_core::{AvailabilityMap, NoProgress};

const KEY: &str = "&S>A*1110+0.344&0>A*1000+0.5&1>A*0100+0.5&2>A*0010+0.5";

fn gradient_image(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, (x + y) as u8, 255])
    })
}

pub fn apply_thresholds(c: &mut Criterion) {
    let image = gradient_image(1024, 768);
    let thresholds = AvailabilityMap::parse_key(KEY).expect("Benchmark key is invalid");

    let mut group = c.benchmark_group("Apply Thresholds");
    for workers in [1, 4] {
        let id = BenchmarkId::from_parameter(workers);
        group.bench_with_input(id, &workers, |b, &workers| {
            b.iter(|| {
                let mut map = AvailabilityMap::new(1024 * 768);
                map.add_thresholds(thresholds.iter().copied());
                map.apply(image.as_raw(), workers, &NoProgress)
                    .expect("Cannot apply thresholds");
                map.available_capacity_bits()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, apply_thresholds);
criterion_main!(benches);
