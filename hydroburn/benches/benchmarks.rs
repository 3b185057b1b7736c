use criterion::{criterion_group, criterion_main, Criterion};
use hydroburn::{
    dem::{GeoTransform, RasterGrid},
    geo::{coord, line_string},
    pipeline, Config, Horseshoe, LineBurner, Point3, SamplingConfig, Segment3,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// 2000x2000 grid of 0.5m pixels with a gentle slope to the east.
fn dtm() -> RasterGrid {
    let gt = GeoTransform::from_gdal([500_000.0, 0.5, 0.0, 6_200_000.0, 0.0, -0.5]).unwrap();
    let (width, height) = (2000, 2000);
    let samples = (0..height)
        .flat_map(|_row| (0..width).map(|col| 50.0 + col as f32 * 0.01))
        .collect();
    RasterGrid::new(gt, (width, height), Some(-9999.0), samples).unwrap()
}

fn horseshoe_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Horseshoe");
    let grid = dtm();
    let hs = Horseshoe::new(
        coord! { x: 500_100.0, y: 6_199_500.0 },
        coord! { x: 500_100.0, y: 6_199_520.0 },
        coord! { x: 500_160.0, y: 6_199_520.0 },
        coord! { x: 500_160.0, y: 6_199_500.0 },
    );
    let config = SamplingConfig::default();

    group.bench_with_input("render", &(hs, config), |b, (hs, config)| {
        b.iter(|| hs.render(&grid, config).unwrap())
    });
}

fn line_burn(c: &mut Criterion) {
    let mut group = c.benchmark_group("Burn");
    let mut grid = dtm();
    let diagonal = Segment3::new(
        Point3::new(500_010.3, 6_199_990.1, 55.0),
        Point3::new(500_980.7, 6_199_020.9, 45.0),
    );
    let burner = LineBurner::default();

    group.bench_function("diagonal", |b| {
        b.iter(|| burner.burn(&diagonal, &mut grid).unwrap())
    });
}

fn adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adjust");
    group.sample_size(10);
    let grid = dtm();
    let lines: Vec<_> = (0..50)
        .map(|i| {
            let y = 6_199_990.0 - 19.0 * f64::from(i);
            line_string![(x: 500_010.0, y: y), (x: 500_990.0, y: y - 5.0)]
        })
        .collect();
    let horseshoes: Vec<_> = (0..20)
        .map(|i| {
            let x = 500_050.0 + 45.0 * f64::from(i);
            Horseshoe::new(
                coord! { x: x, y: 6_199_300.0 },
                coord! { x: x, y: 6_199_315.0 },
                coord! { x: x + 30.0, y: 6_199_315.0 },
                coord! { x: x + 30.0, y: 6_199_300.0 },
            )
        })
        .collect();
    let config = Config::default();

    group.bench_function("tile", |b| {
        b.iter(|| pipeline::adjust(&grid, &lines, &horseshoes, &config).unwrap())
    });
}

criterion_group!(benches, horseshoe_render, line_burn, adjust);
criterion_main!(benches);
