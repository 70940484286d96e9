use criterion::{Criterion, criterion_group, criterion_main};
use rangesim::{
    Iso3, Mesh, Obstacle, Point3, RangeSensor, SensorConfig, Vector3, WorkingDistance,
};
use std::hint::black_box;

fn obstacles() -> Vec<Obstacle> {
    (0..8)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::FRAC_PI_4;
            let pose = Iso3::translation(angle.cos() * 6.0, 0.0, angle.sin() * 6.0);
            Obstacle::new(Mesh::create_box(1.0, 3.0, 2.0), pose)
        })
        .collect()
}

fn scan_benchmark(c: &mut Criterion) {
    let wd = WorkingDistance::new(1.0, 15.0).unwrap();
    let targets = obstacles();

    let config = SensorConfig::lidar_2d(Point3::origin(), -Vector3::z(), wd, 360.0, 1.0);
    let sensor = RangeSensor::new(config).unwrap();
    c.bench_function("scan 360 rays x 8 boxes", |b| {
        b.iter(|| black_box(&sensor).scan(black_box(&targets)))
    });

    let config = SensorConfig::lidar_2d(Point3::origin(), -Vector3::z(), wd, 276.0, 1.0);
    c.bench_function("generate 276 ray fan", |b| {
        b.iter(|| black_box(&config).fan())
    });
}

criterion_group!(benches, scan_benchmark);
criterion_main!(benches);
