use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use smart_fill::prelude::{Bounds, MemoryHost, RegionId, RegionShape, ShapeId, Template};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Host with a square region, an ellipse and a star, plus `template_count` templates.
#[allow(dead_code)]
pub fn bench_host(template_count: usize) -> (MemoryHost, Vec<RegionId>, Vec<Template<ShapeId>>) {
    let mut host = MemoryHost::new();
    let regions = vec![
        host.add_region(RegionShape::Rect(Bounds::new(0.0, 1000.0, 1000.0, 0.0))),
        host.add_region(RegionShape::Ellipse {
            center: Vec2::splat(500.0),
            radii: Vec2::new(500.0, 300.0),
        }),
        host.add_region(RegionShape::star(Vec2::splat(500.0), 500.0, 200.0, 5)),
    ];
    let templates = (0..template_count)
        .map(|i| {
            let s = 10.0 + i as f32 * 4.0;
            host.add_template(s, s * 0.75)
        })
        .collect();
    (host, regions, templates)
}
