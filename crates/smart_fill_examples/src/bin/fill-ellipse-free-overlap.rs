use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut host = MemoryHost::new();
    let region = host.add_region(RegionShape::Ellipse {
        center: Vec2::new(150.0, 100.0),
        radii: Vec2::new(150.0, 100.0),
    });
    let leaf = host.add_template(16.0, 8.0);

    // Negative spacing lets footprints overlap by up to 30% of the element size.
    let config = FillConfig::new(3000)
        .with_spacing_fraction(-0.3)
        .with_rotation(RotationPolicy::Free);

    let mut session = FillSession::new(host);
    let mut rng = StdRng::seed_from_u64(42);
    let mut sink = VecSink::new().without(FillEventKind::AttemptRejected);
    let report = session.fill_with_events(&region, &[leaf], &config, &mut rng, &mut sink)?;

    println!(
        "placed {} of {} attempts, {} events recorded",
        report.placed,
        report.attempts,
        sink.len()
    );

    let placed = session.placed();
    render_fill_to_png(
        session.host(),
        region,
        &placed,
        &RenderConfig::new((900, 600)).with_element_colors(vec![[120, 200, 120], [80, 160, 90]]),
        "fill-ellipse-free-overlap.png",
    )?;

    Ok(())
}
