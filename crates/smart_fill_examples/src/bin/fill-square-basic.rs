use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 100x100 square container and a single 20x20 element.
    let mut host = MemoryHost::new();
    let region = host.add_region(RegionShape::Rect(Bounds::new(0.0, 100.0, 100.0, 0.0)));
    let tile = host.add_template(20.0, 20.0);

    // 10% of the element size between neighbours, no rotation.
    let config = FillConfig::new(1000)
        .with_spacing_fraction(0.1)
        .with_rotation(RotationPolicy::Fixed);

    let mut session = FillSession::new(host);
    let mut rng = StdRng::seed_from_u64(2025);
    let report = session.fill(&region, &[tile], &config, &mut rng)?;
    let stats = session.statistics(&region)?;

    println!(
        "placed {} in {} attempts | coverage {:.1}%",
        report.placed, report.attempts, stats.coverage_percent
    );

    let placed = session.placed();
    render_fill_to_png(
        session.host(),
        region,
        &placed,
        &RenderConfig::new((800, 800)),
        "fill-square-basic.png",
    )?;

    Ok(())
}
