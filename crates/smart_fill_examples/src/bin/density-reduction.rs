use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut host = MemoryHost::new();
    let region = host.add_region(RegionShape::Rect(Bounds::new(0.0, 300.0, 200.0, 0.0)));
    let dot = host.add_template(6.0, 6.0);

    let mut session = FillSession::new(host);
    let mut rng = StdRng::seed_from_u64(99);
    session.fill(&region, &[dot], &FillConfig::new(2000), &mut rng)?;

    let rc = RenderConfig::new((900, 600));
    let before = session.statistics(&region)?;
    let placed = session.placed();
    render_fill_to_png(session.host(), region, &placed, &rc, "density-before.png")?;

    // Keep 40% of the copies; the most recent ones are deleted from the host.
    let summary = session.reduce_to_percent(40.0)?;
    let after = session.statistics(&region)?;
    let placed = session.placed();
    render_fill_to_png(session.host(), region, &placed, &rc, "density-after.png")?;

    println!(
        "{} -> {} copies ({} removed) | coverage {:.1}% -> {:.1}%",
        before.count, after.count, summary.removed, before.coverage_percent, after.coverage_percent
    );

    Ok(())
}
