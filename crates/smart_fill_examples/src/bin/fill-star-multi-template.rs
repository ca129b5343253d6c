use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut host = MemoryHost::new();
    let region = host.add_region(RegionShape::star(Vec2::new(200.0, 200.0), 200.0, 90.0, 5));

    // Three element sizes, cycled round-robin on every successful placement.
    let templates = vec![
        host.add_template(14.0, 6.0),
        host.add_template(9.0, 9.0),
        host.add_template(4.0, 12.0),
    ];

    let config = FillConfig::new(5000)
        .with_spacing_fraction(0.2)
        .with_rotation(RotationPolicy::QuarterTurns);

    let mut session = FillSession::new(host);
    let mut rng = StdRng::seed_from_u64(7);
    let report = session.fill(&region, &templates, &config, &mut rng)?;
    let stats = session.statistics(&region)?;

    println!(
        "placed {} | outside {} | overlap {} | boundary {} | coverage {:.1}%",
        report.placed,
        report.rejected_outside,
        report.rejected_overlap,
        report.rejected_boundary,
        stats.coverage_percent
    );

    let rc = RenderConfig::new((800, 800)).with_element_colors(vec![
        [230, 57, 70],
        [241, 250, 238],
        [69, 123, 157],
    ]);
    let placed = session.placed();
    render_fill_to_png(session.host(), region, &placed, &rc, "fill-star-multi-template.png")?;

    Ok(())
}
