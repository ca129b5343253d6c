use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A user selected a badge outline and two decorations, in no particular order.
    let mut host = MemoryHost::new();
    let badge = host.add_shape(RegionShape::star(Vec2::new(120.0, 120.0), 120.0, 60.0, 6));
    let flower = host.add_template(8.0, 8.0);
    let petal = host.add_template(3.0, 6.0);

    let selected = [flower.shape, badge, petal.shape]
        .into_iter()
        .map(|id| {
            host.select(id)
                .ok_or_else(|| anyhow::anyhow!("shape {id:?} is not in the document"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let selection = Selection::split(selected)?;
    anyhow::ensure!(
        selection.container == badge,
        "largest shape should be the container"
    );

    // Fill the container's own outline.
    let region = host.region_of(&selection.container)?;
    let mut session = FillSession::new(host);
    let mut rng = StdRng::seed_from_u64(5);
    let config = FillConfig::new(1500).with_spacing_fraction(0.2);
    let report = session.fill(&region, &selection.templates, &config, &mut rng)?;
    let stats = session.statistics(&region)?;
    println!(
        "{} templates | placed {} | coverage {:.1}%",
        selection.templates.len(),
        report.placed,
        stats.coverage_percent
    );

    let placed = session.placed();
    let host = session.into_host();
    render_fill_to_png(
        &host,
        region,
        &placed,
        &RenderConfig::new((600, 600)),
        "selection-split.png",
    )?;

    Ok(())
}
