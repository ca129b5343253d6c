use glam::Vec2;
use smart_fill::prelude::*;
use smart_fill_examples::{init_tracing, render_fill_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut host = MemoryHost::new();
    let frame = host.add_shape(RegionShape::Ellipse {
        center: Vec2::new(150.0, 100.0),
        radii: Vec2::new(140.0, 90.0),
    });
    let arrow = host.add_template(14.0, 6.0);

    // Copies sit on the outline, each turned to follow it.
    let config = PathFillConfig::new(4.0).with_angle_offset(0.0);
    let mut session = FillSession::new(host);
    let mut sink = VecSink::new();
    let report = session.fill_along_path_with_events(&frame, &arrow, &config, &mut sink)?;
    println!(
        "placed {} copies along the outline ({} host failures, {} events)",
        report.placed,
        report.host_failures,
        sink.len()
    );

    let region = session.host_mut().region_of(&frame)?;
    let placed = session.placed();
    render_fill_to_png(
        session.host(),
        region,
        &placed,
        &RenderConfig::new((900, 600)).with_element_colors(vec![[200, 90, 60], [60, 90, 200]]),
        "fill-along-path.png",
    )?;

    Ok(())
}
