//! PNG rendering of a filled region for the demo binaries.
use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use smart_fill::prelude::{Bounds, MemoryHost, PlacedElement, RegionId, ShapeId};
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub region_color: [u8; 3],
    /// Colors cycled by ledger index.
    pub element_colors: Vec<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [26, 26, 26],
            region_color: [52, 58, 64],
            element_colors: vec![[235, 235, 235]],
        }
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_region_color(mut self, color: [u8; 3]) -> Self {
        self.region_color = color;
        self
    }

    pub fn with_element_colors(mut self, colors: Vec<[u8; 3]>) -> Self {
        if !colors.is_empty() {
            self.element_colors = colors;
        }
        self
    }
}

/// Maps document coordinates (y up) to pixel coordinates (y down).
struct Viewport {
    bounds: Bounds,
    scale: f32,
}

impl Viewport {
    fn new(bounds: Bounds, image_size: (u32, u32)) -> Self {
        let sx = image_size.0 as f32 / bounds.width().max(f32::EPSILON);
        let sy = image_size.1 as f32 / bounds.height().max(f32::EPSILON);
        Self {
            bounds,
            scale: sx.min(sy),
        }
    }

    fn to_doc(&self, px: u32, py: u32) -> Vec2 {
        Vec2::new(
            self.bounds.left_x + (px as f32 + 0.5) / self.scale,
            self.bounds.top_y - (py as f32 + 0.5) / self.scale,
        )
    }

    fn to_px(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.bounds.left_x) * self.scale,
            (self.bounds.top_y - p.y) * self.scale,
        )
    }
}

/// Draw the region and every placed copy as a rotated rectangle, then save to `path`.
pub fn render_fill_to_png(
    host: &MemoryHost,
    region: RegionId,
    placed: &[PlacedElement<ShapeId>],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let shape = host
        .region(region)
        .ok_or_else(|| anyhow::anyhow!("unknown region {region:?}"))?;
    let (w, h) = config.image_size;
    let view = Viewport::new(shape.bounds(), config.image_size);

    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    for py in 0..h {
        for px in 0..w {
            if shape.contains(view.to_doc(px, py)) {
                img.put_pixel(px, py, Rgb(config.region_color));
            }
        }
    }

    for (i, element) in placed.iter().enumerate() {
        let color = config.element_colors[i % config.element_colors.len()];
        draw_rotated_rect(&mut img, &view, element, Rgb(color));
    }

    img.save(path.as_ref())?;
    tracing::info!("Wrote {}.", path.as_ref().display());
    Ok(())
}

fn draw_rotated_rect(
    img: &mut RgbImage,
    view: &Viewport,
    element: &PlacedElement<ShapeId>,
    color: Rgb<u8>,
) {
    let half = element.size * 0.5;
    let (sin, cos) = element.rotation_deg.to_radians().sin_cos();
    let reach = half.length() * view.scale;
    let c = view.to_px(element.position);

    let x0 = (c.x - reach).floor().max(0.0) as u32;
    let y0 = (c.y - reach).floor().max(0.0) as u32;
    let x1 = ((c.x + reach).ceil().max(0.0) as u32).min(img.width());
    let y1 = ((c.y + reach).ceil().max(0.0) as u32).min(img.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let d = view.to_doc(px, py) - element.position;
            // Undo the copy's counter-clockwise rotation.
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
            if local.x.abs() <= half.x && local.y.abs() <= half.y {
                img.put_pixel(px, py, color);
            }
        }
    }
}
