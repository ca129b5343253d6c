//! In-memory [`ShapeHost`] used by tests, benchmarks and the demo binaries.
//!
//! Regions are analytic shapes (rectangles, ellipses, polygons). Templates are plain
//! sizes. Drawn shapes carry an outline that can be turned into a region or walked as
//! a path, and open paths are polylines. Every instantiated copy is tracked until
//! deleted, and each trait call is counted so callers can assert on host traffic.
use std::collections::BTreeMap;

use glam::Vec2;
use mint::Vector2;

use crate::error::HostError;
use crate::fill::Template;
use crate::host::{Bounds, HostResult, SelectedShape, ShapeHost};

/// Vertices used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 64;

/// Closed boundary shape owned by a [`MemoryHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
    Rect(Bounds),
    Ellipse { center: Vec2, radii: Vec2 },
    /// Simple polygon, vertices in order. Containment uses the even-odd rule.
    Polygon(Vec<Vec2>),
}

impl RegionShape {
    pub fn bounds(&self) -> Bounds {
        match self {
            RegionShape::Rect(b) => *b,
            RegionShape::Ellipse { center, radii } => {
                Bounds::from_center_size(*center, *radii * 2.0)
            }
            RegionShape::Polygon(points) if points.is_empty() => Bounds::new(0.0, 0.0, 0.0, 0.0),
            RegionShape::Polygon(points) => {
                let (min, max) = points.iter().fold(
                    (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
                    |(min, max), p| (min.min(*p), max.max(*p)),
                );
                Bounds::new(min.x, max.x, max.y, min.y)
            }
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            RegionShape::Rect(b) => b.contains(p),
            RegionShape::Ellipse { center, radii } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return false;
                }
                let d = (p - *center) / *radii;
                d.length_squared() <= 1.0
            }
            RegionShape::Polygon(points) => polygon_contains(points, p),
        }
    }

    /// Closed outline as a vertex loop, counter-clockwise for rectangles and ellipses.
    /// The first vertex is not repeated at the end.
    pub fn outline(&self) -> Vec<Vec2> {
        match self {
            RegionShape::Rect(b) => vec![
                Vec2::new(b.left_x, b.bottom_y),
                Vec2::new(b.right_x, b.bottom_y),
                Vec2::new(b.right_x, b.top_y),
                Vec2::new(b.left_x, b.top_y),
            ],
            RegionShape::Ellipse { center, radii } => (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let a = i as f32 * std::f32::consts::TAU / ELLIPSE_SEGMENTS as f32;
                    *center + Vec2::new(a.cos(), a.sin()) * *radii
                })
                .collect(),
            RegionShape::Polygon(points) => points.clone(),
        }
    }

    /// Regular star with `spikes` outer points, centered at `center`.
    pub fn star(center: Vec2, outer_radius: f32, inner_radius: f32, spikes: usize) -> Self {
        let n = spikes.max(2) * 2;
        let points = (0..n)
            .map(|i| {
                let r = if i % 2 == 0 {
                    outer_radius
                } else {
                    inner_radius
                };
                let a = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::TAU / n as f32;
                center + Vec2::new(a.cos(), a.sin()) * r
            })
            .collect();
        RegionShape::Polygon(points)
    }
}

fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Piecewise linear path measured by arc length.
#[derive(Debug, Clone, PartialEq)]
struct Polyline {
    points: Vec<Vec2>,
}

impl Polyline {
    fn open(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    fn closed(mut points: Vec<Vec2>) -> Self {
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Self { points }
    }

    fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Segment holding arc length `distance` and the offset into it. A distance on a
    /// vertex belongs to the following segment; past the end it clamps to the last one.
    fn locate(&self, distance: f32) -> Option<(Vec2, Vec2, f32)> {
        let mut remaining = distance.max(0.0);
        let mut last = None;
        for w in self.points.windows(2) {
            let len = w[0].distance(w[1]);
            if len <= 0.0 {
                continue;
            }
            if remaining < len {
                return Some((w[0], w[1], remaining));
            }
            remaining -= len;
            last = Some((w[0], w[1], len));
        }
        last
    }

    fn point_at(&self, distance: f32) -> Option<Vec2> {
        match self.locate(distance) {
            Some((a, b, t)) => Some(a + (b - a).normalize() * t),
            None => self.points.first().copied(),
        }
    }

    fn tangent_at(&self, distance: f32) -> Option<Vec2> {
        self.locate(distance).map(|(a, b, _)| (b - a).normalize())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

/// A live copy created through [`ShapeHost::instantiate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub source: ShapeId,
    pub center: Vec2,
    pub rotation_deg: f32,
    pub size: Vec2,
}

/// Number of calls received per [`ShapeHost`] method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCallCounts {
    pub bounding_box: usize,
    pub is_point_inside: usize,
    pub instantiate: usize,
    pub delete: usize,
    pub begin_group: usize,
    pub end_group: usize,
    pub set_fast_mode: usize,
    pub refresh: usize,
    pub region_of: usize,
    pub curve_queries: usize,
}

impl HostCallCounts {
    pub fn total(&self) -> usize {
        self.bounding_box
            + self.is_point_inside
            + self.instantiate
            + self.delete
            + self.begin_group
            + self.end_group
            + self.set_fast_mode
            + self.refresh
            + self.region_of
            + self.curve_queries
    }
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    regions: Vec<RegionShape>,
    templates: BTreeMap<ShapeId, Vec2>,
    outlines: BTreeMap<ShapeId, RegionShape>,
    paths: BTreeMap<ShapeId, Polyline>,
    instances: BTreeMap<ShapeId, Instance>,
    next_shape: u64,
    open_groups: Vec<String>,
    closed_groups: Vec<String>,
    fast_mode: bool,
    failing_instantiations: usize,
    calls: HostCallCounts,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, shape: RegionShape) -> RegionId {
        self.regions.push(shape);
        RegionId(self.regions.len() - 1)
    }

    pub fn region(&self, id: RegionId) -> Option<&RegionShape> {
        self.regions.get(id.0)
    }

    /// Register a template shape of the given size and return its footprint.
    pub fn add_template(&mut self, width: f32, height: f32) -> Template<ShapeId> {
        let id = self.allocate_id();
        self.templates.insert(id, Vec2::new(width, height));
        Template::new(id, width, height)
    }

    /// Register a drawn shape with a closed outline. It can be copied like a template,
    /// converted to a region with [`ShapeHost::region_of`], and walked as a closed path.
    pub fn add_shape(&mut self, outline: RegionShape) -> ShapeId {
        let id = self.allocate_id();
        let b = outline.bounds();
        self.templates.insert(id, Vec2::new(b.width(), b.height()));
        self.paths.insert(id, Polyline::closed(outline.outline()));
        self.outlines.insert(id, outline);
        id
    }

    /// Register an open path through `points`.
    pub fn add_path(&mut self, points: Vec<Vec2>) -> ShapeId {
        let id = self.allocate_id();
        self.paths.insert(id, Polyline::open(points));
        id
    }

    /// The shape as it would appear in a user selection, sized by its footprint.
    pub fn select(&self, id: ShapeId) -> Option<SelectedShape<ShapeId>> {
        self.source_size(id)
            .map(|size| SelectedShape::new(id, size.x, size.y))
    }

    /// Make the next `n` calls to `instantiate` fail.
    pub fn fail_next_instantiations(&mut self, n: usize) {
        self.failing_instantiations = n;
    }

    pub fn instance(&self, id: ShapeId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    pub fn instances(&self) -> impl Iterator<Item = (&ShapeId, &Instance)> {
        self.instances.iter()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn calls(&self) -> HostCallCounts {
        self.calls
    }

    pub fn reset_calls(&mut self) {
        self.calls = HostCallCounts::default();
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn is_group_open(&self) -> bool {
        !self.open_groups.is_empty()
    }

    /// Names of undo groups that were opened and closed, in closing order.
    pub fn closed_groups(&self) -> &[String] {
        &self.closed_groups
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        id
    }

    fn path(&self, id: &ShapeId) -> HostResult<&Polyline> {
        self.paths
            .get(id)
            .ok_or_else(|| HostError::new(format!("shape {} is not a path", id.0)))
    }

    fn source_size(&self, id: ShapeId) -> Option<Vec2> {
        self.templates
            .get(&id)
            .copied()
            .or_else(|| self.instances.get(&id).map(|inst| inst.size))
    }
}

impl ShapeHost for MemoryHost {
    type Region = RegionId;
    type Shape = ShapeId;

    fn bounding_box(&mut self, region: &RegionId) -> HostResult<Bounds> {
        self.calls.bounding_box += 1;
        self.regions
            .get(region.0)
            .map(RegionShape::bounds)
            .ok_or_else(|| HostError::new(format!("unknown region {}", region.0)))
    }

    fn is_point_inside(&mut self, region: &RegionId, point: Vector2<f32>) -> bool {
        self.calls.is_point_inside += 1;
        self.regions
            .get(region.0)
            .is_some_and(|shape| shape.contains(Vec2::from(point)))
    }

    fn instantiate(
        &mut self,
        template: &ShapeId,
        center: Vector2<f32>,
        rotation_deg: f32,
    ) -> HostResult<ShapeId> {
        self.calls.instantiate += 1;
        if self.failing_instantiations > 0 {
            self.failing_instantiations -= 1;
            return Err(HostError::new("instantiation refused"));
        }
        let size = self
            .source_size(*template)
            .ok_or_else(|| HostError::new(format!("unknown shape {}", template.0)))?;
        let id = self.allocate_id();
        self.instances.insert(
            id,
            Instance {
                source: *template,
                center: Vec2::from(center),
                rotation_deg,
                size,
            },
        );
        Ok(id)
    }

    fn delete(&mut self, shape: &ShapeId) -> HostResult<()> {
        self.calls.delete += 1;
        self.instances
            .remove(shape)
            .map(|_| ())
            .ok_or_else(|| HostError::new(format!("shape {} is not a live copy", shape.0)))
    }

    fn begin_group(&mut self, name: &str) -> HostResult<()> {
        self.calls.begin_group += 1;
        self.open_groups.push(name.to_owned());
        Ok(())
    }

    fn end_group(&mut self) -> HostResult<()> {
        self.calls.end_group += 1;
        let name = self
            .open_groups
            .pop()
            .ok_or_else(|| HostError::new("no undo group is open"))?;
        self.closed_groups.push(name);
        Ok(())
    }

    fn set_fast_mode(&mut self, enabled: bool) -> HostResult<()> {
        self.calls.set_fast_mode += 1;
        self.fast_mode = enabled;
        Ok(())
    }

    fn refresh(&mut self) -> HostResult<()> {
        self.calls.refresh += 1;
        Ok(())
    }

    fn region_of(&mut self, shape: &ShapeId) -> HostResult<RegionId> {
        self.calls.region_of += 1;
        let outline = self
            .outlines
            .get(shape)
            .cloned()
            .ok_or_else(|| HostError::new(format!("shape {} has no closed outline", shape.0)))?;
        Ok(self.add_region(outline))
    }

    fn curve_length(&mut self, path: &ShapeId) -> HostResult<f32> {
        self.calls.curve_queries += 1;
        Ok(self.path(path)?.length())
    }

    fn point_at(&mut self, path: &ShapeId, distance: f32) -> HostResult<Vector2<f32>> {
        self.calls.curve_queries += 1;
        self.path(path)?
            .point_at(distance)
            .map(Into::into)
            .ok_or_else(|| HostError::new(format!("path {} has no points", path.0)))
    }

    fn tangent_at(&mut self, path: &ShapeId, distance: f32) -> HostResult<Vector2<f32>> {
        self.calls.curve_queries += 1;
        self.path(path)?
            .tangent_at(distance)
            .map(Into::into)
            .ok_or_else(|| HostError::new(format!("path {} has zero length", path.0)))
    }
}
