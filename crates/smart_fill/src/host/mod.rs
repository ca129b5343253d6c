//! Boundary to the application that owns the actual geometry.
//!
//! The fill engine never touches shape geometry itself. Bounding boxes, containment
//! queries, instantiation and deletion of copies, and undo bracketing all go through
//! [`ShapeHost`]. Points cross the boundary as [`mint::Vector2`] so hosts do not need
//! to depend on `glam`.
use glam::Vec2;
use mint::Vector2;

use crate::error::HostError;

pub mod memory;
pub mod selection;

pub use memory::{HostCallCounts, Instance, MemoryHost, RegionId, RegionShape, ShapeId};
pub use selection::{SelectedShape, Selection};

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Axis-aligned bounding box in host document coordinates.
///
/// The vertical axis points up: `top_y` is the larger of the two y values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left_x: f32,
    pub right_x: f32,
    pub top_y: f32,
    pub bottom_y: f32,
}

impl Bounds {
    pub fn new(left_x: f32, right_x: f32, top_y: f32, bottom_y: f32) -> Self {
        Self {
            left_x,
            right_x,
            top_y,
            bottom_y,
        }
    }

    /// Bounds of a box with the given center and full size.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            left_x: center.x - half.x,
            right_x: center.x + half.x,
            top_y: center.y + half.y,
            bottom_y: center.y - half.y,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right_x - self.left_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.top_y - self.bottom_y
    }

    /// Area of the box, zero for inverted or empty boxes.
    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left_x + self.right_x) * 0.5,
            (self.bottom_y + self.top_y) * 0.5,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left_x && p.x <= self.right_x && p.y >= self.bottom_y && p.y <= self.top_y
    }
}

/// Capabilities the fill engine needs from the application owning the document.
///
/// Calls are made from a single thread and never overlap; `&mut self` on every
/// method makes that single-writer discipline explicit. Hosts shared between
/// threads should be wrapped in a mutex by the caller.
pub trait ShapeHost {
    /// Handle to a closed boundary shape.
    type Region;
    /// Handle to a template or an instantiated copy.
    type Shape: Clone;

    /// Bounding box of `region`. Fails if the handle is invalid.
    fn bounding_box(&mut self, region: &Self::Region) -> HostResult<Bounds>;

    /// Point-in-region test. Implementations must answer `false` when the
    /// query itself fails.
    fn is_point_inside(&mut self, region: &Self::Region, point: Vector2<f32>) -> bool;

    /// Create a copy of `template` centered at `center` and rotated by
    /// `rotation_deg` degrees about its center.
    fn instantiate(
        &mut self,
        template: &Self::Shape,
        center: Vector2<f32>,
        rotation_deg: f32,
    ) -> HostResult<Self::Shape>;

    /// Delete a previously instantiated copy.
    fn delete(&mut self, shape: &Self::Shape) -> HostResult<()>;

    /// Open an undo group; everything up to [`ShapeHost::end_group`] undoes as one step.
    fn begin_group(&mut self, name: &str) -> HostResult<()>;

    fn end_group(&mut self) -> HostResult<()>;

    /// Advisory hint to suspend redraws while many shapes are created.
    fn set_fast_mode(&mut self, enabled: bool) -> HostResult<()>;

    /// Ask the host to redraw. Defaults to doing nothing.
    fn refresh(&mut self) -> HostResult<()> {
        Ok(())
    }

    /// Region bounded by the outline of a drawn shape, e.g. a selected container
    /// converted to curves. Hosts without that capability report an error.
    fn region_of(&mut self, _shape: &Self::Shape) -> HostResult<Self::Region> {
        Err(HostError::new("host cannot convert shapes to regions"))
    }

    /// Arc length of the outline of `path`.
    fn curve_length(&mut self, _path: &Self::Shape) -> HostResult<f32> {
        Err(HostError::new("host does not support path queries"))
    }

    /// Point at arc length `distance` along `path`, clamped to the path ends.
    fn point_at(&mut self, _path: &Self::Shape, _distance: f32) -> HostResult<Vector2<f32>> {
        Err(HostError::new("host does not support path queries"))
    }

    /// Direction of travel at arc length `distance` along `path`.
    fn tangent_at(&mut self, _path: &Self::Shape, _distance: f32) -> HostResult<Vector2<f32>> {
        Err(HostError::new("host does not support path queries"))
    }
}

impl<H: ShapeHost + ?Sized> ShapeHost for &mut H {
    type Region = H::Region;
    type Shape = H::Shape;

    fn bounding_box(&mut self, region: &Self::Region) -> HostResult<Bounds> {
        (**self).bounding_box(region)
    }

    fn is_point_inside(&mut self, region: &Self::Region, point: Vector2<f32>) -> bool {
        (**self).is_point_inside(region, point)
    }

    fn instantiate(
        &mut self,
        template: &Self::Shape,
        center: Vector2<f32>,
        rotation_deg: f32,
    ) -> HostResult<Self::Shape> {
        (**self).instantiate(template, center, rotation_deg)
    }

    fn delete(&mut self, shape: &Self::Shape) -> HostResult<()> {
        (**self).delete(shape)
    }

    fn begin_group(&mut self, name: &str) -> HostResult<()> {
        (**self).begin_group(name)
    }

    fn end_group(&mut self) -> HostResult<()> {
        (**self).end_group()
    }

    fn set_fast_mode(&mut self, enabled: bool) -> HostResult<()> {
        (**self).set_fast_mode(enabled)
    }

    fn refresh(&mut self) -> HostResult<()> {
        (**self).refresh()
    }

    fn region_of(&mut self, shape: &Self::Shape) -> HostResult<Self::Region> {
        (**self).region_of(shape)
    }

    fn curve_length(&mut self, path: &Self::Shape) -> HostResult<f32> {
        (**self).curve_length(path)
    }

    fn point_at(&mut self, path: &Self::Shape, distance: f32) -> HostResult<Vector2<f32>> {
        (**self).point_at(path, distance)
    }

    fn tangent_at(&mut self, path: &Self::Shape, distance: f32) -> HostResult<Vector2<f32>> {
        (**self).tangent_at(path, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_dimensions_follow_y_up_convention() {
        let b = Bounds::new(0.0, 100.0, 50.0, 10.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 40.0);
        assert_eq!(b.area(), 4000.0);
        assert_eq!(b.center(), Vec2::new(50.0, 30.0));
    }

    #[test]
    fn inverted_bounds_have_zero_area() {
        let b = Bounds::new(10.0, 0.0, 10.0, 0.0);
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn from_center_size_round_trips_center() {
        let b = Bounds::from_center_size(Vec2::new(5.0, -5.0), Vec2::new(4.0, 2.0));
        assert_eq!(b, Bounds::new(3.0, 7.0, -4.0, -6.0));
        assert!(b.contains(Vec2::new(5.0, -5.0)));
        assert!(b.contains(Vec2::new(3.0, -6.0)));
        assert!(!b.contains(Vec2::new(2.9, -5.0)));
    }
}
