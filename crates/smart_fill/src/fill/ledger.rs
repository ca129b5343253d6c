//! Ordered record of the copies placed during one fill session.
use glam::Vec2;
use tracing::debug;

use crate::host::ShapeHost;

/// A copy committed by the placement loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement<S> {
    /// Center position in document coordinates.
    pub position: Vec2,
    /// Rotation in degrees, in [0, 360).
    pub rotation_deg: f32,
    /// Footprint of the template at instantiation time.
    pub size: Vec2,
    /// Host handle of the instantiated copy.
    pub shape: S,
}

impl<S> PlacedElement<S> {
    /// Axis-aligned footprint test against a candidate, rotation ignored.
    ///
    /// Two footprints collide iff `|dx| < (w1 + w2) / 2 + margin` and
    /// `|dy| < (h1 + h2) / 2 + margin`.
    #[inline]
    pub fn collides_with(&self, position: Vec2, size: Vec2, margin: f32) -> bool {
        footprints_collide(self.position, self.size, position, size, margin)
    }
}

#[inline]
pub fn footprints_collide(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2, margin: f32) -> bool {
    let d = (a_pos - b_pos).abs();
    let min = (a_size + b_size) * 0.5 + Vec2::splat(margin);
    d.x < min.x && d.y < min.y
}

/// Outcome of [`Ledger::remove_last`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Records dropped from the ledger.
    pub removed: usize,
    /// Host deletions that failed; the records were dropped anyway.
    pub delete_failures: usize,
}

#[derive(Debug, Clone)]
pub struct Ledger<S> {
    elements: Vec<PlacedElement<S>>,
}

impl<S> Default for Ledger<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Ledger<S> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn append(&mut self, element: PlacedElement<S>) {
        self.elements.push(element);
    }

    /// Drop every record. Host-side copies are left alone.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Remove the `n` most recent records, newest first, deleting each copy in the host.
    ///
    /// Deletion failures are swallowed; the record is dropped regardless.
    pub fn remove_last<H>(&mut self, n: usize, host: &mut H) -> RemovalSummary
    where
        H: ShapeHost<Shape = S> + ?Sized,
    {
        let mut summary = RemovalSummary::default();
        for _ in 0..n {
            let Some(element) = self.elements.pop() else {
                break;
            };
            if let Err(e) = host.delete(&element.shape) {
                debug!("Ignoring failed delete of placed copy: {}.", e);
                summary.delete_failures += 1;
            }
            summary.removed += 1;
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedElement<S>> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[PlacedElement<S>] {
        &self.elements
    }

    /// True if the candidate footprint collides with any record.
    pub fn any_collision(&self, position: Vec2, size: Vec2, margin: f32) -> bool {
        self.elements
            .iter()
            .any(|e| e.collides_with(position, size, margin))
    }

    /// Sum of footprint areas, overlaps counted twice.
    pub fn footprint_area(&self) -> f32 {
        self.elements.iter().map(|e| e.size.x * e.size.y).sum()
    }
}

impl<S: Clone> Ledger<S> {
    /// Owned copy of all records in insertion order.
    pub fn snapshot(&self) -> Vec<PlacedElement<S>> {
        self.elements.clone()
    }
}

impl<'a, S> IntoIterator for &'a Ledger<S> {
    type Item = &'a PlacedElement<S>;
    type IntoIter = std::slice::Iter<'a, PlacedElement<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
