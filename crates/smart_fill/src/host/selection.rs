//! Splitting a user selection into a container and the templates to scatter inside it.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::fill::Template;

/// One selected shape together with its size in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedShape<S> {
    pub shape: S,
    pub size: Vec2,
}

impl<S> SelectedShape<S> {
    pub fn new(shape: S, width: f32, height: f32) -> Self {
        Self {
            shape,
            size: Vec2::new(width, height),
        }
    }

    fn area(&self) -> f32 {
        self.size.x * self.size.y
    }
}

/// A selection split into the container (largest shape) and the fill templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<S> {
    pub container: S,
    pub templates: Vec<Template<S>>,
}

impl<S> Selection<S> {
    /// Pick the largest-area shape as the container; everything else becomes a template,
    /// in selection order. On equal areas the earlier shape wins.
    pub fn split(mut shapes: Vec<SelectedShape<S>>) -> Result<Self> {
        if shapes.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "select at least 2 shapes (a container and a fill element), got {}",
                shapes.len()
            )));
        }

        let mut container_idx = 0;
        let mut largest = 0.0f32;
        for (i, s) in shapes.iter().enumerate() {
            if s.area() > largest {
                largest = s.area();
                container_idx = i;
            }
        }
        if largest <= 0.0 {
            return Err(Error::InvalidInput(
                "no selected shape has a positive area".into(),
            ));
        }

        let container = shapes.remove(container_idx).shape;
        let templates = shapes
            .into_iter()
            .map(|s| Template::new(s.shape, s.size.x, s.size.y))
            .collect();
        Ok(Self {
            container,
            templates,
        })
    }
}
