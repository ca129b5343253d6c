//! Scatter-fill pipeline: configuration, ledger of placed copies, the placement loop,
//! coverage statistics and density reduction.
use glam::Vec2;

pub mod cancel;
pub mod config;
pub mod coverage;
pub mod events;
pub mod ledger;
pub mod session;

/// A source shape to scatter, characterized for collision purposes by its size only.
#[derive(Debug, Clone, PartialEq)]
pub struct Template<S> {
    /// Host handle of the source shape.
    pub shape: S,
    /// Footprint (width, height) in document units.
    pub size: Vec2,
}

impl<S> Template<S> {
    pub fn new(shape: S, width: f32, height: f32) -> Self {
        Self {
            shape,
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    fn has_valid_size(&self) -> bool {
        self.size.x.is_finite() && self.size.y.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }
}

/// Average template size, or an error if the list is empty or any footprint is degenerate.
pub(crate) fn average_size<S>(templates: &[Template<S>]) -> crate::error::Result<Vec2> {
    if templates.is_empty() {
        return Err(crate::error::Error::InvalidInput(
            "at least one template is required".into(),
        ));
    }
    if let Some((i, t)) = templates
        .iter()
        .enumerate()
        .find(|(_, t)| !t.has_valid_size())
    {
        return Err(crate::error::Error::InvalidInput(format!(
            "template {i} has invalid size {}x{}",
            t.size.x, t.size.y
        )));
    }
    let total: Vec2 = templates.iter().map(|t| t.size).sum();
    Ok(total / templates.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn average_size_over_all_templates() {
        let templates = vec![Template::new((), 10.0, 20.0), Template::new((), 30.0, 40.0)];
        assert_eq!(average_size(&templates).unwrap(), Vec2::new(20.0, 30.0));
    }

    #[test]
    fn empty_or_degenerate_templates_are_rejected() {
        let none: Vec<Template<()>> = Vec::new();
        assert!(matches!(average_size(&none), Err(Error::InvalidInput(_))));

        let flat = vec![Template::new((), 10.0, 0.0)];
        assert!(matches!(average_size(&flat), Err(Error::InvalidInput(_))));

        let nan = vec![Template::new((), f32::NAN, 1.0)];
        assert!(matches!(average_size(&nan), Err(Error::InvalidInput(_))));
    }
}
