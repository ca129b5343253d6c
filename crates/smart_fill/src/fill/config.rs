//! Fill configurations and rotation policy.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::fill::cancel::CancelToken;
use crate::sampling;

pub const DEFAULT_ATTEMPT_BUDGET: usize = 500;
pub const DEFAULT_GROUP_NAME: &str = "Smart Fill Container";
pub const DEFAULT_PATH_GROUP_NAME: &str = "Path Fill";

const QUARTER_TURNS: [f32; 4] = [0.0, 90.0, 180.0, 270.0];

/// How placed copies are rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationPolicy {
    /// Always 0 degrees.
    Fixed,
    /// One of 0, 90, 180 or 270 degrees, uniformly.
    #[default]
    QuarterTurns,
    /// Any angle in [0, 360), uniformly.
    Free,
}

impl RotationPolicy {
    /// Map the `allow_rotation` / `smart_rotation` flag pair onto a policy.
    pub fn from_flags(allow_rotation: bool, smart_rotation: bool) -> Self {
        match (allow_rotation, smart_rotation) {
            (false, _) => RotationPolicy::Fixed,
            (true, true) => RotationPolicy::QuarterTurns,
            (true, false) => RotationPolicy::Free,
        }
    }

    pub fn allows_rotation(self) -> bool {
        !matches!(self, RotationPolicy::Fixed)
    }

    /// Draw a rotation in degrees. `Fixed` consumes no randomness.
    pub fn sample(self, rng: &mut dyn RngCore) -> f32 {
        match self {
            RotationPolicy::Fixed => 0.0,
            RotationPolicy::QuarterTurns => {
                QUARTER_TURNS[sampling::index(rng, QUARTER_TURNS.len())]
            }
            RotationPolicy::Free => sampling::rand01(rng) * 360.0,
        }
    }
}

/// Configuration for one fill.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillConfig {
    /// Maximum number of sampling attempts. Successful placements are capped at the same value.
    pub attempt_budget: usize,
    /// Extra gap between footprints as a fraction of the average template size.
    /// Negative values allow controlled overlap.
    pub spacing_fraction: f32,
    /// Rotation applied to each copy.
    pub rotation: RotationPolicy,
    /// Reject candidates whose footprint collides with an earlier placement.
    pub prevent_overlap: bool,
    /// Name of the undo group wrapping the fill in the host.
    pub group_name: String,
    /// Optional flag checked once per attempt.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel: Option<CancelToken>,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            spacing_fraction: 0.0,
            rotation: RotationPolicy::default(),
            prevent_overlap: true,
            group_name: DEFAULT_GROUP_NAME.to_owned(),
            cancel: None,
        }
    }
}

impl FillConfig {
    /// Creates a new [`FillConfig`] with the given attempt budget and defaults otherwise.
    pub fn new(attempt_budget: usize) -> Self {
        Self {
            attempt_budget,
            ..Default::default()
        }
    }

    /// Sets the attempt budget.
    pub fn with_attempt_budget(mut self, attempt_budget: usize) -> Self {
        self.attempt_budget = attempt_budget;
        self
    }

    /// Sets the spacing fraction.
    pub fn with_spacing_fraction(mut self, spacing_fraction: f32) -> Self {
        self.spacing_fraction = spacing_fraction;
        self
    }

    /// Sets the rotation policy.
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the rotation policy from the `allow_rotation` / `smart_rotation` flags.
    pub fn with_rotation_flags(self, allow_rotation: bool, smart_rotation: bool) -> Self {
        self.with_rotation(RotationPolicy::from_flags(allow_rotation, smart_rotation))
    }

    /// Enables or disables the collision check against earlier placements.
    pub fn with_prevent_overlap(mut self, prevent_overlap: bool) -> Self {
        self.prevent_overlap = prevent_overlap;
        self
    }

    /// Sets the undo group name.
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.spacing_fraction.is_finite() {
            return Err(Error::InvalidInput(format!(
                "spacing_fraction must be finite, got {}",
                self.spacing_fraction
            )));
        }
        Ok(())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Configuration for placing copies along a path.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathFillConfig {
    /// Gap between consecutive copies in document units, added to the template width.
    /// Negative values overlap neighbours.
    pub spacing: f32,
    /// Extra rotation in degrees on top of the path direction.
    pub angle_offset_deg: f32,
    pub group_name: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel: Option<CancelToken>,
}

impl Default for PathFillConfig {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            angle_offset_deg: 0.0,
            group_name: DEFAULT_PATH_GROUP_NAME.to_owned(),
            cancel: None,
        }
    }
}

impl PathFillConfig {
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing,
            ..Default::default()
        }
    }

    pub fn with_angle_offset(mut self, angle_offset_deg: f32) -> Self {
        self.angle_offset_deg = angle_offset_deg;
        self
    }

    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.spacing.is_finite() || !self.angle_offset_deg.is_finite() {
            return Err(Error::InvalidInput(format!(
                "path spacing and angle offset must be finite, got {} and {}",
                self.spacing, self.angle_offset_deg
            )));
        }
        Ok(())
    }

    /// Distance between consecutive copies of a template `width` wide.
    pub(crate) fn step(&self, width: f32) -> Result<f32> {
        let step = width + self.spacing;
        if step > 0.0 {
            Ok(step)
        } else {
            Err(Error::InvalidInput(format!(
                "path step must be > 0, got {step} (width {width} + spacing {})",
                self.spacing
            )))
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
