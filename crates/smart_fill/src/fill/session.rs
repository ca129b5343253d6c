//! The placement loop and the operations on a fill session's ledger.
//!
//! A [`FillSession`] owns the shape host connection and the [`Ledger`] of copies placed
//! by its most recent fill. Each attempt of [`FillSession::fill`]:
//!
//! 1. draws a center uniformly from the region's bounding box shrunk by half the
//!    larger average template dimension,
//! 2. asks the host whether the center is inside the region,
//! 3. draws a rotation and takes the next template in round-robin order,
//! 4. optionally rejects the candidate if its footprint collides with a placed copy,
//! 5. probes 8 points around the center at the template's half extent,
//! 6. asks the host to instantiate the copy and records it.
//!
//! Failed host instantiations count as rejected attempts. The template cycle only
//! advances on success.
//!
//! [`FillSession::fill_along_path`] places copies of one template at fixed arc-length
//! steps along a host path instead, rotated to the path direction. Both record into
//! the same ledger, so statistics and density reduction apply to either.
use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fill::config::{FillConfig, PathFillConfig};
use crate::fill::coverage::{coverage_percent, FillStatistics};
use crate::fill::events::{EventSink, FillEvent, FillEventKind, RejectReason};
use crate::fill::ledger::{Ledger, PlacedElement, RemovalSummary};
use crate::fill::{average_size, Template};
use crate::host::{Bounds, ShapeHost};
use crate::sampling;

/// Number of points probed around a candidate to keep copies inside the region.
pub const BOUNDARY_PROBES: usize = 8;

/// Outcome of one call to [`FillSession::fill`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Copies placed and recorded.
    pub placed: usize,
    /// Sampling attempts made.
    pub attempts: usize,
    /// Attempts whose center fell outside the region.
    pub rejected_outside: usize,
    /// Attempts rejected by the spacing check.
    pub rejected_overlap: usize,
    /// Attempts rejected by the boundary probes.
    pub rejected_boundary: usize,
    /// Attempts where the host failed to instantiate the copy.
    pub host_failures: usize,
    /// The loop stopped early because the cancel token was set.
    pub cancelled: bool,
}

impl FillReport {
    /// Total rejected attempts.
    pub fn rejected(&self) -> usize {
        self.rejected_outside + self.rejected_overlap + self.rejected_boundary + self.host_failures
    }

    fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Outside => self.rejected_outside += 1,
            RejectReason::Overlap => self.rejected_overlap += 1,
            RejectReason::Boundary => self.rejected_boundary += 1,
            RejectReason::HostFailure => self.host_failures += 1,
        }
    }
}

/// Values derived once per fill from the templates, config and region bounds.
struct Sampler {
    x_range: (f32, f32),
    y_range: (f32, f32),
    spacing: f32,
}

impl Sampler {
    fn new(bounds: &Bounds, avg_size: Vec2, spacing_fraction: f32) -> Result<Self> {
        let edge_margin = avg_size.max_element() * 0.5;
        let required = 2.0 * edge_margin;
        let (w, h) = (bounds.width(), bounds.height());
        if !(w >= required && h >= required) {
            return Err(Error::RegionTooSmall {
                width: w,
                height: h,
                required,
            });
        }
        Ok(Self {
            x_range: (bounds.left_x + edge_margin, bounds.right_x - edge_margin),
            y_range: (bounds.bottom_y + edge_margin, bounds.top_y - edge_margin),
            spacing: spacing_fraction * (avg_size.x + avg_size.y) * 0.5,
        })
    }

    fn sample_center(&self, rng: &mut dyn RngCore) -> Vec2 {
        let x = sampling::uniform(rng, self.x_range.0, self.x_range.1);
        let y = sampling::uniform(rng, self.y_range.0, self.y_range.1);
        Vec2::new(x, y)
    }
}

/// Probe offsets at 0, 45, ..., 315 degrees around a center.
fn probe_points(center: Vec2, radius: f32) -> impl Iterator<Item = Vec2> {
    (0..BOUNDARY_PROBES).map(move |i| {
        let a = (i as f32 * 360.0 / BOUNDARY_PROBES as f32).to_radians();
        center + Vec2::new(a.cos(), a.sin()) * radius
    })
}

/// A fill session: one host connection plus the ledger of the copies it placed.
pub struct FillSession<H: ShapeHost> {
    host: H,
    ledger: Ledger<H::Shape>,
}

impl<H: ShapeHost> FillSession<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            ledger: Ledger::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn ledger(&self) -> &Ledger<H::Shape> {
        &self.ledger
    }

    /// Owned copy of the placed records in placement order.
    pub fn placed(&self) -> Vec<PlacedElement<H::Shape>> {
        self.ledger.snapshot()
    }

    /// Forget all placed records. Copies already created in the host stay there.
    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Scatter copies of `templates` inside `region` and return what happened.
    ///
    /// Once the inputs are validated and the region is large enough, the ledger is
    /// cleared and then holds exactly the copies placed by this call. A zero attempt
    /// budget or an early error leaves the previous records untouched.
    pub fn fill<R: RngCore>(
        &mut self,
        region: &H::Region,
        templates: &[Template<H::Shape>],
        config: &FillConfig,
        rng: &mut R,
    ) -> Result<FillReport> {
        self.fill_internal(region, templates, config, rng, &mut ())
    }

    pub fn fill_with_events<R: RngCore>(
        &mut self,
        region: &H::Region,
        templates: &[Template<H::Shape>],
        config: &FillConfig,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<FillReport> {
        self.fill_internal(region, templates, config, rng, sink)
    }

    fn fill_internal(
        &mut self,
        region: &H::Region,
        templates: &[Template<H::Shape>],
        config: &FillConfig,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<FillReport> {
        config.validate()?;
        let avg_size = average_size(templates)?;

        let mut report = FillReport::default();
        let budget = config.attempt_budget;
        if budget == 0 {
            debug!("Attempt budget is zero; nothing to place.");
            return Ok(report);
        }

        let bounds = self.host.bounding_box(region)?;
        let sampler = Sampler::new(&bounds, avg_size, config.spacing_fraction)?;
        self.ledger.clear();

        info!(
            "Filling {}x{} region with {} template(s) | attempts: {} | spacing: {:.3} | rotation: {:?}.",
            bounds.width(),
            bounds.height(),
            templates.len(),
            budget,
            sampler.spacing,
            config.rotation,
        );
        if sink.wants(FillEventKind::FillStarted) {
            sink.send(FillEvent::FillStarted {
                config: config.clone(),
                bounds,
                template_count: templates.len(),
            });
        }

        self.open_session(&config.group_name, sink);

        let mut template_idx = 0usize;
        while report.attempts < budget && report.placed < budget {
            if config.is_cancelled() {
                warn!(
                    "Fill cancelled after {} attempts ({} placed).",
                    report.attempts, report.placed
                );
                report.cancelled = true;
                break;
            }
            report.attempts += 1;

            let position = sampler.sample_center(rng);
            let template = &templates[template_idx];
            let outcome = self.try_place(region, template, position, &sampler, config, rng);
            match outcome {
                Ok(element) => {
                    if sink.wants(FillEventKind::ElementPlaced) {
                        sink.send(FillEvent::ElementPlaced {
                            index: self.ledger.len(),
                            template_index: template_idx,
                            position,
                            rotation_deg: element.rotation_deg,
                        });
                    }
                    self.ledger.append(element);
                    template_idx = (template_idx + 1) % templates.len();
                    report.placed += 1;
                }
                Err(reason) => {
                    report.record(reason);
                    if sink.wants(FillEventKind::AttemptRejected) {
                        sink.send(FillEvent::AttemptRejected {
                            attempt: report.attempts,
                            position,
                            reason,
                        });
                    }
                }
            }
        }

        self.close_session(sink);

        info!(
            "Fill finished | placed: {} | attempts: {} | rejected: {}.",
            report.placed,
            report.attempts,
            report.rejected(),
        );
        if sink.wants(FillEventKind::FillFinished) {
            sink.send(FillEvent::FillFinished { report });
        }

        Ok(report)
    }

    fn try_place(
        &mut self,
        region: &H::Region,
        template: &Template<H::Shape>,
        position: Vec2,
        sampler: &Sampler,
        config: &FillConfig,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<PlacedElement<H::Shape>, RejectReason> {
        if !self.host.is_point_inside(region, position.into()) {
            return Err(RejectReason::Outside);
        }

        let rotation_deg = config.rotation.sample(rng);

        if config.prevent_overlap
            && self
                .ledger
                .any_collision(position, template.size, sampler.spacing)
        {
            return Err(RejectReason::Overlap);
        }

        let probe_radius = template.size.max_element() * 0.5;
        let host = &mut self.host;
        if !probe_points(position, probe_radius).all(|p| host.is_point_inside(region, p.into())) {
            return Err(RejectReason::Boundary);
        }

        match self
            .host
            .instantiate(&template.shape, position.into(), rotation_deg)
        {
            Ok(shape) => Ok(PlacedElement {
                position,
                rotation_deg,
                size: template.size,
                shape,
            }),
            Err(e) => {
                debug!("Host failed to instantiate copy at {:?}: {}.", position, e);
                Err(RejectReason::HostFailure)
            }
        }
    }

    /// Place copies of `template` along `path`, one every `template width + spacing` of
    /// arc length starting at its beginning, so a path of length `L` gets
    /// `floor(L / step) + 1` positions. Each copy is rotated to the path direction plus
    /// the configured offset.
    ///
    /// As with [`FillSession::fill`], the ledger is cleared once the path is measured.
    pub fn fill_along_path(
        &mut self,
        path: &H::Shape,
        template: &Template<H::Shape>,
        config: &PathFillConfig,
    ) -> Result<FillReport> {
        self.fill_along_path_internal(path, template, config, &mut ())
    }

    pub fn fill_along_path_with_events(
        &mut self,
        path: &H::Shape,
        template: &Template<H::Shape>,
        config: &PathFillConfig,
        sink: &mut dyn EventSink,
    ) -> Result<FillReport> {
        self.fill_along_path_internal(path, template, config, sink)
    }

    fn fill_along_path_internal(
        &mut self,
        path: &H::Shape,
        template: &Template<H::Shape>,
        config: &PathFillConfig,
        sink: &mut dyn EventSink,
    ) -> Result<FillReport> {
        config.validate()?;
        let size = average_size(std::slice::from_ref(template))?;
        let step = config.step(size.x)?;

        let length = self.host.curve_length(path)?;
        if !(length.is_finite() && length >= 0.0) {
            return Err(Error::Host(format!("invalid path length {length}")));
        }
        let copies = (length / step).floor() as usize + 1;
        self.ledger.clear();

        info!(
            "Filling path of length {} | step: {} | copies: {} | angle offset: {}.",
            length, step, copies, config.angle_offset_deg,
        );
        if sink.wants(FillEventKind::PathStarted) {
            sink.send(FillEvent::PathStarted {
                length,
                step,
                copies,
            });
        }

        self.open_session(&config.group_name, sink);

        let mut report = FillReport::default();
        for i in 0..copies {
            if config.is_cancelled() {
                warn!(
                    "Path fill cancelled after {} of {} copies.",
                    report.attempts, copies
                );
                report.cancelled = true;
                break;
            }
            report.attempts += 1;

            let distance = i as f32 * step;
            let position = match self.host.point_at(path, distance) {
                Ok(p) => Vec2::from(p),
                Err(e) => {
                    self.close_session(sink);
                    return Err(e.into());
                }
            };
            let heading = match self.host.tangent_at(path, distance) {
                Ok(t) => t.y.atan2(t.x).to_degrees(),
                Err(e) => {
                    debug!("No path direction at {}: {}; using 0 degrees.", distance, e);
                    0.0
                }
            };
            let rotation_deg = (heading + config.angle_offset_deg).rem_euclid(360.0);

            match self
                .host
                .instantiate(&template.shape, position.into(), rotation_deg)
            {
                Ok(shape) => {
                    if sink.wants(FillEventKind::ElementPlaced) {
                        sink.send(FillEvent::ElementPlaced {
                            index: self.ledger.len(),
                            template_index: 0,
                            position,
                            rotation_deg,
                        });
                    }
                    self.ledger.append(PlacedElement {
                        position,
                        rotation_deg,
                        size: template.size,
                        shape,
                    });
                    report.placed += 1;
                }
                Err(e) => {
                    debug!("Host failed to instantiate copy at {:?}: {}.", position, e);
                    report.record(RejectReason::HostFailure);
                    if sink.wants(FillEventKind::AttemptRejected) {
                        sink.send(FillEvent::AttemptRejected {
                            attempt: report.attempts,
                            position,
                            reason: RejectReason::HostFailure,
                        });
                    }
                }
            }
        }

        self.close_session(sink);

        info!(
            "Path fill finished | placed: {} | host failures: {}.",
            report.placed, report.host_failures,
        );
        if sink.wants(FillEventKind::FillFinished) {
            sink.send(FillEvent::FillFinished { report });
        }

        Ok(report)
    }

    fn open_session(&mut self, group_name: &str, sink: &mut dyn EventSink) {
        if let Err(e) = self.host.set_fast_mode(true) {
            debug!("Ignoring failure to enable fast mode: {}.", e);
        }
        if let Err(e) = self.host.begin_group(group_name) {
            warn!("Failed to open undo group '{}': {}.", group_name, e);
            if sink.wants(FillEventKind::Warning) {
                sink.send(FillEvent::Warning {
                    context: "begin_group".into(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn close_session(&mut self, sink: &mut dyn EventSink) {
        if let Err(e) = self.host.end_group() {
            warn!("Failed to close undo group: {}.", e);
            if sink.wants(FillEventKind::Warning) {
                sink.send(FillEvent::Warning {
                    context: "end_group".into(),
                    message: e.to_string(),
                });
            }
        }
        if let Err(e) = self.host.set_fast_mode(false) {
            debug!("Ignoring failure to disable fast mode: {}.", e);
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Err(e) = self.host.refresh() {
            debug!("Ignoring failed host refresh: {}.", e);
        }
    }

    /// Count of placed copies and their estimated coverage of `region`.
    pub fn statistics(&mut self, region: &H::Region) -> Result<FillStatistics> {
        let bounds = self.host.bounding_box(region)?;
        Ok(FillStatistics {
            count: self.ledger.len(),
            coverage_percent: coverage_percent(self.ledger.footprint_area(), &bounds),
        })
    }

    /// Delete the most recently placed copies until `target_count` remain.
    ///
    /// A target at or above the current count is a no-op; raising density means
    /// running another fill.
    pub fn reduce_to(&mut self, target_count: usize) -> RemovalSummary {
        self.reduce_to_internal(target_count, &mut ())
    }

    pub fn reduce_to_with_events(
        &mut self,
        target_count: usize,
        sink: &mut dyn EventSink,
    ) -> RemovalSummary {
        self.reduce_to_internal(target_count, sink)
    }

    /// Keep `floor(count * percent / 100)` copies, deleting the newest ones.
    pub fn reduce_to_percent(&mut self, percent: f32) -> Result<RemovalSummary> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(Error::InvalidInput(format!(
                "density percentage must be a finite value >= 0, got {percent}"
            )));
        }
        let target = (self.ledger.len() as f64 * percent as f64 / 100.0).floor() as usize;
        Ok(self.reduce_to(target))
    }

    fn reduce_to_internal(
        &mut self,
        target_count: usize,
        sink: &mut dyn EventSink,
    ) -> RemovalSummary {
        let current = self.ledger.len();
        if target_count >= current {
            debug!(
                "Density target {} >= current count {}; nothing to remove.",
                target_count, current
            );
            return RemovalSummary::default();
        }

        let summary = self
            .ledger
            .remove_last(current - target_count, &mut self.host);
        if summary.delete_failures > 0 {
            warn!(
                "{} of {} host deletions failed during density reduction.",
                summary.delete_failures, summary.removed
            );
        }
        info!(
            "Reduced density from {} to {} copies.",
            current,
            self.ledger.len()
        );
        if sink.wants(FillEventKind::ElementsRemoved) {
            sink.send(FillEvent::ElementsRemoved {
                summary,
                remaining: self.ledger.len(),
            });
        }
        self.refresh();
        summary
    }
}
