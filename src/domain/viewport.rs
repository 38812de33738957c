//! Viewport state: zoom factor, container size and the derived translate anchor.
//!
//! The controller knows nothing about the rendering surface. The host reports
//! every layout change as an explicit resize event and reads the anchor back.

use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

/// Decimal places kept on the zoom factor; removes float residue from repeated steps.
const ZOOM_PRECISION: f64 = 1e6;

/// Size of the host container in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerSize {
    width: f64,
    height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> DomainResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(DomainError::InvalidSize { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

/// Point in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Tunables for [`ViewportController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Added or removed per zoom step
    pub zoom_step: f64,
    /// Zooming out is only allowed while the factor is above this value
    pub zoom_floor: f64,
    /// Vertical position of the root
    pub top_offset: f64,
    pub initial_size: ContainerSize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.2,
            zoom_floor: 0.4,
            top_offset: 50.0,
            initial_size: ContainerSize::default(),
        }
    }
}

/// Zoom and container state of the tree view.
///
/// Zoom is stored as a signed number of steps away from 1.0, so
/// `zoom_in` followed by `zoom_out` lands exactly on the previous factor.
/// There is a floor but no ceiling.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    zoom_steps: i32,
    container: ContainerSize,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            zoom_steps: 0,
            container: config.initial_size,
        }
    }

    pub fn zoom_factor(&self) -> f64 {
        self.factor_at(self.zoom_steps)
    }

    fn factor_at(&self, steps: i32) -> f64 {
        let raw = 1.0 + self.config.zoom_step * f64::from(steps);
        (raw * ZOOM_PRECISION).round() / ZOOM_PRECISION
    }

    pub fn zoom_in(&mut self) {
        self.zoom_steps = self.zoom_steps.saturating_add(1);
    }

    /// Step out unless the factor is already at or below the floor.
    pub fn zoom_out(&mut self) {
        let next = self.zoom_steps.saturating_sub(1);
        if self.zoom_factor() > self.config.zoom_floor && self.factor_at(next) > 0.0 {
            self.zoom_steps = next;
        }
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_steps = 0;
    }

    pub fn container_size(&self) -> ContainerSize {
        self.container
    }

    pub fn on_container_resize(&mut self, size: ContainerSize) {
        self.container = size;
    }

    /// Where the root is drawn: horizontally centred, fixed distance from the top.
    pub fn translate_anchor(&self) -> Point {
        Point {
            x: self.container.width / 2.0,
            y: self.config.top_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_when_created_then_centres_anchor_on_container() {
        let viewport = ViewportController::default();
        assert_eq!(viewport.zoom_factor(), 1.0);
        assert_eq!(viewport.translate_anchor(), Point { x: 500.0, y: 50.0 });
    }

    #[test]
    fn given_many_steps_when_zooming_then_factor_does_not_drift() {
        let mut viewport = ViewportController::default();
        for _ in 0..7 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom_factor(), 2.4);
        for _ in 0..7 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom_factor(), 1.0);
    }

    #[test]
    fn given_large_step_when_zooming_out_then_factor_stays_positive() {
        let mut viewport = ViewportController::new(ViewportConfig {
            zoom_step: 1.0,
            zoom_floor: 0.4,
            ..ViewportConfig::default()
        });
        viewport.zoom_out();
        assert_eq!(viewport.zoom_factor(), 1.0);
    }
}
