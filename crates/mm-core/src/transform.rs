//! Pan/zoom view transform.
//!
//! `screen = layout * scale + (x, y)`, applied uniformly to node boxes and
//! edge paths. Wheel zoom scales about the content origin, not the cursor.

use crate::geometry::Point;
use crate::layout::{Layout, LayoutConfig, Viewport};
use serde::{Deserialize, Serialize};

/// Interactive zoom limits and per-step factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Factor applied per wheel notch scrolling down.
    pub zoom_out: f32,
    /// Factor applied per wheel notch scrolling up.
    pub zoom_in: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 2.0,
            zoom_out: 0.9,
            zoom_in: 1.1,
        }
    }
}

/// Fit-to-view margin and zoom cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Margin added around the content bounds, in layout units.
    pub padding: f32,
    pub max_scale: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            max_scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Translate by a pointer drag delta. Unbounded.
    #[must_use]
    pub fn pan(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// One wheel event: positive `delta_y` zooms out, anything else zooms in.
    /// The result is clamped to the configured range; x/y are kept.
    #[must_use]
    pub fn zoom_wheel(self, delta_y: f32, cfg: &ZoomConfig) -> Self {
        let factor = if delta_y > 0.0 { cfg.zoom_out } else { cfg.zoom_in };
        self.zoom_by(factor, cfg)
    }

    #[must_use]
    pub fn zoom_in(self, cfg: &ZoomConfig) -> Self {
        self.zoom_by(cfg.zoom_in, cfg)
    }

    #[must_use]
    pub fn zoom_out(self, cfg: &ZoomConfig) -> Self {
        self.zoom_by(cfg.zoom_out, cfg)
    }

    fn zoom_by(self, factor: f32, cfg: &ZoomConfig) -> Self {
        Self {
            scale: (self.scale * factor).clamp(cfg.min_scale, cfg.max_scale),
            ..self
        }
    }

    /// Scale and center every positioned node inside `viewport`.
    ///
    /// The padded content box is scaled by
    /// `min(vw / cw, vh / ch, fit.max_scale)` and centered. This path is not
    /// clamped to the interactive zoom range. An empty layout leaves the
    /// transform unchanged.
    #[must_use]
    pub fn fit_to_view(
        self,
        layout: &Layout,
        viewport: Viewport,
        cfg: &LayoutConfig,
        fit: &FitConfig,
    ) -> Self {
        let Some(content) = layout.content_bounds(cfg) else {
            return self;
        };
        let padded = content.inflate(fit.padding);
        let scale = (viewport.width / padded.width)
            .min(viewport.height / padded.height)
            .min(fit.max_scale);
        Self {
            x: (viewport.width - padded.width * scale) / 2.0 - padded.x * scale,
            y: (viewport.height - padded.height * scale) / 2.0 - padded.y * scale,
            scale,
        }
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::IDENTITY
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.x, p.y * self.scale + self.y)
    }

    /// Inverse of [`to_screen`](Self::to_screen).
    pub fn to_layout(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.scale, (p.y - self.y) / self.scale)
    }
}
