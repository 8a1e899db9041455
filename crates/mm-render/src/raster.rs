//! PNG export via resvg.
//!
//! The display list is written as a viewport-framed SVG and rasterized at
//! `scale` times the viewport size. Edge curves come from the layout, so the
//! PNG matches the canvas without reading anything back from it.

use crate::scene::DisplayList;
use crate::svg::{SvgFrame, render_svg};
use crate::theme::{Rgba, Theme};
use mm_core::{ViewTransform, Viewport};

/// Bundled label font, so PNGs have text even where no system fonts exist.
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const EMBEDDED_FAMILY: &str = "DejaVu Sans";

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("failed to parse SVG for PNG rendering: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per CSS pixel.
    pub scale: f32,
    /// Filled before drawing; `None` leaves the pixmap transparent.
    pub background: Option<Rgba>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Some(Rgba::rgb(0x0f, 0x0f, 0x0f)),
        }
    }
}

/// Output pixel size for a viewport at the given scale.
pub fn output_size(viewport: Viewport, scale: f32) -> Result<(u32, u32), RasterError> {
    let width = (viewport.width * scale).round();
    let height = (viewport.height * scale).round();
    if !(width >= 1.0 && height >= 1.0 && width.is_finite() && height.is_finite()) {
        return Err(RasterError::InvalidSize {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        });
    }
    Ok((width as u32, height as u32))
}

/// Render what the canvas currently shows into PNG bytes.
pub fn render_png(
    list: &DisplayList,
    transform: ViewTransform,
    viewport: Viewport,
    theme: &Theme,
    opts: &RasterOptions,
) -> Result<Vec<u8>, RasterError> {
    let svg = render_svg(list, SvgFrame::Viewport { transform, viewport }, theme);
    let (width, height) = output_size(viewport, opts.scale)?;
    svg_to_png(&svg, width, height, opts)
}

/// Rasterize an SVG document into a `width`×`height` PNG.
pub fn svg_to_png(svg: &str, width: u32, height: u32, opts: &RasterOptions) -> Result<Vec<u8>, RasterError> {
    let usvg_opts = font_options();

    let tree = usvg::Tree::from_str(svg, &usvg_opts)?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
    if let Some(bg) = opts.background {
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    }

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    log::debug!("rasterized {width}x{height} PNG");

    pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
}

/// Font setup for label text. The bundled font backs the generic
/// `sans-serif` family and is the fallback for unknown families.
fn font_options() -> usvg::Options<'static> {
    let mut opts = usvg::Options::default();
    let fontdb = opts.fontdb_mut();
    #[cfg(feature = "system-fonts")]
    fontdb.load_system_fonts();
    fontdb.load_font_data(EMBEDDED_FONT.to_vec());
    fontdb.set_sans_serif_family(EMBEDDED_FAMILY);
    opts.font_family = EMBEDDED_FAMILY.to_string();
    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_twice_the_viewport() {
        let size = output_size(Viewport { width: 800.0, height: 600.0 }, 2.0).unwrap();
        assert_eq!(size, (1600, 1200));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let err = output_size(Viewport { width: 0.0, height: 600.0 }, 2.0).unwrap_err();
        assert!(matches!(err, RasterError::InvalidSize { width: 0, .. }));
    }

    #[test]
    fn embedded_font_is_registered() {
        let opts = font_options();
        let families: Vec<String> = opts
            .fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        assert!(families.iter().any(|f| f == EMBEDDED_FAMILY));
    }

    #[test]
    fn text_is_rasterized() {
        let blank = r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="40"><rect width="120" height="40" fill="#ffffff"/></svg>"##;
        let labeled = r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="40"><rect width="120" height="40" fill="#ffffff"/><text x="10" y="28" font-family="Inter, system-ui, sans-serif" font-size="20" fill="#000000">Label</text></svg>"##;
        let opts = RasterOptions { scale: 1.0, background: None };
        let dark_pixels = |svg: &str| {
            let png = svg_to_png(svg, 120, 40, &opts).unwrap();
            let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
            pixmap.pixels().iter().filter(|p| p.red() < 128).count()
        };
        assert_eq!(dark_pixels(blank), 0);
        assert!(dark_pixels(labeled) > 50);
    }

    #[test]
    fn malformed_svg_yields_no_bytes() {
        let err = svg_to_png("<svg", 10, 10, &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::Svg(_)));
    }
}
