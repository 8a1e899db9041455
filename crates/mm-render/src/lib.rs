pub mod hit;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod svg;
pub mod theme;

pub use hit::{Hit, hit_test};
pub use raster::{RasterError, RasterOptions, render_png};
pub use scene::{DisplayList, DrawItem, Highlight, NodeBox, build_display_list};
pub use svg::{SvgFrame, render_svg};
pub use theme::{Rgba, Theme};
