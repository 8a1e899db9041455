//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};
use mm_render::Rgba;

/// Lay out and export JSON mindmaps
#[derive(Parser, Debug)]
#[command(name = "mindmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the position of every visible node in pre-order
    Layout {
        #[command(flatten)]
        input: InputArgs,

        /// Canvas height the root is centered on
        #[arg(long, default_value_t = 600.0)]
        height: f32,
    },

    /// Write the tree back out as pretty JSON
    ExportJson {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: mindmap-export.json in the current directory)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Render all visible content to an SVG document
    ExportSvg {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Margin around the content
        #[arg(long, default_value_t = 50.0)]
        padding: f32,
    },

    /// Render the canvas view to a PNG image
    ExportPng {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: mindmap-export.png in the current directory)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Canvas width in CSS pixels
        #[arg(long, default_value_t = 800.0)]
        width: f32,

        /// Canvas height in CSS pixels
        #[arg(long, default_value_t = 600.0)]
        height: f32,

        /// Device pixels per CSS pixel
        #[arg(long, default_value_t = 2.0)]
        scale: f32,

        /// Fit all content into the canvas before rendering
        #[arg(long)]
        fit: bool,

        /// Background color as #RRGGBB or #RRGGBBAA (default: theme background)
        #[arg(long, value_name = "HEX", value_parser = parse_color)]
        background: Option<Rgba>,
    },

    /// Report duplicate IDs, empty labels, and other tree issues
    Lint {
        /// Mindmap JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Check this node as expanded (repeatable)
        #[arg(long = "expand", value_name = "ID")]
        expand: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Mindmap JSON file
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Collapse this node (repeatable); everything else starts expanded
    #[arg(long = "collapse", value_name = "ID")]
    pub collapse: Vec<String>,
}

fn parse_color(s: &str) -> Result<Rgba, String> {
    Rgba::from_hex(s).ok_or_else(|| format!("expected #RRGGBB or #RRGGBBAA, got `{s}`"))
}
