use crate::args::{Commands, InputArgs};
use anyhow::{Context, Result};
use mm_core::{ExpansionSet, LintSeverity, MindMap, Node, NodeId, Viewport, lint_tree};
use mm_editor::export::ExportGuard;
use mm_editor::session::Session;
use mm_render::svg::{SvgFrame, render_svg};
use mm_render::{RasterOptions, Theme};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn execute_command(command: &Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Layout { input, height } => layout(input, *height, out),
        Commands::ExportJson { input, output } => export_json(input, output.as_deref(), out),
        Commands::ExportSvg {
            input,
            output,
            padding,
        } => export_svg(input, output.as_deref(), *padding, out),
        Commands::ExportPng {
            input,
            output,
            width,
            height,
            scale,
            fit,
            background,
        } => {
            let viewport = Viewport {
                width: *width,
                height: *height,
            };
            let theme = Theme::dark();
            let opts = RasterOptions {
                scale: *scale,
                background: Some(background.unwrap_or(theme.background)),
            };
            export_png(input, output.as_deref(), viewport, &theme, &opts, *fit, out)
        }
        Commands::Lint { file, expand } => lint(file, expand, out),
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_session(input: &InputArgs, viewport: Viewport) -> Result<Session> {
    let text = read_file(&input.file)?;
    let map = MindMap::from_json(&text).with_context(|| format!("loading {}", input.file.display()))?;
    let mut session = Session::new(map, viewport);
    for id in &input.collapse {
        let id = NodeId::intern(id);
        if !session.map().contains(id) {
            log::warn!("--collapse `{id}`: no such node");
        }
        if session.expanded().contains(id) {
            session.toggle(id);
        }
    }
    Ok(session)
}

// ─── Commands ────────────────────────────────────────────────────────────

fn layout(input: &InputArgs, height: f32, out: &mut impl Write) -> Result<()> {
    let session = load_session(
        input,
        Viewport {
            height,
            ..Viewport::default()
        },
    )?;
    for id in session.map().node_ids() {
        if let Some(pos) = session.layout().get(id) {
            let parent = pos.parent.as_ref().map(|p| p.as_str()).unwrap_or("-");
            writeln!(out, "{id}\t{}\t{}\t{parent}", pos.x, pos.y)?;
        }
    }
    Ok(())
}

fn export_json(input: &InputArgs, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let session = load_session(input, Viewport::default())?;
    let guard = ExportGuard::new();
    let path = match output {
        Some(path) => {
            let bytes = guard.json_bytes(&session)?;
            write_file(path, &bytes)?
        }
        None => guard.export_json(&session, Path::new("."))?,
    };
    writeln!(out, "{}", path.display())?;
    Ok(())
}

fn export_svg(input: &InputArgs, output: Option<&Path>, padding: f32, out: &mut impl Write) -> Result<()> {
    let session = load_session(input, Viewport::default())?;
    let svg = render_svg(
        &session.display_list(),
        SvgFrame::Content { padding },
        &Theme::dark(),
    );
    match output {
        Some(path) => {
            let path = write_file(path, svg.as_bytes())?;
            writeln!(out, "{}", path.display())?;
        }
        None => writeln!(out, "{svg}")?,
    }
    Ok(())
}

fn export_png(
    input: &InputArgs,
    output: Option<&Path>,
    viewport: Viewport,
    theme: &Theme,
    opts: &RasterOptions,
    fit: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = load_session(input, viewport)?;
    if fit {
        session.fit_to_view();
    }
    let guard = ExportGuard::new();
    let path = match output {
        Some(path) => {
            let bytes = guard.png_bytes(&session, theme, opts)?;
            write_file(path, &bytes)?
        }
        None => guard.export_png(&session, Path::new("."), theme, opts)?,
    };
    writeln!(out, "{}", path.display())?;
    Ok(())
}

fn lint(file: &Path, expand: &[String], out: &mut impl Write) -> Result<()> {
    // Parsed without ID validation so duplicates are reported, not fatal.
    let root: Node = serde_json::from_str(&read_file(file)?)
        .with_context(|| format!("parsing {}", file.display()))?;
    let mut expanded = ExpansionSet::new();
    for id in expand {
        expanded.expand(NodeId::intern(id));
    }
    let diags = lint_tree(&root, &expanded);
    for d in &diags {
        let level = match d.severity {
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        };
        writeln!(out, "{level}[{}] {}: {}", d.rule, d.node_id, d.message)?;
    }
    let warnings = diags
        .iter()
        .filter(|d| d.severity == LintSeverity::Warning)
        .count();
    writeln!(out, "{} issue(s), {warnings} warning(s)", diags.len())?;
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json");

    fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("mindmap").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute_command(&cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn layout_prints_visible_nodes_in_pre_order() {
        let out = run(&["layout", SAMPLE]).unwrap();
        assert_eq!(
            out,
            "root\t100\t278\t-\n\
             growth\t340\t182\troot\n\
             onboarding\t580\t150\tgrowth\n\
             referrals\t580\t214\tgrowth\n\
             platform\t340\t310\troot\n\
             api\t580\t278\tplatform\n\
             perf\t580\t342\tplatform\n\
             research\t340\t406\troot\n"
        );
    }

    #[test]
    fn collapse_hides_descendants() {
        let out = run(&["layout", SAMPLE, "--collapse", "growth", "--collapse", "platform"]).unwrap();
        let ids: Vec<&str> = out.lines().filter_map(|l| l.split('\t').next()).collect();
        assert_eq!(ids, ["root", "growth", "platform", "research"]);
    }

    #[test]
    fn export_svg_to_stdout() {
        let out = run(&["export-svg", SAMPLE, "--collapse", "growth"]).unwrap();
        assert!(out.starts_with("<svg"));
        assert_eq!(out.matches("<path ").count(), 5);
        assert!(!out.contains("Onboarding"));
    }

    #[test]
    fn export_json_to_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.json");
        let out = run(&["export-json", SAMPLE, "-o", path.to_str().unwrap()]).unwrap();
        assert_eq!(out.trim_end(), path.display().to_string());
        let written = std::fs::read_to_string(&path).unwrap();
        let original = std::fs::read_to_string(SAMPLE).unwrap();
        assert_eq!(written, original.trim_end());
    }

    #[test]
    fn export_png_writes_scaled_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.png");
        run(&[
            "export-png",
            SAMPLE,
            "-o",
            path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
            "--fit",
        ])
        .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        // IHDR width and height, big-endian
        assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 800);
        assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 600);
    }

    #[test]
    fn export_png_uses_requested_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("light.png");
        run(&["export-png", SAMPLE, "-o", path.to_str().unwrap(), "--background", "#ffffff"]).unwrap();
        let pixmap = tiny_skia::Pixmap::load_png(&path).unwrap();
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0xff, 0xff, 0xff));
    }

    #[test]
    fn bad_background_is_a_usage_error() {
        let err = run(&["export-png", SAMPLE, "--background", "white"]).unwrap_err();
        assert!(err.to_string().contains("expected #RRGGBB"));
    }

    #[test]
    fn duplicate_ids_fail_to_load_but_lint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        std::fs::write(
            &path,
            r#"{"id":"x","label":"X","children":[{"id":"x","label":" "}]}"#,
        )
        .unwrap();
        let file = path.to_str().unwrap();

        let err = run(&["layout", file]).unwrap_err();
        assert!(format!("{err:#}").contains("loading"));

        let out = run(&["lint", file]).unwrap();
        assert!(out.contains("warning[duplicate-id] x:"));
        assert!(out.contains("warning[empty-label] x:"));
        assert!(out.ends_with("2 issue(s), 2 warning(s)\n"));
    }

    #[test]
    fn lint_reports_expanded_leaves() {
        let out = run(&["lint", SAMPLE, "--expand", "research", "--expand", "growth"]).unwrap();
        assert_eq!(
            out,
            "info[leaf-expanded] research: Leaf `research` is marked expanded; this has no effect.\n\
             1 issue(s), 0 warning(s)\n"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = run(&["export-svg", "/nonexistent/map.json"]).unwrap_err();
        assert!(format!("{err:#}").contains("reading /nonexistent/map.json"));
    }

    #[test]
    fn verbose_is_global_and_counted() {
        let cli = Cli::try_parse_from(["mindmap", "lint", "a.json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
