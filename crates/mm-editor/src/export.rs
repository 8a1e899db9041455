//! JSON and PNG exports.
//!
//! Exports are serialized through an [`ExportGuard`]: while one is running a
//! second request is rejected with [`ExportError::Busy`]. Bytes are produced
//! completely before anything touches the filesystem, so a failed export
//! never leaves a partial file behind.

use crate::session::Session;
use mm_core::ModelError;
use mm_render::{RasterError, RasterOptions, Theme, render_png};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub const JSON_FILE_NAME: &str = "mindmap-export.json";
pub const PNG_FILE_NAME: &str = "mindmap-export.png";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Admits one export at a time.
#[derive(Debug, Default)]
pub struct ExportGuard {
    busy: AtomicBool,
}

/// Held for the duration of one export; releases the guard on drop.
#[derive(Debug)]
pub struct ExportTicket<'a> {
    guard: &'a ExportGuard,
}

impl Drop for ExportTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the guard, or fail with `Busy` if another export holds it.
    pub fn begin(&self) -> Result<ExportTicket<'_>, ExportError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            log::warn!("export rejected: another export is in progress");
            return Err(ExportError::Busy);
        }
        Ok(ExportTicket { guard: self })
    }

    /// The tree as pretty-printed JSON bytes.
    pub fn json_bytes(&self, session: &Session) -> Result<Vec<u8>, ExportError> {
        let _ticket = self.begin()?;
        Ok(session.map().to_json_pretty()?.into_bytes())
    }

    /// The canvas as currently shown, as PNG bytes.
    pub fn png_bytes(&self, session: &Session, theme: &Theme, opts: &RasterOptions) -> Result<Vec<u8>, ExportError> {
        let _ticket = self.begin()?;
        Ok(render_png(
            &session.display_list(),
            session.view(),
            session.viewport(),
            theme,
            opts,
        )?)
    }

    /// Write `mindmap-export.json` into `dir`.
    pub fn export_json(&self, session: &Session, dir: &Path) -> Result<PathBuf, ExportError> {
        let bytes = self.json_bytes(session)?;
        write_export(dir.join(JSON_FILE_NAME), &bytes)
    }

    /// Write `mindmap-export.png` into `dir`.
    pub fn export_png(
        &self,
        session: &Session,
        dir: &Path,
        theme: &Theme,
        opts: &RasterOptions,
    ) -> Result<PathBuf, ExportError> {
        let bytes = self.png_bytes(session, theme, opts).inspect_err(|e| {
            log::error!("Failed to export image: {e}");
        })?;
        write_export(dir.join(PNG_FILE_NAME), &bytes)
    }
}

fn write_export(path: PathBuf, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    std::fs::write(&path, bytes)?;
    log::info!("exported {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_ticket_is_busy() {
        let guard = ExportGuard::new();
        let first = guard.begin().unwrap();
        assert!(matches!(guard.begin(), Err(ExportError::Busy)));
        drop(first);
        assert!(!guard.is_busy());
        assert!(guard.begin().is_ok());
    }

    #[test]
    fn failed_export_releases_guard() {
        let guard = ExportGuard::new();
        let session = Session::new(
            mm_core::MindMap::new(mm_core::Node::new("root", "Root")).unwrap(),
            mm_core::Viewport { width: 0.0, height: 0.0 },
        );
        let err = guard
            .png_bytes(&session, &Theme::dark(), &RasterOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::Raster(_)));
        assert!(!guard.is_busy());
    }
}
