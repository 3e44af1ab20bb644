//! Print surface that stores the print document as an HTML file.

use super::PrintSurface;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the print document to a file for a browser or `lp` to print.
#[derive(Debug, Clone)]
pub struct HtmlFilePrinter {
    path: PathBuf,
}

impl HtmlFilePrinter {
    /// Print into `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for HtmlFilePrinter {
    fn print_surface(&self, markup: &str) -> Result<()> {
        if markup.trim().is_empty() {
            return Err(Error::Print("nothing to print".to_string()));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, markup)?;
        log::info!("print document written to {}", self.path.display());
        Ok(())
    }
}
