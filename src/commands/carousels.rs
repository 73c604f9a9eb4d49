//! Carousel pipeline command: scan image folders, write per-folder manifests.

use crate::carousel::CarouselScanner;
use crate::config::Config;
use anyhow::{Context, Result};

/// Generates one carousel manifest per image folder.
pub struct CarouselsCommand {
    config: Config,
}

impl CarouselsCommand {
    /// Creates a new carousels command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scanner and reports what was written.
    pub fn execute(&self) -> Result<String> {
        let scanner =
            CarouselScanner::new(&self.config.images_root, &self.config.carousels_out);

        let written = scanner
            .generate()
            .with_context(|| format!("Failed to scan {}", self.config.images_root))?;

        Ok(format!(
            "Generated {} carousel file(s) in {}",
            written.len(),
            self.config.carousels_out
        ))
    }
}
