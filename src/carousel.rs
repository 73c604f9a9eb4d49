//! Carousel image-manifest generation.
//!
//! Scans the immediate subdirectories of an images root and writes one JSON
//! manifest per folder, listing the web paths a carousel component should
//! request. A folder's `converted/` subdirectory wins over its own files
//! whenever it holds at least one qualifying image.

use crate::error::Result;
use crate::manifest::{self, now_iso};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Web-safe image formats only.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// One per-folder manifest, fully replacing any prior file of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselManifest {
    /// Source folder name under the images root
    pub folder: String,
    /// Whether paths point into the folder's `converted/` subdirectory
    pub use_converted: bool,
    /// Web-accessible image paths, natural order ascending
    pub images: Vec<String>,
    /// RFC 3339 UTC timestamp of this run
    pub updated_at: String,
}

/// Scans an images root and writes per-folder carousel manifests.
pub struct CarouselScanner {
    images_root: PathBuf,
    out_dir: PathBuf,
}

impl CarouselScanner {
    pub fn new(images_root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self { images_root: images_root.into(), out_dir: out_dir.into() }
    }

    /// Builds the manifest for one folder without writing it.
    pub fn scan_folder(&self, folder: &str) -> Result<CarouselManifest> {
        let folder_path = self.images_root.join(folder);
        let converted = list_images(&folder_path.join("converted"))?;

        let use_converted = !converted.is_empty();
        let files = if use_converted { converted } else { list_images(&folder_path)? };

        let base = if use_converted {
            format!("/images/{}/converted/", folder)
        } else {
            format!("/images/{}/", folder)
        };

        let images = files.into_iter().map(|f| format!("{}{}", base, f)).collect();

        Ok(CarouselManifest {
            folder: folder.to_string(),
            use_converted,
            images,
            updated_at: now_iso(),
        })
    }

    /// Builds manifests for every immediate subdirectory of the images root.
    /// A missing root yields no manifests rather than an error.
    pub fn scan(&self) -> Result<Vec<CarouselManifest>> {
        let mut folders = Vec::new();
        if self.images_root.is_dir() {
            for entry in fs::read_dir(&self.images_root)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    folders.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }
        folders.sort_by(|a, b| natural_cmp(a, b));

        folders.iter().map(|folder| self.scan_folder(folder)).collect()
    }

    /// Scans and writes one `<folder>.json` per subdirectory into the output
    /// directory. Folders with zero qualifying images still get a manifest
    /// with an empty list.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        let manifests = self.scan()?;
        let mut written = Vec::with_capacity(manifests.len());

        for m in &manifests {
            let path = self.out_dir.join(format!("{}.json", m.folder));
            manifest::write_json(&path, m)?;
            debug!("{}: {} image(s), useConverted={}", m.folder, m.images.len(), m.use_converted);
            written.push(path);
        }

        info!("Generated {} carousel file(s) in {}", written.len(), self.out_dir.display());
        Ok(written)
    }
}

/// Lists qualifying image filenames in `dir`, natural order ascending.
/// A missing directory is an empty list, not an error.
fn list_images(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_image(&name) {
            names.push(name);
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names)
}

/// Matches web-safe image extensions, case-insensitive.
fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Natural (numeric-aware, locale-neutral) string comparison: embedded digit
/// runs compare as numbers, so "img2" sorts before "img10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) if ac.is_ascii_digit() && bc.is_ascii_digit() => {
                let an = take_digits(&mut ai);
                let bn = take_digits(&mut bi);
                match cmp_digit_runs(&an, &bn) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            (Some(ac), Some(bc)) => match ac.cmp(&bc) {
                Ordering::Equal => {
                    ai.next();
                    bi.next();
                }
                ord => return ord,
            },
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(*c);
        it.next();
    }
    run
}

/// Compares two digit runs numerically without parsing, so arbitrarily long
/// runs cannot overflow.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
