//! Artifact rendering and file output
//!
//! Everything is resolved and rendered in memory first. Files are only
//! touched once the whole plan has been built, so a bad layout leaves the
//! existing sources alone. Writing stages every file next to its target
//! before any target is replaced.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use pinmap_core::{
    resolve_all, resolve_records, Artifacts, Layout, Pic18Channels, PinRecord, ResolvedPin,
};

use crate::error::GenError;
use crate::pin_list::{load_pin_list, to_toml};
use crate::splice::splice;

/// Standalone declarations file name
pub const DECLARATIONS_FILE: &str = "pins_declarations.h";
/// Standalone definitions file name
pub const DEFINITIONS_FILE: &str = "pins_definitions.c";
/// Standalone init-sequence file name
pub const INIT_FILE: &str = "pins_init.c";

/// Where generated text goes
#[derive(Debug, Clone)]
pub enum OutputMode {
    /// One file per artifact in `out_dir`
    Separate { out_dir: PathBuf },
    /// Between markers: declarations in `header`, definitions and init in `source`
    Splice { header: PathBuf, source: PathBuf },
}

/// One generation run
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub layout: &'a Layout,
    /// Build variant, or `None` for the common map alone
    pub variant: Option<&'a str>,
    pub mode: OutputMode,
    /// Also write the resolved pin list as TOML
    pub pin_list: Option<PathBuf>,
}

/// Files to write, fully rendered
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    files: Vec<(PathBuf, String)>,
}

/// A file written next to its target, waiting to replace it
struct Staged<'a> {
    target: &'a Path,
    temp: PathBuf,
    /// Target content before this run, if it existed
    previous: Option<Vec<u8>>,
}

impl OutputPlan {
    /// Resolve, render and (for splice mode) merge into existing sources
    pub fn build(request: &GenerateRequest) -> Result<Self, GenError> {
        let flat = request
            .layout
            .resolve(request.variant)
            .map_err(|e| GenError::pinmap(request.variant, e))?;
        info!(
            "Resolved {} pins for variant '{}'",
            flat.len(),
            request.variant.unwrap_or("common")
        );

        let pins = resolve_all(&flat, &Pic18Channels)
            .map_err(|e| GenError::pinmap(request.variant, e))?;
        let mut plan = Self::render(&pins, &request.mode)?;

        if let Some(path) = &request.pin_list {
            let records: Vec<PinRecord> = pins.iter().map(PinRecord::from).collect();
            plan.files.push((path.clone(), to_toml(&records)?));
        }

        Ok(plan)
    }

    /// Render from a pin list written by an earlier run
    pub fn from_pin_list(path: &Path, mode: &OutputMode) -> Result<Self, GenError> {
        let records = load_pin_list(path)?;
        info!("Loaded {} pins from {}", records.len(), path.display());

        let pins = resolve_records(&records, &Pic18Channels).map_err(|source| GenError::Record {
            path: path.to_path_buf(),
            source,
        })?;
        Self::render(&pins, mode)
    }

    fn render(pins: &[ResolvedPin], mode: &OutputMode) -> Result<Self, GenError> {
        for pin in pins {
            debug!(
                "{} at {}: {} register writes, accessor {:?}, pps {:?}, adc {:?}",
                pin.name,
                pin.location,
                pin.writes.len(),
                pin.accessor,
                pin.pps,
                pin.adc_channel
            );
        }

        let artifacts = Artifacts::render(pins);
        match mode {
            OutputMode::Separate { out_dir } => Ok(Self::separate(out_dir, artifacts)),
            OutputMode::Splice { header, source } => Self::spliced(header, source, &artifacts),
        }
    }

    fn separate(out_dir: &Path, artifacts: Artifacts) -> Self {
        Self {
            files: vec![
                (out_dir.join(DECLARATIONS_FILE), artifacts.declarations),
                (out_dir.join(DEFINITIONS_FILE), artifacts.definitions),
                (out_dir.join(INIT_FILE), artifacts.init_sequence),
            ],
        }
    }

    fn spliced(header: &Path, source: &Path, artifacts: &Artifacts) -> Result<Self, GenError> {
        let splice_into = |path: &Path, text: &str, artifact: &str, content: &str| {
            splice(text, artifact, content).map_err(|source| GenError::Splice {
                path: path.to_path_buf(),
                source,
            })
        };

        let header_text = fs::read_to_string(header).map_err(|e| GenError::io(header, e))?;
        let header_text =
            splice_into(header, &header_text, "declarations", &artifacts.declarations)?;

        let source_text = fs::read_to_string(source).map_err(|e| GenError::io(source, e))?;
        let source_text =
            splice_into(source, &source_text, "definitions", &artifacts.definitions)?;
        let source_text = splice_into(source, &source_text, "init", &artifacts.init_sequence)?;

        Ok(Self {
            files: vec![
                (header.to_path_buf(), header_text),
                (source.to_path_buf(), source_text),
            ],
        })
    }

    /// Planned files in write order
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().map(|(p, t)| (p.as_path(), t.as_str()))
    }

    /// Write every planned file, skipping ones whose content is unchanged
    ///
    /// Either every changed file is replaced or, on failure, every target
    /// is left as it was.
    pub fn write(&self) -> Result<(), GenError> {
        let mut staged = Vec::new();

        for (path, text) in &self.files {
            let previous = fs::read(path).ok();
            if previous.as_deref() == Some(text.as_bytes()) {
                debug!("{} unchanged", path.display());
                continue;
            }

            let temp = staging_path(path);
            if let Err(e) = fs::write(&temp, text) {
                discard(&staged);
                remove_quietly(&temp);
                return Err(GenError::io(path, e));
            }
            staged.push(Staged {
                target: path,
                temp,
                previous,
            });
        }

        for (i, file) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(&file.temp, file.target) {
                roll_back(&staged[..i]);
                discard(&staged[i..]);
                return Err(GenError::io(file.target, e));
            }
        }

        for file in &staged {
            info!("Wrote {}", file.target.display());
        }
        Ok(())
    }
}

/// Hidden sibling of `path` used while staging
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.pinmap-tmp", name))
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("could not remove {}: {}", path.display(), e);
    }
}

/// Remove staged files that were never moved into place
fn discard(staged: &[Staged]) {
    for file in staged {
        remove_quietly(&file.temp);
    }
}

/// Restore targets that were already replaced
fn roll_back(committed: &[Staged]) {
    for file in committed {
        let restored = match &file.previous {
            Some(previous) => fs::write(file.target, previous),
            None => fs::remove_file(file.target),
        };
        if let Err(e) = restored {
            warn!("could not restore {}: {}", file.target.display(), e);
        }
    }
}
