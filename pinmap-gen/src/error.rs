//! Host tool errors

use std::fmt;
use std::io;
use std::path::PathBuf;

use pinmap_core::PinmapError;

use crate::config::ConfigError;
use crate::splice::SpliceError;

/// Anything that aborts a generation run
#[derive(Debug)]
pub enum GenError {
    /// File read or write failed
    Io { path: PathBuf, source: io::Error },
    /// Layout file is malformed
    Config { path: PathBuf, source: ConfigError },
    /// Layout is well-formed but not valid for generation
    Pinmap {
        /// Variant being generated; `None` for the common map alone
        variant: Option<String>,
        source: PinmapError,
    },
    /// Pin-list record rejected
    Record { path: PathBuf, source: PinmapError },
    /// Marker splicing failed
    Splice { path: PathBuf, source: SpliceError },
    /// Pin list could not be serialized
    PinList(toml::ser::Error),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Core error raised while generating `variant`
    pub fn pinmap(variant: Option<&str>, source: PinmapError) -> Self {
        GenError::Pinmap {
            variant: variant.map(str::to_string),
            source,
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            GenError::Config { path, source } => write!(f, "{}: {}", path.display(), source),
            GenError::Pinmap {
                variant: Some(variant),
                source,
            } => write!(f, "variant '{}': {}", variant, source),
            GenError::Pinmap {
                variant: None,
                source,
            } => write!(f, "common map: {}", source),
            GenError::Record { path, source } => write!(f, "{}: {}", path.display(), source),
            GenError::Splice { path, source } => write!(f, "{}: {}", path.display(), source),
            GenError::PinList(e) => write!(f, "failed to serialize pin list: {}", e),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io { source, .. } => Some(source),
            GenError::Config { source, .. } => Some(source),
            GenError::Pinmap { source, .. } => Some(source),
            GenError::Record { source, .. } => Some(source),
            GenError::Splice { source, .. } => Some(source),
            GenError::PinList(e) => Some(e),
        }
    }
}

impl From<toml::ser::Error> for GenError {
    fn from(e: toml::ser::Error) -> Self {
        GenError::PinList(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinmap_error_names_variant() {
        let source = PinmapError::DuplicateSymbolicName {
            name: "FREQ_PIN".try_into().unwrap(),
            first: "E0".parse().unwrap(),
            second: "B6".parse().unwrap(),
        };

        let err = GenError::pinmap(Some("release"), source.clone());
        assert_eq!(
            err.to_string(),
            "variant 'release': FREQ_PIN assigned to both E0 and B6"
        );

        let err = GenError::pinmap(None, source);
        assert_eq!(err.to_string(), "common map: FREQ_PIN assigned to both E0 and B6");
    }
}
