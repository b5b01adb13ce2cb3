//! In-place regeneration between marker comments
//!
//! A source file opts in by carrying a marker pair:
//!
//! ```c
//! // [[[pinmap:declarations]]]
//! ...generated text, replaced on every run...
//! // [[[end]]]
//! ```
//!
//! Everything outside the markers is left untouched.

use std::fmt;

/// Closing marker shared by every artifact
pub const END_MARKER: &str = "// [[[end]]]";

/// Opening marker for an artifact
pub fn begin_marker(artifact: &str) -> String {
    format!("// [[[pinmap:{}]]]", artifact)
}

/// Marker errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    /// No opening marker for the artifact
    MissingBegin { artifact: String },
    /// Opening marker with no closing marker after it
    MissingEnd { artifact: String },
    /// More than one opening marker for the artifact
    DuplicateBegin { artifact: String },
}

impl fmt::Display for SpliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceError::MissingBegin { artifact } => {
                write!(f, "missing marker '{}'", begin_marker(artifact))
            }
            SpliceError::MissingEnd { artifact } => {
                write!(f, "'{}' has no closing '{}'", begin_marker(artifact), END_MARKER)
            }
            SpliceError::DuplicateBegin { artifact } => {
                write!(f, "marker '{}' appears more than once", begin_marker(artifact))
            }
        }
    }
}

impl std::error::Error for SpliceError {}

/// Replace the text between an artifact's markers with `content`
///
/// The marker lines themselves are kept. `content` is inserted verbatim.
pub fn splice(text: &str, artifact: &str, content: &str) -> Result<String, SpliceError> {
    let begin = begin_marker(artifact);

    // (start offset, end offset) of every line, newline included
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        lines.push((offset, offset + line.len()));
        offset += line.len();
    }
    let line_text = |&(start, end): &(usize, usize)| text[start..end].trim();

    let mut begins = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line_text(*line) == begin);

    let (begin_idx, &(_, body_start)) = begins.next().ok_or_else(|| SpliceError::MissingBegin {
        artifact: artifact.to_string(),
    })?;
    if begins.next().is_some() {
        return Err(SpliceError::DuplicateBegin {
            artifact: artifact.to_string(),
        });
    }

    let &(body_end, _) = lines[begin_idx + 1..]
        .iter()
        .find(|line| line_text(*line) == END_MARKER)
        .ok_or_else(|| SpliceError::MissingEnd {
            artifact: artifact.to_string(),
        })?;

    let mut out = String::with_capacity(text.len() + content.len());
    out.push_str(&text[..body_start]);
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&text[body_end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "#include \"pins.h\"\n\
/* [[[cog ]]] */\n\
// [[[pinmap:definitions]]]\n\
old generated text\n\
more old text\n\
// [[[end]]]\n\
\n\
void unrelated(void) {}\n";

    #[test]
    fn test_splice_replaces_body_only() {
        let out = splice(SOURCE, "definitions", "\nnew body\n").unwrap();
        assert_eq!(
            out,
            "#include \"pins.h\"\n\
/* [[[cog ]]] */\n\
// [[[pinmap:definitions]]]\n\
\n\
new body\n\
// [[[end]]]\n\
\n\
void unrelated(void) {}\n"
        );
    }

    #[test]
    fn test_splice_is_idempotent() {
        let once = splice(SOURCE, "definitions", "\nbody\n").unwrap();
        let twice = splice(&once, "definitions", "\nbody\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_splice_indented_markers() {
        let text = "    // [[[pinmap:init]]]\n    // [[[end]]]\n";
        let out = splice(text, "init", "x\n").unwrap();
        assert_eq!(out, "    // [[[pinmap:init]]]\nx\n    // [[[end]]]\n");
    }

    #[test]
    fn test_missing_begin() {
        let err = splice(SOURCE, "declarations", "").unwrap_err();
        assert_eq!(
            err,
            SpliceError::MissingBegin {
                artifact: "declarations".into()
            }
        );
    }

    #[test]
    fn test_missing_end() {
        let err = splice("// [[[pinmap:init]]]\nbody\n", "init", "").unwrap_err();
        assert!(matches!(err, SpliceError::MissingEnd { .. }));
    }

    #[test]
    fn test_duplicate_begin() {
        let text = "// [[[pinmap:init]]]\n// [[[end]]]\n// [[[pinmap:init]]]\n// [[[end]]]\n";
        let err = splice(text, "init", "").unwrap_err();
        assert!(matches!(err, SpliceError::DuplicateBegin { .. }));
    }
}
