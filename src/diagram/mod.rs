//! Diagram rendering for fenced Mermaid blocks.
//!
//! A [`DiagramRenderer`] turns diagram source into a raster image on disk. The
//! slide mapper treats every failure as a signal to fall back to showing the
//! source as code, so errors here never abort a conversion.
//!
//! [`MermaidCli`] shells out to the Mermaid command-line tool; [`NoDiagrams`]
//! always declines and is used when rendering is switched off.

mod mermaid;

pub use mermaid::{MermaidCli, RenderTool, find_on_path};

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a diagram could not be rendered.
#[derive(Error, Debug)]
pub enum DiagramError {
    /// Rendering is switched off
    #[error("diagram rendering is disabled")]
    Disabled,

    /// Neither `mmdc` nor `npx` is available
    #[error("no Mermaid renderer (mmdc or npx) found on PATH")]
    ToolNotFound,

    /// The renderer could not be started
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer exited unsuccessfully
    #[error("{tool} exited with status {}: {stderr}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The renderer ran longer than allowed and was killed
    #[error("{tool} did not finish within {secs} s")]
    Timeout { tool: String, secs: u64 },

    /// The renderer reported success but produced no image
    #[error("{tool} produced no image")]
    EmptyOutput { tool: String },

    /// Scratch files could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can turn diagram source into an image file.
pub trait DiagramRenderer {
    /// Render `source` and return the path of the produced image.
    ///
    /// The file stays valid at least as long as the renderer itself.
    fn render(&mut self, source: &str) -> Result<PathBuf, DiagramError>;
}

/// Renderer that never renders.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagrams;

impl DiagramRenderer for NoDiagrams {
    fn render(&mut self, _source: &str) -> Result<PathBuf, DiagramError> {
        Err(DiagramError::Disabled)
    }
}

/// Check whether a code fence language tag names a Mermaid diagram.
///
/// Matches any tag starting with `mermaid`, ignoring case.
///
/// # Examples
///
/// ```rust
/// use slidemark::diagram::is_mermaid;
///
/// assert!(is_mermaid(Some("Mermaid")));
/// assert!(is_mermaid(Some("mermaid-flowchart")));
/// assert!(!is_mermaid(Some("rust")));
/// assert!(!is_mermaid(None));
/// ```
pub fn is_mermaid(lang: Option<&str>) -> bool {
    lang.is_some_and(|tag| {
        tag.get(..7)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("mermaid"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_diagrams_declines() {
        assert!(matches!(NoDiagrams.render("graph TD"), Err(DiagramError::Disabled)));
    }

    #[test]
    fn test_failed_message() {
        let err = DiagramError::Failed {
            tool: "mmdc".to_string(),
            code: Some(1),
            stderr: "Parse error".to_string(),
        };
        assert_eq!(err.to_string(), "mmdc exited with status 1: Parse error");
        let err = DiagramError::Failed {
            tool: "mmdc".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "mmdc exited with status unknown: ");
    }

    #[test]
    fn test_mermaid_tags() {
        assert!(is_mermaid(Some("MERMAID")));
        assert!(!is_mermaid(Some("merm")));
        assert!(!is_mermaid(Some("")));
        assert!(!is_mermaid(Some("mérmaid")));
    }
}
