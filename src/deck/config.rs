/// Conversion options for building a slide deck.
///
/// Every geometry value is in inches; the writer converts to EMU at the edge.
/// Options can be built in code with the `with_*` methods or loaded from a YAML
/// file where every key is optional.
///
/// # Examples
///
/// ```rust
/// use slidemark::deck::{DeckOptions, RepeatedTitle};
///
/// // Create with defaults
/// let options = DeckOptions::default();
/// assert_eq!(options.slide_width, 13.333);
///
/// // Or customize
/// let options = DeckOptions::new()
///     .with_diagrams(false)
///     .with_code_font("Fira Code", 12.0)
///     .with_repeated_title(RepeatedTitle::Section);
/// ```
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading options from a file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The options file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The options file is not valid YAML for [`DeckOptions`]
    #[error("Invalid options file: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Invalid option `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Policy for level-1 headings after the one that produced the title slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatedTitle {
    /// Treat the heading like a level-2 heading: flush pending text and start a
    /// new section.
    Section,
    /// Drop the heading, like levels 4 to 6. Pending text and the current
    /// section are kept.
    #[default]
    Ignore,
}

impl std::str::FromStr for RepeatedTitle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "section" => Ok(Self::Section),
            "ignore" => Ok(Self::Ignore),
            other => Err(ConfigError::Invalid {
                name: "repeated_title",
                reason: format!("expected `section` or `ignore`, got `{other}`"),
            }),
        }
    }
}

/// Distance between the slide edges and the content box, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.5,
            right: 0.5,
            top: 1.3,
            bottom: 0.5,
        }
    }
}

/// Options controlling how a Markdown document becomes slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckOptions {
    /// Slide width in inches
    pub slide_width: f64,
    /// Slide height in inches
    pub slide_height: f64,
    /// Margins around the content box
    pub margins: Margins,
    /// Left and right insets of title, body and code text frames, in inches
    pub text_inset: f64,
    /// Left and right insets of table cells, in inches
    pub cell_inset: f64,
    /// Height of one table row, in inches
    pub table_row_height: f64,
    /// Font family used for code slides
    pub code_font: String,
    /// Font size used for code slides, in points
    pub code_font_size: f64,
    /// Pixel size assumed for images whose dimensions cannot be read
    pub fallback_media_size: (u32, u32),
    /// Whether to render Mermaid blocks into images
    pub diagrams: bool,
    /// Upper bound for one diagram renderer run, in seconds
    pub diagram_timeout_secs: u64,
    /// What to do with level-1 headings after the first
    pub repeated_title: RepeatedTitle,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            slide_width: 13.333,
            slide_height: 7.5,
            margins: Margins::default(),
            text_inset: 0.15,
            cell_inset: 0.05,
            table_row_height: 0.5,
            code_font: "Consolas".to_string(),
            code_font_size: 11.0,
            fallback_media_size: (1280, 720),
            diagrams: true,
            diagram_timeout_secs: 60,
            repeated_title: RepeatedTitle::Ignore,
        }
    }
}

impl DeckOptions {
    /// Create a new `DeckOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a YAML document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidemark::deck::DeckOptions;
    ///
    /// let options = DeckOptions::from_yaml_str("diagrams: false\nmargins:\n  top: 1.0\n").unwrap();
    /// assert!(!options.diagrams);
    /// assert_eq!(options.margins.top, 1.0);
    /// assert_eq!(options.margins.left, 0.5);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self =
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Check that the geometry leaves room for content.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slide_width <= 0.0 || self.slide_height <= 0.0 {
            return Err(ConfigError::Invalid {
                name: "slide_width/slide_height",
                reason: "slide dimensions must be positive".to_string(),
            });
        }
        let m = &self.margins;
        if m.left + m.right >= self.slide_width || m.top + m.bottom >= self.slide_height {
            return Err(ConfigError::Invalid {
                name: "margins",
                reason: "margins leave no room for content".to_string(),
            });
        }
        if self.code_font_size <= 0.0 {
            return Err(ConfigError::Invalid {
                name: "code_font_size",
                reason: "font size must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Set the slide size in inches.
    #[inline]
    pub fn with_slide_size(mut self, width: f64, height: f64) -> Self {
        self.slide_width = width;
        self.slide_height = height;
        self
    }

    /// Set the content box margins.
    #[inline]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the code font family and size in points.
    #[inline]
    pub fn with_code_font(mut self, family: impl Into<String>, size_pt: f64) -> Self {
        self.code_font = family.into();
        self.code_font_size = size_pt;
        self
    }

    /// Set the pixel size assumed for images that cannot be probed.
    #[inline]
    pub fn with_fallback_media_size(mut self, width: u32, height: u32) -> Self {
        self.fallback_media_size = (width, height);
        self
    }

    /// Enable or disable Mermaid diagram rendering.
    ///
    /// When disabled, Mermaid blocks always become code slides.
    #[inline]
    pub fn with_diagrams(mut self, enabled: bool) -> Self {
        self.diagrams = enabled;
        self
    }

    /// Set the diagram renderer timeout in seconds.
    #[inline]
    pub fn with_diagram_timeout(mut self, secs: u64) -> Self {
        self.diagram_timeout_secs = secs;
        self
    }

    /// Set the policy for repeated level-1 headings.
    #[inline]
    pub fn with_repeated_title(mut self, policy: RepeatedTitle) -> Self {
        self.repeated_title = policy;
        self
    }

    /// Diagram renderer timeout as a [`Duration`].
    #[inline]
    pub fn diagram_timeout(&self) -> Duration {
        Duration::from_secs(self.diagram_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widescreen_layout() {
        let options = DeckOptions::default();
        assert_eq!(options.slide_width, 13.333);
        assert_eq!(options.slide_height, 7.5);
        assert_eq!(options.margins, Margins::default());
        assert_eq!(options.code_font, "Consolas");
        assert_eq!(options.fallback_media_size, (1280, 720));
        assert_eq!(options.diagram_timeout(), Duration::from_secs(60));
        assert_eq!(options.repeated_title, RepeatedTitle::Ignore);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = "code_font: Menlo\ncode_font_size: 14\nrepeated_title: section\n";
        let options = DeckOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(options.code_font, "Menlo");
        assert_eq!(options.code_font_size, 14.0);
        assert_eq!(options.repeated_title, RepeatedTitle::Section);
        assert!(options.diagrams);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DeckOptions::from_yaml_str("  \n").unwrap(), DeckOptions::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DeckOptions::from_yaml_str("slide_colour: red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_margins_must_leave_room() {
        let options = DeckOptions::new().with_margins(Margins {
            left: 7.0,
            right: 7.0,
            top: 1.0,
            bottom: 1.0,
        });
        assert!(matches!(
            options.validate(),
            Err(ConfigError::Invalid { name: "margins", .. })
        ));
    }

    #[test]
    fn test_repeated_title_from_str() {
        assert_eq!("Section".parse::<RepeatedTitle>().unwrap(), RepeatedTitle::Section);
        assert_eq!("ignore".parse::<RepeatedTitle>().unwrap(), RepeatedTitle::Ignore);
        assert!("skip".parse::<RepeatedTitle>().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DeckOptions::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
