//! Markdown file to `.pptx` conversion.
//!
//! [`Converter`] ties the layers together: it reads the input, parses it into
//! blocks, drives a [`SlideMapper`] with the configured diagram renderer and
//! saves the resulting deck.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidemark::convert::generate_pptx;
//!
//! let summary = generate_pptx("talk.md", "out/talk.pptx")?;
//! println!("{} slides", summary.slides);
//! # Ok::<(), slidemark::Error>(())
//! ```
use crate::common::{Error, Result};
use crate::deck::{
    DeckOptions, MapSummary, OutlineSink, PresentationSink, SlideContent, SlideHandle,
    SlideMapper, StyleTarget, StylingError, TextFrameStyle,
};
use crate::diagram::MermaidCli;
use crate::markdown::parse_markdown;
use crate::ooxml::pptx::PptxSink;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Convert `input` into `output` with default options.
pub fn generate_pptx(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<MapSummary> {
    Converter::new(DeckOptions::default()).convert_file(input, output)
}

/// Read a Markdown file, distinguishing a missing file from an unreadable one.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts Markdown documents with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: DeckOptions,
}

impl Converter {
    pub fn new(options: DeckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    /// Map Markdown text into `sink`.
    ///
    /// Relative image references are resolved against `base_dir`. Nothing is saved.
    pub fn convert_str(
        &self,
        markdown: &str,
        base_dir: &Path,
        sink: &mut dyn PresentationSink,
    ) -> Result<MapSummary> {
        let doc = parse_markdown(markdown);
        debug!(blocks = doc.len(), "parsed markdown");

        let mapper = SlideMapper::new(&self.options, base_dir);
        let mapper = if self.options.diagrams {
            mapper.with_renderer(MermaidCli::new(self.options.diagram_timeout()))
        } else {
            mapper
        };
        mapper.map_document(&doc, sink)
    }

    /// Convert the Markdown file `input` into the deck `output`.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<MapSummary> {
        let mut sink = PptxSink::new(&self.options);
        self.run(input.as_ref(), output.as_ref(), &mut sink)
    }

    /// Like [`convert_file`](Self::convert_file), also returning the outline of
    /// the slides that were written.
    pub fn convert_file_with_outline(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(MapSummary, OutlineSink)> {
        let mut sink = Tee {
            deck: PptxSink::new(&self.options),
            outline: OutlineSink::new(),
        };
        let summary = self.run(input.as_ref(), output.as_ref(), &mut sink)?;
        Ok((summary, sink.outline))
    }

    /// Map `input` into an [`OutlineSink`] without writing a deck.
    pub fn outline(&self, input: impl AsRef<Path>) -> Result<OutlineSink> {
        let input = input.as_ref();
        let markdown = read_input(input)?;
        let mut sink = OutlineSink::new();
        self.convert_str(&markdown, &base_dir_of(input), &mut sink)?;
        Ok(sink)
    }

    fn run(&self, input: &Path, output: &Path, sink: &mut dyn PresentationSink) -> Result<MapSummary> {
        let markdown = read_input(input)?;
        let summary = self.convert_str(&markdown, &base_dir_of(input), sink)?;
        sink.save(output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            slides = summary.slides,
            notes = summary.notes,
            diagrams = summary.diagrams,
            diagram_fallbacks = summary.diagram_fallbacks,
            missing_images = summary.missing_images,
            styling_failures = summary.styling_failures,
            "conversion finished"
        );
        Ok(summary)
    }
}

/// Directory of the input file, or `.` for a bare file name.
fn base_dir_of(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Feeds one mapping run into the deck and an outline at once.
///
/// The deck decides: its handles and styling results are the ones reported.
struct Tee {
    deck: PptxSink,
    outline: OutlineSink,
}

impl PresentationSink for Tee {
    fn add_slide(&mut self, title: &str, content: SlideContent) -> Result<SlideHandle> {
        let handle = self.deck.add_slide(title, content.clone())?;
        self.outline.add_slide(title, content)?;
        Ok(handle)
    }

    fn apply_styling(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
        style: &TextFrameStyle,
    ) -> std::result::Result<(), StylingError> {
        self.deck.apply_styling(slide, target, style)?;
        self.outline.apply_styling(slide, target, style)
    }

    fn set_notes(&mut self, slide: SlideHandle, notes: &str) -> Result<()> {
        self.deck.set_notes(slide, notes)?;
        self.outline.set_notes(slide, notes)
    }

    fn slide_count(&self) -> usize {
        self.deck.slide_count()
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.deck.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> Converter {
        Converter::new(DeckOptions::default().with_diagrams(false))
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.md");
        let err = converter()
            .convert_file(&missing, dir.path().join("out.pptx"))
            .unwrap_err();
        assert!(matches!(err, Error::InputNotFound(ref p) if p == &missing));
        assert!(err.is_input_error());
        assert!(!dir.path().join("out.pptx").exists());
    }

    #[test]
    fn test_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("binary.md");
        std::fs::write(&input, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        let err = read_input(&input).unwrap_err();
        assert!(matches!(err, Error::InputUnreadable { .. }));

        let err = read_input(dir.path()).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_base_dir_of() {
        assert_eq!(base_dir_of(Path::new("talk.md")), PathBuf::from("."));
        assert_eq!(base_dir_of(Path::new("docs/talk.md")), PathBuf::from("docs"));
    }

    #[test]
    fn test_convert_file_with_outline() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.md");
        std::fs::write(
            &input,
            "# Talk\n\n## Plan\n- one\n- two\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
        )
        .unwrap();
        let output = dir.path().join("talk.pptx");

        let (summary, outline) = converter().convert_file_with_outline(&input, &output).unwrap();
        assert_eq!(summary.slides, 3);
        assert_eq!(outline.titles(), vec!["Talk", "Plan", "Plan"]);
        assert_eq!(outline.slides()[2].items, vec!["a | b", "1 | 2"]);
        assert!(output.is_file());
    }

    #[test]
    fn test_outline_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.md");
        std::fs::write(&input, "# Only title\n").unwrap();

        let outline = converter().outline(&input).unwrap();
        assert_eq!(outline.titles(), vec!["Only title"]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
