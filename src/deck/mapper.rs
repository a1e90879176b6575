/// Block-to-slide mapping.
///
/// [`SlideMapper`] walks a [`Document`] in order and issues slide creation calls
/// against a [`PresentationSink`]. List and paragraph blocks are batched into one
/// bullet slide per contiguous run; every other block maps to at most one slide.
///
/// # Titles
///
/// | Block | Slide title |
/// |---|---|
/// | first `#` heading | the heading text (title slide) |
/// | list / paragraph run | section title, or `Contents` at the end of input |
/// | code | `Code: <section>` |
/// | Mermaid code, rendered | `Diagram: <section>` |
/// | Mermaid code, not rendered | `Mermaid (code): <section>` |
/// | image | alt text, else section title, else `Image` |
/// | table | section title, else `Table` |
///
/// The `: <section>` suffix is left out when no section title is known.
use super::assets::{probe_pixel_size, resolve_image_ref};
use super::config::{DeckOptions, RepeatedTitle};
use super::layout::{Rect, Size, content_box, fit_centered};
use super::sink::{PresentationSink, SlideContent, SlideHandle, StyleTarget, TextFrameStyle};
use crate::common::Result;
use crate::diagram::{DiagramError, DiagramRenderer, NoDiagrams, is_mermaid};
use crate::markdown::{Block, Document, normalize_bullets, paragraph_text, parse_table_lines};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Counters reported after a mapping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapSummary {
    pub slides: usize,
    pub notes: usize,
    pub diagrams: usize,
    pub diagram_fallbacks: usize,
    pub missing_images: usize,
    pub styling_failures: usize,
}

/// Per-document mapping state.
#[derive(Debug, Default)]
struct MapperState {
    title_done: bool,
    section: String,
    pending: Vec<String>,
    pending_notes: Option<String>,
    last_slide: Option<SlideHandle>,
    summary: MapSummary,
}

/// Turns blocks into slides.
///
/// # Examples
///
/// ```rust
/// use slidemark::deck::{DeckOptions, OutlineSink, SlideMapper};
/// use slidemark::markdown::parse_markdown;
///
/// let options = DeckOptions::default();
/// let mut sink = OutlineSink::new();
/// SlideMapper::new(&options, ".")
///     .map_document(&parse_markdown("# Hi\n\n- a\n- b"), &mut sink)
///     .unwrap();
/// assert_eq!(sink.titles(), vec!["Hi", "Hi"]);
/// assert_eq!(sink.slides()[1].items, vec!["a", "b"]);
/// ```
pub struct SlideMapper<'a> {
    options: &'a DeckOptions,
    base_dir: PathBuf,
    renderer: Box<dyn DiagramRenderer + 'a>,
    area: Rect,
    state: MapperState,
}

impl<'a> SlideMapper<'a> {
    /// Create a mapper for a document located in `base_dir`.
    ///
    /// Mermaid blocks are shown as code until a renderer is supplied with
    /// [`with_renderer`](Self::with_renderer).
    pub fn new(options: &'a DeckOptions, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            options,
            base_dir: base_dir.into(),
            renderer: Box::new(NoDiagrams),
            area: content_box(options.slide_width, options.slide_height, &options.margins),
            state: MapperState::default(),
        }
    }

    /// Use `renderer` for Mermaid blocks.
    pub fn with_renderer(mut self, renderer: impl DiagramRenderer + 'a) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Directory that relative image references are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map every block of `doc` and flush what is left at the end.
    pub fn map_document(
        mut self,
        doc: &Document,
        sink: &mut dyn PresentationSink,
    ) -> Result<MapSummary> {
        for block in doc {
            self.map_block(block, sink)?;
        }
        self.finish(sink)
    }

    /// Process one block.
    pub fn map_block(&mut self, block: &Block, sink: &mut dyn PresentationSink) -> Result<()> {
        match block {
            Block::Heading { level, text } => self.heading(*level, text, sink)?,
            Block::List { lines } => {
                self.state.pending.extend(normalize_bullets(lines));
            },
            Block::Paragraph { lines } => {
                self.state.pending.extend(paragraph_text(lines));
            },
            Block::Code { lines, lang } => {
                self.flush_pending(sink, None)?;
                self.code(&lines.join("\n"), lang.as_deref(), sink)?;
            },
            Block::Image { alt, path } => {
                self.flush_pending(sink, None)?;
                let title = first_non_empty(&[alt.as_str(), self.state.section.as_str()], "Image");
                let resolved = resolve_image_ref(path, &self.base_dir);
                self.image_slide(&title, resolved, sink)?;
            },
            Block::Table { rows } => {
                self.flush_pending(sink, None)?;
                self.table(rows, sink)?;
            },
            Block::Notes { lines } => self.notes(lines, sink)?,
        }
        Ok(())
    }

    /// Flush pending text into a final slide and report what was built.
    pub fn finish(mut self, sink: &mut dyn PresentationSink) -> Result<MapSummary> {
        self.flush_pending(sink, Some("Contents"))?;
        if let Some(notes) = self.state.pending_notes.take() {
            debug!(chars = notes.len(), "speaker notes without a following slide dropped");
        }
        Ok(self.state.summary)
    }

    fn heading(&mut self, level: u8, text: &str, sink: &mut dyn PresentationSink) -> Result<()> {
        match level {
            1 if !self.state.title_done => {
                let slide = sink.add_slide(text, SlideContent::Title)?;
                self.after_slide(slide, sink)?;
                self.style_title(slide, sink);
                self.state.title_done = true;
                self.state.section = text.to_string();
            },
            1 if self.options.repeated_title == RepeatedTitle::Ignore => {
                debug!(text, "repeated level-1 heading ignored");
            },
            1..=3 => {
                self.flush_pending(sink, None)?;
                self.state.section = text.to_string();
            },
            _ => debug!(level, text, "heading below level 3 dropped"),
        }
        Ok(())
    }

    fn code(&mut self, source: &str, lang: Option<&str>, sink: &mut dyn PresentationSink) -> Result<()> {
        if is_mermaid(lang) {
            match self.renderer.render(source) {
                Ok(png) => {
                    self.state.summary.diagrams += 1;
                    let title = self.section_title("Diagram");
                    return self.image_slide(&title, png, sink);
                },
                Err(e) => {
                    self.state.summary.diagram_fallbacks += 1;
                    if matches!(e, DiagramError::Disabled) {
                        debug!(section = %self.state.section, "mermaid diagram shown as code");
                    } else {
                        warn!(error = %e, section = %self.state.section, "mermaid diagram shown as code");
                    }
                    let title = self.section_title("Mermaid (code)");
                    return self.code_slide(&title, source, sink);
                },
            }
        }
        let title = self.section_title("Code");
        self.code_slide(&title, source, sink)
    }

    fn table(&mut self, lines: &[String], sink: &mut dyn PresentationSink) -> Result<()> {
        let rows = parse_table_lines(lines);
        if rows.is_empty() {
            debug!("table without data rows skipped");
            return Ok(());
        }
        let title = first_non_empty(&[self.state.section.as_str()], "Table");
        let height = self
            .area
            .height
            .min(self.options.table_row_height * rows.len().max(2) as f64);
        let frame = self.area.with_height(height);
        let slide = sink.add_slide(&title, SlideContent::Table { rows, frame })?;
        self.after_slide(slide, sink)?;
        self.style_title(slide, sink);
        let cells = TextFrameStyle::wrapped(self.options.cell_inset);
        self.style(slide, StyleTarget::TableCells, &cells, sink);
        Ok(())
    }

    fn notes(&mut self, lines: &[String], sink: &mut dyn PresentationSink) -> Result<()> {
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() {
            debug!("empty speaker notes skipped");
            return Ok(());
        }
        match self.state.last_slide {
            Some(slide) if self.state.pending.is_empty() => {
                sink.set_notes(slide, &text)?;
                self.state.summary.notes += 1;
            },
            // waits for the upcoming bullet slide, or for the first slide of the deck
            _ => self.state.pending_notes = Some(text),
        }
        Ok(())
    }

    /// Emit pending bullet items as one slide titled by the section, or by
    /// `fallback` when no section title is known.
    fn flush_pending(&mut self, sink: &mut dyn PresentationSink, fallback: Option<&str>) -> Result<()> {
        if self.state.pending.is_empty() {
            return Ok(());
        }
        let items = std::mem::take(&mut self.state.pending);
        let title = match fallback {
            Some(fallback) => first_non_empty(&[self.state.section.as_str()], fallback),
            None => self.state.section.clone(),
        };
        let slide = sink.add_slide(&title, SlideContent::Bullets(items))?;
        self.after_slide(slide, sink)?;
        self.style_title(slide, sink);
        let body = TextFrameStyle::fitted(self.options.text_inset);
        self.style(slide, StyleTarget::Body, &body, sink);
        Ok(())
    }

    fn code_slide(&mut self, title: &str, source: &str, sink: &mut dyn PresentationSink) -> Result<()> {
        let content = SlideContent::Code {
            text: source.to_string(),
            frame: self.area,
        };
        let slide = sink.add_slide(title, content)?;
        self.after_slide(slide, sink)?;
        self.style_title(slide, sink);
        let body = TextFrameStyle::fitted(self.options.text_inset);
        self.style(slide, StyleTarget::Body, &body, sink);
        Ok(())
    }

    fn image_slide(&mut self, title: &str, path: PathBuf, sink: &mut dyn PresentationSink) -> Result<()> {
        let content = if path.is_file() {
            let (width, height) = probe_pixel_size(&path).unwrap_or_else(|| {
                debug!(path = %path.display(), "image size unknown, using fallback");
                self.options.fallback_media_size
            });
            let frame = fit_centered(self.area, Size::new(width as f64, height as f64));
            SlideContent::Image { path, frame }
        } else {
            warn!(path = %path.display(), "image not found");
            self.state.summary.missing_images += 1;
            SlideContent::MissingImage {
                reference: path.display().to_string(),
                frame: self.area.with_height(1.0),
            }
        };
        let slide = sink.add_slide(title, content)?;
        self.after_slide(slide, sink)
    }

    /// Record a new slide and hand it any notes that were waiting.
    fn after_slide(&mut self, slide: SlideHandle, sink: &mut dyn PresentationSink) -> Result<()> {
        self.state.summary.slides += 1;
        if let Some(notes) = self.state.pending_notes.take() {
            sink.set_notes(slide, &notes)?;
            self.state.summary.notes += 1;
        }
        self.state.last_slide = Some(slide);
        Ok(())
    }

    fn style_title(&mut self, slide: SlideHandle, sink: &mut dyn PresentationSink) {
        let style = TextFrameStyle::fitted(self.options.text_inset);
        self.style(slide, StyleTarget::Title, &style, sink);
    }

    /// Apply optional styling; failures are logged and dropped.
    fn style(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
        style: &TextFrameStyle,
        sink: &mut dyn PresentationSink,
    ) {
        if let Err(e) = sink.apply_styling(slide, target, style) {
            self.state.summary.styling_failures += 1;
            debug!(slide = slide.index(), %target, error = %e, "styling skipped");
        }
    }

    fn section_title(&self, prefix: &str) -> String {
        if self.state.section.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}: {}", self.state.section)
        }
    }
}

fn first_non_empty(candidates: &[&str], fallback: &str) -> String {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .copied()
        .unwrap_or(fallback)
        .to_string()
}
