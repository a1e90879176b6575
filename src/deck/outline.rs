/// A [`PresentationSink`] that only records what it is asked to build.
///
/// Used for `--outline` dry runs and to observe the mapper in tests. Saving
/// writes the outline as YAML.
use super::sink::{
    PresentationSink, SlideContent, SlideHandle, SlideKind, StyleTarget, StylingError,
    TextFrameStyle,
};
use crate::common::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// One recorded slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineSlide {
    pub kind: SlideKind,
    pub title: String,
    /// Bullet items, code lines, table cells joined by ` | `, or the image path
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Targets that accepted styling
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styled: Vec<StyleTarget>,
}

impl OutlineSlide {
    fn from_content(title: &str, content: &SlideContent) -> Self {
        let items = match content {
            SlideContent::Title => Vec::new(),
            SlideContent::Bullets(items) => items.clone(),
            SlideContent::Code { text, .. } => text.lines().map(str::to_string).collect(),
            SlideContent::Image { path, .. } => vec![path.display().to_string()],
            SlideContent::MissingImage { reference, .. } => vec![reference.clone()],
            SlideContent::Table { rows, .. } => rows.iter().map(|row| row.join(" | ")).collect(),
        };
        Self {
            kind: content.kind(),
            title: title.to_string(),
            items,
            notes: None,
            styled: Vec::new(),
        }
    }

    fn has_target(&self, target: StyleTarget) -> bool {
        match target {
            StyleTarget::Title => true,
            StyleTarget::Body => matches!(self.kind, SlideKind::Bullets | SlideKind::Code),
            StyleTarget::TableCells => self.kind == SlideKind::Table,
        }
    }
}

/// In-memory record of a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlineSink {
    slides: Vec<OutlineSlide>,
}

impl OutlineSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All slides recorded so far.
    pub fn slides(&self) -> &[OutlineSlide] {
        &self.slides
    }

    /// Titles of all slides, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }

    /// Render the outline as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(&self.slides)
            .map_err(|e| Error::Other(format!("Failed to serialize outline to YAML: {}", e)))
    }
}

impl PresentationSink for OutlineSink {
    fn add_slide(&mut self, title: &str, content: SlideContent) -> Result<SlideHandle> {
        self.slides.push(OutlineSlide::from_content(title, &content));
        Ok(SlideHandle(self.slides.len() - 1))
    }

    fn apply_styling(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
        _style: &TextFrameStyle,
    ) -> std::result::Result<(), StylingError> {
        let index = slide.index();
        let recorded = self
            .slides
            .get_mut(index)
            .ok_or(StylingError::UnknownSlide(index))?;
        if !recorded.has_target(target) {
            return Err(StylingError::MissingTarget {
                slide: index,
                target,
            });
        }
        recorded.styled.push(target);
        Ok(())
    }

    fn set_notes(&mut self, slide: SlideHandle, notes: &str) -> Result<()> {
        let recorded = self
            .slides
            .get_mut(slide.index())
            .ok_or_else(|| Error::Other(format!("Unknown slide index {}", slide.index())))?;
        recorded.notes = Some(notes.to_string());
        Ok(())
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::layout::Rect;

    #[test]
    fn test_records_slides_and_notes() {
        let mut sink = OutlineSink::new();
        let title = sink.add_slide("Deck", SlideContent::Title).unwrap();
        let code = sink
            .add_slide(
                "Code",
                SlideContent::Code {
                    text: "a\nb".to_string(),
                    frame: Rect::new(0.5, 1.3, 12.0, 5.0),
                },
            )
            .unwrap();
        sink.set_notes(title, "hello").unwrap();

        assert_eq!(sink.slide_count(), 2);
        assert_eq!(sink.titles(), vec!["Deck", "Code"]);
        assert_eq!(sink.slides()[0].notes.as_deref(), Some("hello"));
        assert_eq!(sink.slides()[code.index()].items, vec!["a", "b"]);
    }

    #[test]
    fn test_styling_missing_target() {
        let mut sink = OutlineSink::new();
        let slide = sink.add_slide("Deck", SlideContent::Title).unwrap();
        let style = TextFrameStyle::fitted(0.15);
        assert!(sink.apply_styling(slide, StyleTarget::Title, &style).is_ok());
        assert_eq!(
            sink.apply_styling(slide, StyleTarget::TableCells, &style),
            Err(StylingError::MissingTarget {
                slide: 0,
                target: StyleTarget::TableCells
            })
        );
        assert_eq!(
            sink.apply_styling(SlideHandle(7), StyleTarget::Title, &style),
            Err(StylingError::UnknownSlide(7))
        );
        assert_eq!(sink.slides()[0].styled, vec![StyleTarget::Title]);
    }

    #[test]
    fn test_yaml_output() {
        let mut sink = OutlineSink::new();
        sink.add_slide("Intro", SlideContent::Bullets(vec!["one".to_string()]))
            .unwrap();
        let yaml = sink.to_yaml().unwrap();
        assert!(yaml.contains("kind: bullets"));
        assert!(yaml.contains("title: Intro"));
        assert!(yaml.contains("- one"));
    }
}
