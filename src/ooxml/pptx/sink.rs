/// [`PresentationSink`] implementation that builds a `.pptx` deck.
use crate::common::Result;
use crate::common::unit::{emu_to_inches, inches_to_emu};
use crate::deck::{
    DeckOptions, PresentationSink, Rect, SlideContent, SlideHandle, SlideKind, StyleTarget,
    StylingError, TextFrameStyle, content_box,
};
use crate::ooxml::error::OoxmlError;
use crate::ooxml::pptx::Package;
use crate::ooxml::pptx::template::SlideLayout;
use crate::ooxml::pptx::writer::MutablePresentation;
use crate::ooxml::pptx::writer::shape::{BodyFormat, Frame, MutableShape, TextFormat};
use std::path::Path;
use tracing::debug;

/// Renders mapper decisions into a [`MutablePresentation`].
///
/// Picture bytes are read when the slide is added, so files handed in
/// (including rendered diagrams) only need to live until then.
#[derive(Debug)]
pub struct PptxSink {
    pres: MutablePresentation,
    kinds: Vec<SlideKind>,
    title_frame: Frame,
    centered_title_frame: Frame,
    body_frame: Frame,
    code_format: TextFormat,
}

impl PptxSink {
    /// Create an empty deck sized and styled by `options`.
    pub fn new(options: &DeckOptions) -> Self {
        let (width, height) = (options.slide_width, options.slide_height);
        let content = content_box(width, height, &options.margins);
        let title = Rect::new(
            content.left,
            0.2,
            content.width,
            (options.margins.top - 0.3).max(0.4),
        );
        let centered = Rect::new(width * 0.1, height * 0.3, width * 0.8, height * 0.2);

        Self {
            pres: MutablePresentation::new(inches_to_emu(width), inches_to_emu(height)),
            kinds: Vec::new(),
            title_frame: to_frame(title),
            centered_title_frame: to_frame(centered),
            body_frame: to_frame(content),
            code_format: TextFormat::monospace(&options.code_font, options.code_font_size),
        }
    }

    /// The presentation built so far.
    pub fn presentation(&self) -> &MutablePresentation {
        &self.pres
    }

    pub fn into_presentation(self) -> MutablePresentation {
        self.pres
    }

    /// Serialize the deck to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(Package::from_presentation(&self.pres)?.to_bytes()?)
    }

    fn shape_for(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
    ) -> std::result::Result<&mut MutableShape, StylingError> {
        let index = slide.index();
        let kind = *self
            .kinds
            .get(index)
            .ok_or(StylingError::UnknownSlide(index))?;
        let slide_ref = self
            .pres
            .slide_mut(index)
            .ok_or(StylingError::UnknownSlide(index))?;
        let shape = match (target, kind) {
            (StyleTarget::Title, _) => slide_ref.title_shape_mut(),
            (StyleTarget::Body, SlideKind::Bullets | SlideKind::Code) => slide_ref.body_shape_mut(),
            (StyleTarget::TableCells, SlideKind::Table) => slide_ref.table_mut(),
            _ => None,
        };
        shape.ok_or(StylingError::MissingTarget {
            slide: index,
            target,
        })
    }
}

impl PresentationSink for PptxSink {
    fn add_slide(&mut self, title: &str, content: SlideContent) -> Result<SlideHandle> {
        let kind = content.kind();
        let layout = match kind {
            SlideKind::Title => SlideLayout::TitleSlide,
            SlideKind::Bullets => SlideLayout::TitleAndContent,
            _ => SlideLayout::TitleOnly,
        };

        // Media is registered before the slide borrows the presentation
        let media = match &content {
            SlideContent::Image { path, .. } => Some(self.pres.add_media(std::fs::read(path)?)?),
            _ => None,
        };

        let title_frame = if layout == SlideLayout::TitleSlide {
            self.centered_title_frame
        } else {
            self.title_frame
        };
        let body_frame = self.body_frame;
        let code_format = self.code_format.clone();

        let slide = self.pres.add_slide(layout);
        slide.set_title(title, title_frame);
        match content {
            SlideContent::Title => {},
            SlideContent::Bullets(items) => slide.set_body(items, body_frame),
            SlideContent::Code { text, frame } => {
                slide.add_text_box(&text, code_format, to_frame(frame))
            },
            SlideContent::Image { path, frame } => {
                let description = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if let Some(media_index) = media {
                    slide.add_picture(media_index, &description, to_frame(frame));
                }
            },
            SlideContent::MissingImage { reference, frame } => slide.add_text_box(
                &format!("Image not found: {reference}"),
                TextFormat::default(),
                to_frame(frame),
            ),
            SlideContent::Table { rows, frame } => slide.add_table(rows, to_frame(frame)),
        }

        self.kinds.push(kind);
        let handle = SlideHandle(self.kinds.len() - 1);
        debug!(slide = handle.index(), ?kind, title, "added slide");
        Ok(handle)
    }

    fn apply_styling(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
        style: &TextFrameStyle,
    ) -> std::result::Result<(), StylingError> {
        let shape = self.shape_for(slide, target)?;

        let inset_left = inches_to_emu(style.inset_left);
        let inset_right = inches_to_emu(style.inset_right);
        let width = shape.text_width();
        if inset_left + inset_right >= width {
            return Err(StylingError::InsetsTooWide {
                target,
                insets: style.inset_left + style.inset_right,
                width: emu_to_inches(width),
            });
        }

        shape.set_body_format(BodyFormat {
            word_wrap: Some(style.word_wrap),
            shrink_to_fit: style.shrink_to_fit,
            inset_left: Some(inset_left),
            inset_right: Some(inset_right),
        });
        Ok(())
    }

    fn set_notes(&mut self, slide: SlideHandle, notes: &str) -> Result<()> {
        let slide = self
            .pres
            .slide_mut(slide.index())
            .ok_or(OoxmlError::UnknownSlide(slide.index()))?;
        slide.set_notes(notes);
        Ok(())
    }

    fn slide_count(&self) -> usize {
        self.pres.slide_count()
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Package::from_presentation(&self.pres)?.save(path)?;
        Ok(())
    }
}

fn to_frame(rect: Rect) -> Frame {
    Frame::new(
        inches_to_emu(rect.left),
        inches_to_emu(rect.top),
        inches_to_emu(rect.width),
        inches_to_emu(rect.height),
    )
}
