/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::template::SlideLayout;
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

// Import shared format types
use super::super::format::ImageFormat;
use super::slide::MutableSlide;

/// An embedded picture, stored once per presentation.
#[derive(Debug, Clone)]
pub struct Media {
    pub(crate) data: Arc<Vec<u8>>,
    pub(crate) format: ImageFormat,
}

impl Media {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A mutable PowerPoint presentation for writing.
///
/// Holds the slides, the embedded media and the slide size.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Pictures referenced by slides through their index
    pub(crate) media: Vec<Media>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
}

impl MutablePresentation {
    /// Create a new empty presentation with the given slide size in EMUs.
    pub fn new(slide_width: i64, slide_height: i64) -> Self {
        Self {
            slides: Vec::new(),
            media: Vec::new(),
            slide_width,
            slide_height,
        }
    }

    /// Add a new slide based on `layout` and return it.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut MutableSlide {
        let index = self.slides.len();
        let slide_id = (index + 256) as u32;
        self.slides.push(MutableSlide::new(slide_id, layout));
        &mut self.slides[index]
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    /// Register picture bytes and return the media index slides refer to.
    ///
    /// Returns an error for formats PowerPoint cannot embed.
    pub fn add_media(&mut self, data: Vec<u8>) -> Result<usize> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| {
            OoxmlError::InvalidFormat("unsupported or unrecognised image data".to_string())
        })?;
        self.media.push(Media {
            data: Arc::new(data),
            format,
        });
        Ok(self.media.len() - 1)
    }

    /// Get the embedded media.
    pub fn media(&self) -> &[Media] {
        &self.media
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Title text of the first title-layout slide.
    pub fn first_title(&self) -> Option<&str> {
        self.slides
            .iter()
            .filter(|s| s.layout() == SlideLayout::TitleSlide)
            .find_map(MutableSlide::title)
    }

    /// Number of slides carrying speaker notes.
    pub fn notes_count(&self) -> usize {
        self.slides.iter().filter(|s| s.has_notes()).count()
    }

    /// Generate presentation.xml content with actual relationship IDs.
    ///
    /// # Arguments
    /// * `master_rel_id` - relationship ID of the slide master
    /// * `notes_master_rel_id` - relationship ID of the notes master
    /// * `slide_rel_ids` - one relationship ID per slide, in slide order
    pub(crate) fn generate_presentation_xml_with_rels(
        &self,
        master_rel_id: &str,
        notes_master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "{} slide relationships for {} slides",
                slide_rel_ids.len(),
                self.slides.len()
            )));
        }

        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(xml, r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#, master_rel_id)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:sldMasterIdLst>");

        xml.push_str("<p:notesMasterIdLst>");
        write!(xml, r#"<p:notesMasterId r:id="{}"/>"#, notes_master_rel_id)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:notesMasterIdLst>");

        // Write slide ID list
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        // Write slide size
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::writer::shape::Frame;

    fn widescreen() -> MutablePresentation {
        MutablePresentation::new(12_191_695, 6_858_000)
    }

    #[test]
    fn test_create_presentation() {
        let pres = widescreen();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 12_191_695);
        assert_eq!(pres.slide_height(), 6_858_000);
        assert_eq!(pres.first_title(), None);
    }

    #[test]
    fn test_slide_ids_and_titles() {
        let mut pres = widescreen();
        pres.add_slide(SlideLayout::TitleSlide)
            .set_title("Deck", Frame::default());
        pres.add_slide(SlideLayout::TitleAndContent);
        assert_eq!(pres.slide(1).map(MutableSlide::slide_id), Some(257));
        assert_eq!(pres.first_title(), Some("Deck"));
    }

    #[test]
    fn test_first_title_skips_content_slides() {
        let mut pres = widescreen();
        pres.add_slide(SlideLayout::TitleAndContent)
            .set_title("Contents", Frame::default());
        assert_eq!(pres.first_title(), None);

        pres.add_slide(SlideLayout::TitleSlide)
            .set_title("Late title", Frame::default());
        assert_eq!(pres.first_title(), Some("Late title"));
    }

    #[test]
    fn test_add_media_rejects_unknown_data() {
        let mut pres = widescreen();
        assert_eq!(pres.add_media(vec![0x89, b'P', b'N', b'G', 0, 0]).unwrap(), 0);
        assert!(matches!(
            pres.add_media(b"<svg/>".to_vec()),
            Err(OoxmlError::InvalidFormat(_))
        ));
        assert_eq!(pres.media().len(), 1);
        assert_eq!(pres.media()[0].format(), ImageFormat::Png);
    }

    #[test]
    fn test_xml_generation() {
        let mut pres = widescreen();
        pres.add_slide(SlideLayout::TitleSlide)
            .set_title("Test", Frame::default());

        let xml = pres
            .generate_presentation_xml_with_rels("rId1", "rId2", &["rId3".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));
        assert!(xml.contains(r#"<p:notesMasterId r:id="rId2"/>"#));

        assert!(pres.generate_presentation_xml_with_rels("rId1", "rId2", &[]).is_err());
    }
}
