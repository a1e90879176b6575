/// Slide types and implementation for PPTX presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::template::SlideLayout;

use super::shape::{Frame, MutableShape, PlaceholderKind, TextFormat, write_paragraphs};

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    /// Layout the slide is based on
    pub(crate) layout: SlideLayout,
    /// Shapes on the slide, in z-order
    pub(crate) shapes: Vec<MutableShape>,
    /// Speaker notes for the slide
    pub(crate) notes: Option<String>,
}

impl MutableSlide {
    /// Create a new empty slide.
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        Self {
            slide_id,
            layout,
            shapes: Vec::new(),
            notes: None,
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Get the layout of the slide.
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    // Group shape uses id=1
    fn next_shape_id(&self) -> u32 {
        self.shapes.len() as u32 + 2
    }

    /// Fill the layout's title placeholder.
    pub fn set_title(&mut self, title: &str, frame: Frame) {
        let kind = match self.layout {
            SlideLayout::TitleSlide => PlaceholderKind::CenteredTitle,
            _ => PlaceholderKind::Title,
        };
        let shape = MutableShape::new_placeholder(
            self.next_shape_id(),
            kind,
            vec![title.to_string()],
            frame,
        );
        self.shapes.push(shape);
    }

    /// Get the slide title.
    pub fn title(&self) -> Option<&str> {
        self.shapes.iter().find_map(|shape| match &shape.shape_type {
            super::shape::ShapeType::Placeholder {
                kind: PlaceholderKind::Title | PlaceholderKind::CenteredTitle,
                paragraphs,
            } => paragraphs.first().map(String::as_str),
            _ => None,
        })
    }

    /// Fill the content placeholder with one level-0 paragraph per item.
    pub fn set_body(&mut self, items: Vec<String>, frame: Frame) {
        let shape =
            MutableShape::new_placeholder(self.next_shape_id(), PlaceholderKind::Body, items, frame);
        self.shapes.push(shape);
    }

    /// Add a text box with one paragraph per line of `text`.
    pub fn add_text_box(&mut self, text: &str, format: TextFormat, frame: Frame) {
        let shape = MutableShape::new_text_box(self.next_shape_id(), text, format, frame);
        self.shapes.push(shape);
    }

    /// Add a picture referring to an entry of the presentation's media list.
    pub fn add_picture(&mut self, media_index: usize, description: &str, frame: Frame) {
        let shape = MutableShape::new_picture(self.next_shape_id(), media_index, description, frame);
        self.shapes.push(shape);
    }

    /// Add a table whose first row is the header.
    pub fn add_table(&mut self, rows: Vec<Vec<String>>, frame: Frame) {
        let shape = MutableShape::new_table(self.next_shape_id(), rows, frame);
        self.shapes.push(shape);
    }

    /// The title placeholder shape.
    pub fn title_shape_mut(&mut self) -> Option<&mut MutableShape> {
        self.shapes.iter_mut().find(|shape| {
            matches!(
                shape.placeholder(),
                Some(PlaceholderKind::Title | PlaceholderKind::CenteredTitle)
            )
        })
    }

    /// The content placeholder, or the first text box.
    pub fn body_shape_mut(&mut self) -> Option<&mut MutableShape> {
        self.shapes.iter_mut().find(|shape| {
            shape.placeholder() == Some(PlaceholderKind::Body) || shape.is_text_box()
        })
    }

    /// The first table on the slide.
    pub fn table_mut(&mut self) -> Option<&mut MutableShape> {
        self.shapes.iter_mut().find(|shape| shape.is_table())
    }

    /// Set the speaker notes, replacing earlier notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = Some(notes.to_string());
    }

    /// Get the speaker notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Check if the slide has notes.
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Get the number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Media indices of the pictures on this slide, in shape order.
    pub(crate) fn media_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.shapes.iter().filter_map(MutableShape::media_index)
    }

    /// Generate slide XML content.
    ///
    /// `image_rel_ids` holds one relationship ID per picture, in shape order.
    pub(crate) fn to_xml_with_rels(&self, image_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);

        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_properties(&mut xml);

        let mut images = image_rel_ids.iter();
        for shape in &self.shapes {
            let rel_id = match shape.media_index() {
                Some(_) => Some(images.next().ok_or_else(|| {
                    OoxmlError::Xml(format!("slide {} is missing an image relationship", self.slide_id))
                })?),
                None => None,
            };
            shape.to_xml(&mut xml, rel_id.map(String::as_str))?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Generate notes slide XML content.
    pub(crate) fn generate_notes_xml(&self) -> Option<Result<String>> {
        let notes_text = self.notes.as_ref()?;

        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);

        xml.push_str(
            r#"<p:notes xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_properties(&mut xml);

        // Slide thumbnail
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr>");
        xml.push_str("<p:spPr/>");
        xml.push_str("</p:sp>");

        // Notes text shape
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        let paragraphs: Vec<String> = notes_text.split('\n').map(str::to_string).collect();
        if let Err(e) = write_paragraphs(&mut xml, &paragraphs, &TextFormat::default()) {
            return Some(Err(e));
        }
        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:notes>");

        Some(Ok(xml))
    }
}

/// Write the group shape properties every shape tree starts with.
fn write_group_properties(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str("<a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/>"#);
    xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
    xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm>");
    xml.push_str("</p:grpSpPr>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(457_200, 228_600, 11_277_600, 914_400)
    }

    #[test]
    fn test_title_slide_uses_centered_title() {
        let mut slide = MutableSlide::new(256, SlideLayout::TitleSlide);
        slide.set_title("Quarterly Review", frame());

        assert_eq!(slide.title(), Some("Quarterly Review"));
        let xml = slide.to_xml_with_rels(&[]).unwrap();
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="Title 1"/>"#));
    }

    #[test]
    fn test_style_targets() {
        let mut slide = MutableSlide::new(257, SlideLayout::TitleOnly);
        slide.set_title("Code", frame());
        assert!(slide.body_shape_mut().is_none());
        slide.add_text_box("let x = 1;", TextFormat::monospace("Consolas", 11.0), frame());

        assert!(slide.title_shape_mut().is_some());
        assert!(slide.body_shape_mut().is_some_and(|s| s.is_text_box()));
        assert!(slide.table_mut().is_none());
        assert_eq!(slide.shape_count(), 2);
    }

    #[test]
    fn test_picture_relationships_in_order() {
        let mut slide = MutableSlide::new(258, SlideLayout::TitleOnly);
        slide.set_title("Diagram", frame());
        slide.add_picture(0, "a.png", frame());
        slide.add_picture(1, "b.png", frame());

        assert_eq!(slide.media_indices().collect::<Vec<_>>(), vec![0, 1]);
        assert!(slide.to_xml_with_rels(&["rId2".to_string()]).is_err());

        let xml = slide
            .to_xml_with_rels(&["rId2".to_string(), "rId3".to_string()])
            .unwrap();
        let first = xml.find(r#"r:embed="rId2""#).unwrap();
        let second = xml.find(r#"r:embed="rId3""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_notes_xml() {
        let mut slide = MutableSlide::new(259, SlideLayout::TitleAndContent);
        assert!(slide.generate_notes_xml().is_none());

        slide.set_notes("first\nsecond & third");
        slide.set_notes("say this\nthen that & more");
        let xml = slide.generate_notes_xml().unwrap().unwrap();
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<a:t>say this</a:t>"));
        assert!(xml.contains("<a:t>then that &amp; more</a:t>"));
        assert!(!xml.contains("first"));
    }
}
