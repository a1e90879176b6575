/// Shape types and implementation for PPTX presentations.
use crate::common::xml::escape_xml;
use crate::common::unit::pt_to_font_size;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::{BodyFormat, TextFormat};

/// Built-in "Medium Style 2 - Accent 1" table style.
const TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

/// Position and extent of a shape in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    fn write_xfrm(&self, xml: &mut String, prefix: &str) -> Result<()> {
        write!(
            xml,
            r#"<{prefix}:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{prefix}:xfrm>"#,
            self.x, self.y, self.cx, self.cy
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))
    }
}

/// Layout placeholders a slide may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `ctrTitle` on the title slide layout
    CenteredTitle,
    /// `title` on every other layout
    Title,
    /// The content placeholder, `idx="1"`
    Body,
}

impl PlaceholderKind {
    fn ph_xml(self) -> &'static str {
        match self {
            Self::CenteredTitle => r#"<p:ph type="ctrTitle"/>"#,
            Self::Title => r#"<p:ph type="title"/>"#,
            Self::Body => r#"<p:ph idx="1"/>"#,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::CenteredTitle | Self::Title => "Title",
            Self::Body => "Content Placeholder",
        }
    }
}

/// A shape on a slide (placeholder, text box, picture or table).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    /// Position and size
    pub(crate) frame: Frame,
    /// Text frame settings of the shape, or of every cell for tables
    pub(crate) body: BodyFormat,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    Placeholder {
        kind: PlaceholderKind,
        paragraphs: Vec<String>,
    },
    TextBox {
        paragraphs: Vec<String>,
        format: TextFormat,
    },
    Picture {
        /// Index of the picture in the presentation's media list
        media_index: usize,
        description: String,
    },
    Table {
        rows: Vec<Vec<String>>,
        columns: usize,
    },
}

impl MutableShape {
    pub(crate) fn new_placeholder(
        shape_id: u32,
        kind: PlaceholderKind,
        paragraphs: Vec<String>,
        frame: Frame,
    ) -> Self {
        Self {
            shape_id,
            frame,
            body: BodyFormat::default(),
            shape_type: ShapeType::Placeholder { kind, paragraphs },
        }
    }

    pub(crate) fn new_text_box(
        shape_id: u32,
        text: &str,
        format: TextFormat,
        frame: Frame,
    ) -> Self {
        Self {
            shape_id,
            frame,
            body: BodyFormat {
                word_wrap: Some(true),
                ..BodyFormat::default()
            },
            shape_type: ShapeType::TextBox {
                paragraphs: text.split('\n').map(str::to_string).collect(),
                format,
            },
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        media_index: usize,
        description: &str,
        frame: Frame,
    ) -> Self {
        Self {
            shape_id,
            frame,
            body: BodyFormat::default(),
            shape_type: ShapeType::Picture {
                media_index,
                description: description.to_string(),
            },
        }
    }

    /// Create a table. Short rows are padded with empty cells up to the widest row.
    pub(crate) fn new_table(shape_id: u32, mut rows: Vec<Vec<String>>, frame: Frame) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut rows {
            row.resize(columns, String::new());
        }
        Self {
            shape_id,
            frame,
            body: BodyFormat::default(),
            shape_type: ShapeType::Table { rows, columns },
        }
    }

    /// Width of the shape in EMUs.
    #[inline]
    pub fn width(&self) -> i64 {
        self.frame.cx
    }

    /// Width of one table column in EMUs, or the shape width for other shapes.
    pub fn text_width(&self) -> i64 {
        match &self.shape_type {
            ShapeType::Table { columns, .. } => self.frame.cx / *columns as i64,
            _ => self.frame.cx,
        }
    }

    /// Placeholder kind, if this shape fills a layout placeholder.
    pub fn placeholder(&self) -> Option<PlaceholderKind> {
        match &self.shape_type {
            ShapeType::Placeholder { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_text_box(&self) -> bool {
        matches!(self.shape_type, ShapeType::TextBox { .. })
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self.shape_type, ShapeType::Table { .. })
    }

    /// Media index if this shape is a picture.
    pub(crate) fn media_index(&self) -> Option<usize> {
        match &self.shape_type {
            ShapeType::Picture { media_index, .. } => Some(*media_index),
            _ => None,
        }
    }

    /// Replace the text frame settings.
    pub fn set_body_format(&mut self, body: BodyFormat) {
        self.body = body;
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their media part.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::Placeholder { kind, paragraphs } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{} {}"/>"#,
                    self.shape_id,
                    kind.name(),
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                write!(xml, "<p:nvPr>{}</p:nvPr>", kind.ph_xml())
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                self.frame.write_xfrm(xml, "a")?;
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                write_body_pr(xml, &self.body)?;
                xml.push_str("<a:lstStyle/>");
                write_paragraphs(xml, paragraphs, &TextFormat::default())?;
                xml.push_str("</p:txBody></p:sp>");
            },
            ShapeType::TextBox { paragraphs, format } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

                xml.push_str("<p:spPr>");
                self.frame.write_xfrm(xml, "a")?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                write_body_pr(xml, &self.body)?;
                xml.push_str("<a:lstStyle/>");
                write_paragraphs(xml, paragraphs, format)?;
                xml.push_str("</p:txBody></p:sp>");
            },
            ShapeType::Picture { description, .. } => {
                let rid = rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!("picture {} has no relationship", self.shape_id))
                })?;
                xml.push_str("<p:pic><p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_xml(description)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/></p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill>");

                xml.push_str("<p:spPr>");
                self.frame.write_xfrm(xml, "a")?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr></p:pic>");
            },
            ShapeType::Table { rows, columns } => self.write_table(xml, rows, *columns)?,
        }

        Ok(())
    }

    fn write_table(&self, xml: &mut String, rows: &[Vec<String>], columns: usize) -> Result<()> {
        xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Table {}"/>"#,
            self.shape_id,
            self.shape_id - 1
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str(
            r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/>"#,
        );
        xml.push_str("</p:nvGraphicFramePr>");
        self.frame.write_xfrm(xml, "p")?;

        xml.push_str("<a:graphic>");
        xml.push_str(r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#);
        xml.push_str("<a:tbl>");
        write!(
            xml,
            r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
            TABLE_STYLE_ID
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        // The last column absorbs the rounding remainder
        let col_width = self.frame.cx / columns as i64;
        xml.push_str("<a:tblGrid>");
        for col in 0..columns {
            let width = if col + 1 == columns {
                self.frame.cx - col_width * (columns as i64 - 1)
            } else {
                col_width
            };
            write!(xml, r#"<a:gridCol w="{}"/>"#, width)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("</a:tblGrid>");

        let row_height = self.frame.cy / rows.len().max(1) as i64;
        for row in rows {
            write!(xml, r#"<a:tr h="{}">"#, row_height)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            for cell in row {
                xml.push_str("<a:tc><a:txBody>");
                write_body_pr(xml, &self.body)?;
                xml.push_str("<a:lstStyle/>");
                write_paragraphs(xml, std::slice::from_ref(cell), &TextFormat::default())?;
                xml.push_str("</a:txBody>");
                xml.push_str("<a:tcPr");
                if let Some(left) = self.body.inset_left {
                    write!(xml, r#" marL="{}""#, left)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
                if let Some(right) = self.body.inset_right {
                    write!(xml, r#" marR="{}""#, right)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
                xml.push_str("/></a:tc>");
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
        Ok(())
    }
}

/// Write `a:bodyPr`; insets only appear once styling set them.
fn write_body_pr(xml: &mut String, body: &BodyFormat) -> Result<()> {
    xml.push_str("<a:bodyPr");
    match body.word_wrap {
        Some(true) => xml.push_str(r#" wrap="square""#),
        Some(false) => xml.push_str(r#" wrap="none""#),
        None => {},
    }
    if let Some(left) = body.inset_left {
        write!(xml, r#" lIns="{}""#, left).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(right) = body.inset_right {
        write!(xml, r#" rIns="{}""#, right).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if body.shrink_to_fit {
        xml.push_str("><a:normAutofit/></a:bodyPr>");
    } else {
        xml.push_str("/>");
    }
    Ok(())
}

/// One `a:p` per entry; empty entries become empty paragraphs.
pub(crate) fn write_paragraphs(xml: &mut String, paragraphs: &[String], format: &TextFormat) -> Result<()> {
    let mut rpr = String::from(r#"lang="en-US""#);
    if let Some(size) = format.size {
        write!(rpr, r#" sz="{}""#, pt_to_font_size(size))
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if format.bold {
        rpr.push_str(r#" b="1""#);
    }
    rpr.push_str(r#" dirty="0""#);

    let fonts = match format.font {
        Some(ref font) => {
            let font = escape_xml(font);
            format!(r#"<a:latin typeface="{font}"/><a:cs typeface="{font}"/>"#)
        },
        None => String::new(),
    };

    if paragraphs.is_empty() {
        write!(xml, "<a:p><a:endParaRPr {rpr}/></a:p>").map_err(|e| OoxmlError::Xml(e.to_string()))?;
        return Ok(());
    }

    for text in paragraphs {
        let written = if text.is_empty() {
            write!(xml, "<a:p><a:endParaRPr {rpr}/></a:p>")
        } else if fonts.is_empty() {
            write!(xml, "<a:p><a:r><a:rPr {rpr}/><a:t>{}</a:t></a:r></a:p>", escape_xml(text))
        } else {
            write!(
                xml,
                "<a:p><a:r><a:rPr {rpr}>{fonts}</a:rPr><a:t>{}</a:t></a:r></a:p>",
                escape_xml(text)
            )
        };
        written.map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    Ok(())
}
