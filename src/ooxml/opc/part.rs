use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
/// Open Packaging Convention (OPC) objects related to package parts.
///
/// This module provides the Part trait and its two implementations. Parts are the
/// fundamental units of content in an OPC package, each with a unique partname,
/// a content type and optional relationships.
use std::sync::Arc;

/// Trait representing a part in an OPC package.
pub trait Part {
    /// Get the partname of this part.
    fn partname(&self) -> &PackURI;

    /// Get the content type of this part.
    fn content_type(&self) -> &str;

    /// Get the binary content of this part.
    fn blob(&self) -> &[u8];

    /// Get the relationships for this part.
    fn rels(&self) -> &Relationships;

    /// Get mutable access to the relationships for this part.
    fn rels_mut(&mut self) -> &mut Relationships;

    /// Add or get a relationship to another part and return its rId.
    ///
    /// The target is stored relative to this part's base URI.
    fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname().base_uri());
        self.rels_mut().get_or_add(reltype, &target_ref)
    }
}

/// A part holding binary content, such as an embedded picture.
///
/// The blob is shared via Arc so the same picture can back several parts
/// without copying.
#[derive(Debug)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Arc<Vec<u8>>,
    rels: Relationships,
}

impl BlobPart {
    /// Create a new BlobPart.
    pub fn new(partname: PackURI, content_type: impl Into<String>, blob: impl Into<Arc<Vec<u8>>>) -> Self {
        Self {
            partname,
            content_type: content_type.into(),
            blob: blob.into(),
            rels: Relationships::new(),
        }
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.blob
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// A part holding UTF-8 XML text.
#[derive(Debug)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    xml: String,
    rels: Relationships,
}

impl XmlPart {
    /// Create a new XmlPart from generated XML.
    pub fn new(partname: PackURI, content_type: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            partname,
            content_type: content_type.into(),
            xml: xml.into(),
            rels: Relationships::new(),
        }
    }

    /// Get the XML content as a string.
    #[inline]
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Replace the XML content.
    ///
    /// Lets a writer create relationships first and then emit XML that refers to them.
    pub fn set_xml(&mut self, xml: impl Into<String>) {
        self.xml = xml.into();
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        self.xml.as_bytes()
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};

    #[test]
    fn test_relate_to_uses_relative_reference() {
        let mut slide = XmlPart::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE,
            "<p:sld/>",
        );
        let layout = PackURI::new("/ppt/slideLayouts/slideLayout2.xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();

        assert_eq!(slide.relate_to(&layout, rt::SLIDE_LAYOUT), "rId1");
        assert_eq!(slide.relate_to(&image, rt::IMAGE), "rId2");
        assert_eq!(slide.relate_to(&layout, rt::SLIDE_LAYOUT), "rId1");
        assert_eq!(
            slide.rels().get("rId1").map(|r| r.target_ref()),
            Some("../slideLayouts/slideLayout2.xml")
        );
    }

    #[test]
    fn test_blob_part_shares_bytes() {
        let bytes = Arc::new(vec![0x89, b'P', b'N', b'G']);
        let part = BlobPart::new(
            PackURI::new("/ppt/media/image1.png").unwrap(),
            ct::PNG,
            Arc::clone(&bytes),
        );
        assert_eq!(part.blob(), bytes.as_slice());
        assert_eq!(Arc::strong_count(&bytes), 2);
        assert!(part.rels().is_empty());
    }
}
