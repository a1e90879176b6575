//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into ZIP bytes, writing the [Content_Types].xml,
//! the package relationships and every part with its relationships.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Package writer that serializes an OPC package to a ZIP file.
///
/// # Example
///
/// ```
/// use slidemark::ooxml::opc::{OpcPackage, PackURI, XmlPart};
/// use slidemark::ooxml::opc::pkgwriter::PackageWriter;
///
/// let mut pkg = OpcPackage::new();
/// let name = PackURI::new("/docProps/app.xml")?;
/// pkg.add_part(Box::new(XmlPart::new(name, "application/xml", "<Properties/>")))?;
/// let bytes = PackageWriter::to_bytes(&pkg)?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        Self::write_content_types(&mut phys_writer, package)?;
        Self::write_pkg_rels(&mut phys_writer, package)?;
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    fn write_content_types(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        phys_writer.write(&PackURI::new(CONTENT_TYPES_URI)?, cti.to_xml().as_bytes())
    }

    fn write_pkg_rels(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let rels_uri = PackURI::new(PACKAGE_URI)?.rels_uri()?;
        phys_writer.write(&rels_uri, package.rels().to_xml().as_bytes())
    }

    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            if part.content_type().starts_with("image/") {
                phys_writer.write_stored(part.partname(), part.blob())?;
            } else {
                phys_writer.write(part.partname(), part.blob())?;
            }

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri()?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Well-known extensions get a Default element; everything else an Override.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, &'static str>,

    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), ct::XML);

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        match Self::default_content_type(&ext, content_type) {
            Some(default) => {
                self.defaults.insert(ext, default);
            },
            None => {
                self.overrides
                    .insert(partname.to_string(), content_type.to_string());
            },
        }
    }

    /// The Default mapping for an extension/content-type pair, if it is a standard one.
    fn default_content_type(ext: &str, content_type: &str) -> Option<&'static str> {
        match (ext, content_type) {
            ("rels", ct::OPC_RELATIONSHIPS) => Some(ct::OPC_RELATIONSHIPS),
            ("xml", ct::XML) => Some(ct::XML),
            ("png", ct::PNG) => Some(ct::PNG),
            ("jpg" | "jpeg", ct::JPEG) => Some(ct::JPEG),
            ("gif", ct::GIF) => Some(ct::GIF),
            ("bmp", ct::BMP) => Some(ct::BMP),
            ("tif" | "tiff", ct::TIFF) => Some(ct::TIFF),
            _ => None,
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );

        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
        }

        for (partname, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
        }

        xml.push_str("</Types>");
        xml
    }
}
