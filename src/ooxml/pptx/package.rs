/// Package assembly for PowerPoint presentations.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, PackageWriter, Part, XmlPart};
use crate::ooxml::pptx::template::{self, SlideLayout};
use crate::ooxml::pptx::writer::MutablePresentation;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const SLIDE_MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const NOTES_MASTER_URI: &str = "/ppt/notesMasters/notesMaster1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const NOTES_THEME_URI: &str = "/ppt/theme/theme2.xml";

/// A PowerPoint (.pptx) package ready to be written.
///
/// Wraps the OPC package assembled from a [`MutablePresentation`].
///
/// # Examples
///
/// ```rust
/// use slidemark::ooxml::pptx::{MutablePresentation, Package, SlideLayout};
/// use slidemark::ooxml::pptx::writer::shape::Frame;
///
/// let mut pres = MutablePresentation::new(12_192_000, 6_858_000);
/// pres.add_slide(SlideLayout::TitleSlide)
///     .set_title("Hello", Frame::new(1_524_000, 2_130_425, 9_144_000, 1_470_025));
///
/// let pkg = Package::from_presentation(&pres)?;
/// let bytes = pkg.to_bytes()?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Assemble every part of the deck.
    pub fn from_presentation(pres: &MutablePresentation) -> Result<Self> {
        let mut opc = OpcPackage::new();

        let pres_uri = PackURI::new(PRESENTATION_URI)?;
        let master_uri = PackURI::new(SLIDE_MASTER_URI)?;
        let notes_master_uri = PackURI::new(NOTES_MASTER_URI)?;
        let theme_uri = PackURI::new(THEME_URI)?;
        let notes_theme_uri = PackURI::new(NOTES_THEME_URI)?;

        let mut pres_part = XmlPart::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, "");
        let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);
        let notes_master_rel_id = pres_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);

        Self::add_masters(&mut opc, &master_uri, &notes_master_uri, &theme_uri, &notes_theme_uri)?;

        let media_uris = Self::add_media(&mut opc, pres)?;

        let mut slide_rel_ids = Vec::with_capacity(pres.slide_count());
        for (index, slide) in pres.slides.iter().enumerate() {
            let number = index + 1;
            let slide_uri = PackURI::new(format!("/ppt/slides/slide{number}.xml"))?;
            let layout_part = layout_uri(slide.layout())?;

            let mut slide_part = XmlPart::new(slide_uri.clone(), ct::PML_SLIDE, "");
            slide_part.relate_to(&layout_part, rt::SLIDE_LAYOUT);

            let mut image_rel_ids = Vec::new();
            for media_index in slide.media_indices() {
                let media_uri = media_uris.get(media_index).ok_or_else(|| {
                    OoxmlError::Other(format!(
                        "slide {number} refers to unknown media {media_index}"
                    ))
                })?;
                image_rel_ids.push(slide_part.relate_to(media_uri, rt::IMAGE));
            }

            if let Some(notes_xml) = slide.generate_notes_xml() {
                let notes_uri = PackURI::new(format!("/ppt/notesSlides/notesSlide{number}.xml"))?;
                let mut notes_part = XmlPart::new(notes_uri.clone(), ct::PML_NOTES_SLIDE, notes_xml?);
                notes_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);
                notes_part.relate_to(&slide_uri, rt::SLIDE);
                opc.add_part(Box::new(notes_part))?;
                slide_part.relate_to(&notes_uri, rt::NOTES_SLIDE);
            }

            slide_part.set_xml(slide.to_xml_with_rels(&image_rel_ids)?);
            opc.add_part(Box::new(slide_part))?;
            slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));
        }

        for (uri, content_type, reltype, xml) in [
            ("/ppt/presProps.xml", ct::PML_PRES_PROPS, rt::PRES_PROPS, template::default_pres_props_xml()),
            ("/ppt/viewProps.xml", ct::PML_VIEW_PROPS, rt::VIEW_PROPS, template::default_view_props_xml()),
            ("/ppt/tableStyles.xml", ct::PML_TABLE_STYLES, rt::TABLE_STYLES, template::default_table_styles_xml()),
        ] {
            let uri = PackURI::new(uri)?;
            pres_part.relate_to(&uri, reltype);
            opc.add_part(Box::new(XmlPart::new(uri, content_type, xml)))?;
        }
        pres_part.relate_to(&theme_uri, rt::THEME);

        pres_part.set_xml(pres.generate_presentation_xml_with_rels(
            &master_rel_id,
            &notes_master_rel_id,
            &slide_rel_ids,
        )?);
        opc.add_part(Box::new(pres_part))?;
        opc.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);

        Self::add_doc_props(&mut opc, pres)?;

        debug!(
            slides = pres.slide_count(),
            media = media_uris.len(),
            parts = opc.part_count(),
            "assembled presentation package"
        );
        Ok(Self { opc })
    }

    /// Slide master, its layouts, the notes master and their themes.
    fn add_masters(
        opc: &mut OpcPackage,
        master_uri: &PackURI,
        notes_master_uri: &PackURI,
        theme_uri: &PackURI,
        notes_theme_uri: &PackURI,
    ) -> Result<()> {
        let mut master = XmlPart::new(
            master_uri.clone(),
            ct::PML_SLIDE_MASTER,
            template::default_slide_master_xml(),
        );
        for layout in SlideLayout::ALL {
            let uri = layout_uri(layout)?;
            // rIds must match the master's sldLayoutIdLst
            master.relate_to(&uri, rt::SLIDE_LAYOUT);
            let mut part = XmlPart::new(uri, ct::PML_SLIDE_LAYOUT, layout.xml());
            part.relate_to(master_uri, rt::SLIDE_MASTER);
            opc.add_part(Box::new(part))?;
        }
        master.relate_to(theme_uri, rt::THEME);
        opc.add_part(Box::new(master))?;

        let mut notes_master = XmlPart::new(
            notes_master_uri.clone(),
            ct::PML_NOTES_MASTER,
            template::default_notes_master_xml(),
        );
        notes_master.relate_to(notes_theme_uri, rt::THEME);
        opc.add_part(Box::new(notes_master))?;

        for uri in [theme_uri, notes_theme_uri] {
            opc.add_part(Box::new(XmlPart::new(
                uri.clone(),
                ct::OFC_THEME,
                template::default_theme_xml(),
            )))?;
        }
        Ok(())
    }

    /// One media part per registered picture; returns their partnames by media index.
    fn add_media(opc: &mut OpcPackage, pres: &MutablePresentation) -> Result<Vec<PackURI>> {
        let mut uris = Vec::with_capacity(pres.media().len());
        for (index, media) in pres.media().iter().enumerate() {
            let uri = PackURI::new(format!(
                "/ppt/media/image{}.{}",
                index + 1,
                media.format.extension()
            ))?;
            opc.add_part(Box::new(BlobPart::new(
                uri.clone(),
                media.format.mime_type(),
                Arc::clone(&media.data),
            )))?;
            uris.push(uri);
        }
        Ok(uris)
    }

    /// Core and extended document properties.
    fn add_doc_props(opc: &mut OpcPackage, pres: &MutablePresentation) -> Result<()> {
        let core_uri = PackURI::new("/docProps/core.xml")?;
        opc.add_part(Box::new(XmlPart::new(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            create_core_xml(pres.first_title().unwrap_or("")),
        )))?;
        opc.relate_to(&core_uri, rt::CORE_PROPERTIES);

        let app_uri = PackURI::new("/docProps/app.xml")?;
        opc.add_part(Box::new(XmlPart::new(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            create_app_xml(pres.slide_count(), pres.notes_count()),
        )))?;
        opc.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);
        Ok(())
    }

    /// Get the underlying OPC package.
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(PackageWriter::to_bytes(&self.opc)?)
    }

    /// Write the package to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(PackageWriter::write(path, &self.opc)?)
    }
}

fn layout_uri(layout: SlideLayout) -> Result<PackURI> {
    Ok(PackURI::new(format!(
        "/ppt/slideLayouts/slideLayout{}.xml",
        layout.number()
    ))?)
}

/// Create core.xml content (Core Properties)
fn create_core_xml(title: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:title>{title}</dc:title>"#,
            r#"<dc:creator>slidemark</dc:creator>"#,
            r#"<cp:lastModifiedBy>slidemark</cp:lastModifiedBy>"#,
            r#"<cp:revision>1</cp:revision>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>"#,
            r#"</cp:coreProperties>"#
        ),
        title = escape_xml(title),
        ts = timestamp
    )
}

/// Create app.xml content (Extended Properties)
fn create_app_xml(slides: usize, notes: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            r#"<Application>slidemark</Application>"#,
            r#"<PresentationFormat>Custom</PresentationFormat>"#,
            r#"<Slides>{slides}</Slides>"#,
            r#"<Notes>{notes}</Notes>"#,
            r#"<HiddenSlides>0</HiddenSlides>"#,
            r#"<AppVersion>16.0000</AppVersion>"#,
            r#"</Properties>"#
        ),
        slides = slides,
        notes = notes
    )
}
