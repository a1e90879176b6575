//! Presentation template module.
//!
//! Static parts every generated deck carries: one slide master, the three
//! layouts the converter uses, a theme, the notes master and the small
//! presentation property parts.

/// Slide layouts in master order. Index + 1 is the layout's part number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// "Title Slide" with a centred title placeholder
    TitleSlide,
    /// "Title and Content" with a title and a body placeholder
    TitleAndContent,
    /// "Title Only"
    TitleOnly,
}

impl SlideLayout {
    pub const ALL: [SlideLayout; 3] = [Self::TitleSlide, Self::TitleAndContent, Self::TitleOnly];

    /// 1-based number used in the layout's partname.
    pub fn number(self) -> usize {
        match self {
            Self::TitleSlide => 1,
            Self::TitleAndContent => 2,
            Self::TitleOnly => 3,
        }
    }

    /// Layout part XML.
    pub fn xml(self) -> &'static str {
        match self {
            Self::TitleSlide => include_str!("../../../resources/slideLayouts/slideLayout1.xml"),
            Self::TitleAndContent => {
                include_str!("../../../resources/slideLayouts/slideLayout2.xml")
            },
            Self::TitleOnly => include_str!("../../../resources/slideLayouts/slideLayout3.xml"),
        }
    }
}

/// Slide master with title and body placeholders and the text styles.
pub fn default_slide_master_xml() -> &'static str {
    include_str!("../../../resources/slideMaster1.xml")
}

/// Notes master, required once any slide carries notes.
pub fn default_notes_master_xml() -> &'static str {
    include_str!("../../../resources/notesMaster1.xml")
}

/// Office theme shared by the slide master and the notes master.
pub fn default_theme_xml() -> &'static str {
    include_str!("../../../resources/theme/theme1.xml")
}

pub fn default_table_styles_xml() -> &'static str {
    include_str!("../../../resources/tableStyles.xml")
}

pub fn default_view_props_xml() -> &'static str {
    include_str!("../../../resources/viewProps.xml")
}

pub fn default_pres_props_xml() -> &'static str {
    include_str!("../../../resources/presProps.xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_names() {
        assert!(SlideLayout::TitleSlide.xml().contains(r#"name="Title Slide""#));
        assert!(SlideLayout::TitleAndContent.xml().contains(r#"name="Title and Content""#));
        assert!(SlideLayout::TitleOnly.xml().contains(r#"name="Title Only""#));
    }

    #[test]
    fn test_master_lists_every_layout() {
        let master = default_slide_master_xml();
        for layout in SlideLayout::ALL {
            assert!(master.contains(&format!(r#"r:id="rId{}""#, layout.number())));
        }
    }
}
