/// Typed blocks produced by the Markdown scanner.
///
/// A [`Document`] is the ordered sequence of [`Block`]s found in one input file.
/// Block order follows the order of the lines that started each block and decides
/// the order of the generated slides.
use std::fmt;

/// Discriminant of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    List,
    Paragraph,
    Code,
    Image,
    Table,
    Notes,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heading => "heading",
            Self::List => "list",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Image => "image",
            Self::Table => "table",
            Self::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// One structural unit of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`-prefixed heading, level 1 through 6.
    Heading { level: u8, text: String },
    /// Raw list item lines (markers included, trailing whitespace removed).
    List { lines: Vec<String> },
    /// Paragraph lines; an empty entry marks a blank line inside the paragraph.
    Paragraph { lines: Vec<String> },
    /// Fenced code, lines kept verbatim.
    Code {
        lines: Vec<String>,
        lang: Option<String>,
    },
    /// Standalone `![alt](path)` reference.
    Image { alt: String, path: String },
    /// Raw `|...|` row lines, separator rows included.
    Table { rows: Vec<String> },
    /// Speaker-notes lines found between the notes markers.
    Notes { lines: Vec<String> },
}

impl Block {
    /// Get the block discriminant.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { .. } => BlockKind::Heading,
            Self::List { .. } => BlockKind::List,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Code { .. } => BlockKind::Code,
            Self::Image { .. } => BlockKind::Image,
            Self::Table { .. } => BlockKind::Table,
            Self::Notes { .. } => BlockKind::Notes,
        }
    }

    /// Heading level, or `None` for every other kind.
    pub fn level(&self) -> Option<u8> {
        match self {
            Self::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Code fence language tag, or `None` when absent or not a code block.
    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::Code { lang, .. } => lang.as_deref(),
            _ => None,
        }
    }

    /// Append a line to a multi-line block.
    ///
    /// Headings and images are single-line blocks and ignore appends.
    pub(crate) fn push_line(&mut self, line: &str) {
        match self {
            Self::List { lines }
            | Self::Paragraph { lines }
            | Self::Code { lines, .. }
            | Self::Notes { lines } => lines.push(line.to_string()),
            Self::Table { rows } => rows.push(line.to_string()),
            Self::Heading { .. } | Self::Image { .. } => {},
        }
    }
}

/// An ordered sequence of blocks parsed from one Markdown input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document from already-scanned blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Get all blocks in document order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterate over the blocks in document order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Get the number of blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_accessors() {
        let heading = Block::Heading {
            level: 2,
            text: "Setup".to_string(),
        };
        assert_eq!(heading.kind(), BlockKind::Heading);
        assert_eq!(heading.level(), Some(2));
        assert_eq!(heading.lang(), None);

        let code = Block::Code {
            lines: vec![],
            lang: Some("rust".to_string()),
        };
        assert_eq!(code.lang(), Some("rust"));
        assert_eq!(code.level(), None);
    }

    #[test]
    fn test_push_line_ignores_single_line_blocks() {
        let mut image = Block::Image {
            alt: "a".to_string(),
            path: "b.png".to_string(),
        };
        image.push_line("ignored");
        assert_eq!(
            image,
            Block::Image {
                alt: "a".to_string(),
                path: "b.png".to_string()
            }
        );

        let mut table = Block::Table { rows: vec![] };
        table.push_line("| a |");
        assert_eq!(
            table,
            Block::Table {
                rows: vec!["| a |".to_string()]
            }
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BlockKind::Paragraph.to_string(), "paragraph");
        assert_eq!(BlockKind::Notes.to_string(), "notes");
    }
}
