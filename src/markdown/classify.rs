//! Line classification for the Markdown scanner.
//!
//! [`classify_line`] looks at one input line together with the current
//! [`ScanState`] and decides which structural category the line starts or
//! continues. Checks run in a fixed priority order and the first match wins:
//!
//! 1. speaker-notes start marker (outside code)
//! 2. inside notes: end marker or a raw notes line
//! 3. code fence delimiter
//! 4. inside code: a raw code line
//! 5. `---` slide separator
//! 6. ATX heading (`#` through `######`)
//! 7. standalone image reference
//! 8. table row
//! 9. list item
//! 10. paragraph text
//! 11. blank line

/// Opening marker of a speaker-notes comment.
pub const NOTES_START_MARKER: &str = "<!-- SPEAKER_NOTES_START";
/// Closing marker of a speaker-notes comment.
pub const NOTES_END_MARKER: &str = "SPEAKER_NOTES_END -->";

const FENCE: &str = "```";

/// Scanner flags carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Between an opening and a closing code fence
    pub in_code: bool,
    /// Between the speaker-notes start and end markers
    pub in_notes: bool,
    /// The previous line was a table row and the current line continues the table
    pub in_table: bool,
}

/// The decision taken for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opens a speaker-notes block.
    NotesStart,
    /// Start and end markers on the same line, with the text between them.
    NotesInline(&'a str),
    /// Closes the open speaker-notes block.
    NotesEnd,
    /// Raw line inside a speaker-notes block.
    NotesLine(&'a str),
    /// Opening fence with its optional language tag.
    FenceOpen { lang: Option<&'a str> },
    /// Closing fence.
    FenceClose,
    /// Raw line inside a code block.
    CodeLine(&'a str),
    /// `---` horizontal rule; produces no block.
    Separator,
    /// ATX heading with its trimmed text.
    Heading { level: u8, text: &'a str },
    /// `![alt](path)` alone on its line.
    Image { alt: &'a str, path: &'a str },
    /// `|...|` table row (line with trailing whitespace removed).
    TableRow(&'a str),
    /// List item (line with trailing whitespace removed).
    ListItem(&'a str),
    /// Paragraph text (line with trailing whitespace removed).
    Text(&'a str),
    /// Empty or whitespace-only line.
    Blank,
}

/// Classify one line of input.
///
/// # Examples
///
/// ```rust
/// use slidemark::markdown::{LineKind, ScanState, classify_line};
///
/// let state = ScanState::default();
/// assert_eq!(
///     classify_line("## Setup", state),
///     LineKind::Heading { level: 2, text: "Setup" }
/// );
/// assert_eq!(classify_line("- item", state), LineKind::ListItem("- item"));
/// ```
pub fn classify_line(line: &str, state: ScanState) -> LineKind<'_> {
    let trimmed = line.trim();

    if !state.in_code && trimmed.starts_with(NOTES_START_MARKER) {
        if let Some(inner) = inline_notes(trimmed) {
            return LineKind::NotesInline(inner);
        }
        return LineKind::NotesStart;
    }

    if state.in_notes {
        if trimmed.ends_with(NOTES_END_MARKER) {
            return LineKind::NotesEnd;
        }
        return LineKind::NotesLine(line);
    }

    if trimmed.starts_with(FENCE) {
        if state.in_code {
            return LineKind::FenceClose;
        }
        let lang = trimmed.trim_matches('`').trim();
        return LineKind::FenceOpen {
            lang: (!lang.is_empty()).then_some(lang),
        };
    }

    if state.in_code {
        return LineKind::CodeLine(line);
    }

    if trimmed == "---" {
        return LineKind::Separator;
    }

    if let Some((level, text)) = parse_heading(line) {
        return LineKind::Heading { level, text };
    }

    if let Some((alt, path)) = parse_image(trimmed) {
        return LineKind::Image { alt, path };
    }

    if is_table_row(line) {
        return LineKind::TableRow(line.trim_end());
    }

    if list_item_text(trimmed).is_some() {
        return LineKind::ListItem(line.trim_end());
    }

    if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line.trim_end())
    }
}

/// Text between the notes markers when both sit on one line.
fn inline_notes(trimmed: &str) -> Option<&str> {
    let rest = &trimmed[NOTES_START_MARKER.len()..];
    let inner = rest.strip_suffix(NOTES_END_MARKER)?;
    Some(inner.trim())
}

/// Parse an ATX heading: one to six `#`, at least one whitespace, then the text.
///
/// The marker must start at the first column.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// Parse a standalone image reference `![alt](path)` from a trimmed line.
///
/// Anything after the closing parenthesis disqualifies the line.
fn parse_image(trimmed: &str) -> Option<(&str, &str)> {
    let body = trimmed.strip_prefix("![")?;
    let alt_end = body.find("](")?;
    let alt = &body[..alt_end];
    let rest = &body[alt_end + 2..];
    let path_end = rest.find(')')?;
    if !rest[path_end + 1..].is_empty() {
        return None;
    }
    Some((alt, &rest[..path_end]))
}

/// Check whether a line is a table row: its trimmed form is `|`, at least one
/// character, then `|`.
pub fn is_table_row(line: &str) -> bool {
    table_row_body(line).is_some()
}

/// The text between the outer pipes of a table row.
pub(crate) fn table_row_body(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return None;
    }
    trimmed.strip_prefix('|')?.strip_suffix('|')
}

/// Extract the item text of a list line: a `*`, `-`, `+` or `N.` marker followed by
/// whitespace.
///
/// Expects a trimmed line and returns the trimmed item text.
pub(crate) fn list_item_text(trimmed: &str) -> Option<&str> {
    let marker_len = match trimmed.as_bytes().first()? {
        b'*' | b'-' | b'+' => 1,
        b'0'..=b'9' => {
            let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
            if trimmed.as_bytes().get(digits) != Some(&b'.') {
                return None;
            }
            digits + 1
        },
        _ => return None,
    };
    let rest = &trimmed[marker_len..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}
