use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// Control characters other than tab, newline and carriage return, and the
/// noncharacters U+FFFE and U+FFFF, are not legal in XML 1.0 and are dropped,
/// since Markdown input is arbitrary user text.
///
/// # Examples
///
/// ```
/// use slidemark::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let escaped = XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]);
    if escaped.chars().any(is_illegal_xml_char) {
        escaped.chars().filter(|c| !is_illegal_xml_char(*c)).collect()
    } else {
        escaped
    }
}

#[inline]
fn is_illegal_xml_char(c: char) -> bool {
    (c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
        || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_entities() {
        assert_eq!(escape_xml("'&'"), "&apos;&amp;&apos;");
    }

    #[test]
    fn test_escape_drops_control_characters() {
        assert_eq!(escape_xml("a\u{0007}b\tc"), "ab\tc");
    }

    #[test]
    fn test_escape_drops_noncharacters() {
        assert_eq!(escape_xml("x\u{FFFE}<y>\u{FFFF}"), "x&lt;y&gt;");
        assert_eq!(escape_xml("\u{FFFD}"), "\u{FFFD}");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_xml("Hello, World"), "Hello, World");
    }
}
