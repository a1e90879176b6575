/// Normalisation of block content into slide text.
///
/// These helpers turn the raw lines kept in [`Block`](super::Block)s into the
/// strings shown on slides: list markers are removed, paragraph lines are joined
/// and table rows are split into cells with separator rows dropped.
use super::classify::{list_item_text, table_row_body};

/// Strip list markers from raw list lines.
///
/// Nested items are flattened; lines that are not list items are skipped.
///
/// # Examples
///
/// ```rust
/// use slidemark::markdown::normalize_bullets;
///
/// let lines = vec!["- first".to_string(), "  * nested".to_string(), "3. third".to_string()];
/// assert_eq!(normalize_bullets(&lines), vec!["first", "nested", "third"]);
/// ```
pub fn normalize_bullets(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| list_item_text(line.trim()))
        .map(str::to_string)
        .collect()
}

/// Join paragraph lines with single spaces, skipping the blank-line markers.
///
/// Returns `None` when nothing but blank lines remain.
pub fn paragraph_text(lines: &[String]) -> Option<String> {
    let text = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Check whether a row's cells are all made of `-`, `:` and spaces, i.e. the
/// header separator of a Markdown table.
///
/// Cells that are entirely empty count as separator cells too.
pub fn is_separator_row(cells: &[String]) -> bool {
    cells
        .iter()
        .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':' | ' ')))
}

/// Split raw table lines into rows of trimmed cells, dropping separator rows.
///
/// # Examples
///
/// ```rust
/// use slidemark::markdown::parse_table_lines;
///
/// let lines = vec![
///     "| a | b |".to_string(),
///     "|---|:-:|".to_string(),
///     "| c | d |".to_string(),
/// ];
/// assert_eq!(parse_table_lines(&lines), vec![vec!["a", "b"], vec!["c", "d"]]);
/// ```
pub fn parse_table_lines(lines: &[String]) -> Vec<Vec<String>> {
    lines
        .iter()
        .filter_map(|line| table_row_body(line))
        .map(|body| {
            body.split('|')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !is_separator_row(cells))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_bullets_skips_non_items() {
        let lines = owned(&["- a  ", "not an item", "+ b", "10. c"]);
        assert_eq!(normalize_bullets(&lines), owned(&["a", "b", "c"]));
    }

    #[test]
    fn test_paragraph_text_joins_lines() {
        let lines = owned(&["first line", "  second", "", "third"]);
        assert_eq!(
            paragraph_text(&lines),
            Some("first line second third".to_string())
        );
        assert_eq!(paragraph_text(&owned(&["", ""])), None);
    }

    #[test]
    fn test_table_header_and_data_rows() {
        let lines = owned(&["| a | b |", "|---|---|", "| c | d |"]);
        let rows = parse_table_lines(&lines);
        assert_eq!(rows, vec![owned(&["a", "b"]), owned(&["c", "d"])]);
        assert!(rows.iter().all(|r| !is_separator_row(r)));
    }

    #[test]
    fn test_only_separator_rows_yield_nothing() {
        let lines = owned(&["|---|---|", "| :-- | --: |", "|   |   |"]);
        assert!(parse_table_lines(&lines).is_empty());
    }

    #[test]
    fn test_ragged_rows_are_kept_as_is() {
        let lines = owned(&["| a | b | c |", "| d |"]);
        assert_eq!(
            parse_table_lines(&lines),
            vec![owned(&["a", "b", "c"]), owned(&["d"])]
        );
    }
}
