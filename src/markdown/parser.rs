/// Block accumulation over classified lines.
///
/// Parsing is a single forward fold: [`step`] takes the current [`ParserState`]
/// by value together with one line (and a one-line lookahead used to close
/// tables) and returns the next state plus the block that the line closed, if
/// any. Only the block held in [`ParserState::open`] can still grow; once a
/// block is returned it is never touched again.
///
/// Nothing here fails. Unterminated fences or notes simply leave their block
/// open until the end of input, where [`finish`] hands it out as is.
use super::block::{Block, Document};
use super::classify::{LineKind, ScanState, classify_line, is_table_row};

/// Scanner state threaded through the fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Flags for the line classifier
    pub scan: ScanState,
    /// The most recent block, still accepting lines
    pub open: Option<Block>,
}

impl ParserState {
    /// Create the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the open block, handing out the previous one.
    fn open_new(self, block: Block) -> (Self, Option<Block>) {
        let closed = self.open;
        (
            Self {
                scan: self.scan,
                open: Some(block),
            },
            closed,
        )
    }

    /// Append a line to the open block when it has the wanted kind, otherwise
    /// open a fresh block holding just that line.
    fn merge_or_open(
        mut self,
        line: &str,
        wanted: fn(&Block) -> bool,
        fresh: fn() -> Block,
    ) -> (Self, Option<Block>) {
        match self.open.as_mut() {
            Some(block) if wanted(block) => {
                block.push_line(line);
                (self, None)
            },
            _ => {
                let mut block = fresh();
                block.push_line(line);
                self.open_new(block)
            },
        }
    }

    /// Append a line to the open block, whatever its kind.
    fn append(mut self, line: &str) -> (Self, Option<Block>) {
        if let Some(block) = self.open.as_mut() {
            block.push_line(line);
        }
        (self, None)
    }
}

/// Advance the fold by one line.
///
/// `next` is the following input line, or `None` at the end of input.
pub fn step(state: ParserState, line: &str, next: Option<&str>) -> (ParserState, Option<Block>) {
    let mut state = state;
    match classify_line(line, state.scan) {
        LineKind::NotesStart => {
            state.scan.in_notes = true;
            state.scan.in_table = false;
            state.open_new(Block::Notes { lines: Vec::new() })
        },
        LineKind::NotesInline(text) => {
            state.scan.in_notes = false;
            state.scan.in_table = false;
            let lines = if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            };
            state.open_new(Block::Notes { lines })
        },
        LineKind::NotesEnd => {
            state.scan.in_notes = false;
            (state, None)
        },
        LineKind::NotesLine(raw) | LineKind::CodeLine(raw) => state.append(raw),
        LineKind::FenceOpen { lang } => {
            state.scan.in_code = true;
            state.scan.in_table = false;
            state.open_new(Block::Code {
                lines: Vec::new(),
                lang: lang.map(str::to_string),
            })
        },
        LineKind::FenceClose => {
            state.scan.in_code = false;
            (state, None)
        },
        LineKind::Separator => {
            state.scan.in_table = false;
            (state, None)
        },
        LineKind::Blank => {
            state.scan.in_table = false;
            if matches!(state.open, Some(Block::Paragraph { .. })) {
                // paragraph break marker; the paragraph stays open
                return state.append("");
            }
            (state, None)
        },
        LineKind::Heading { level, text } => {
            state.scan.in_table = false;
            state.open_new(Block::Heading {
                level,
                text: text.to_string(),
            })
        },
        LineKind::Image { alt, path } => {
            state.scan.in_table = false;
            state.open_new(Block::Image {
                alt: alt.to_string(),
                path: path.to_string(),
            })
        },
        LineKind::TableRow(row) => {
            let continuing = state.scan.in_table
                && matches!(state.open, Some(Block::Table { .. }));
            // one-line lookahead: the table stays open only if the next line is a row
            state.scan.in_table = next.is_some_and(is_table_row);
            if continuing {
                state.append(row)
            } else {
                state.open_new(Block::Table {
                    rows: vec![row.to_string()],
                })
            }
        },
        LineKind::ListItem(item) => {
            state.scan.in_table = false;
            state.merge_or_open(
                item,
                |b| matches!(b, Block::List { .. }),
                || Block::List { lines: Vec::new() },
            )
        },
        LineKind::Text(text) => {
            state.scan.in_table = false;
            state.merge_or_open(
                text,
                |b| matches!(b, Block::Paragraph { .. }),
                || Block::Paragraph { lines: Vec::new() },
            )
        },
    }
}

/// End the fold, handing out the block that is still open.
pub fn finish(state: ParserState) -> Option<Block> {
    state.open
}

/// Parse a Markdown string into its block sequence.
///
/// # Examples
///
/// ```rust
/// use slidemark::markdown::{Block, parse_markdown};
///
/// let doc = parse_markdown("# Hi\n\n- a\n- b");
/// assert_eq!(doc.len(), 2);
/// assert_eq!(
///     doc.blocks()[1],
///     Block::List { lines: vec!["- a".to_string(), "- b".to_string()] }
/// );
/// ```
pub fn parse_markdown(md: &str) -> Document {
    let mut blocks = Vec::new();
    let mut state = ParserState::new();
    let mut lines = md.lines().peekable();

    while let Some(line) = lines.next() {
        let (next_state, closed) = step(state, line, lines.peek().copied());
        state = next_state;
        blocks.extend(closed);
    }
    blocks.extend(finish(state));

    Document::new(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::block::BlockKind;
    use proptest::prelude::*;

    fn kinds(doc: &Document) -> Vec<BlockKind> {
        doc.iter().map(Block::kind).collect()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_code_block_preserves_text() {
        let doc = parse_markdown("```rust\nfn main() {\n    println!(\"hi\");  \n}\n```\n");
        assert_eq!(
            doc.blocks(),
            &[Block::Code {
                lines: lines(&["fn main() {", "    println!(\"hi\");  ", "}"]),
                lang: Some("rust".to_string()),
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_keeps_captured_lines() {
        let doc = parse_markdown("## A\n```\nline one\n# still code");
        assert_eq!(kinds(&doc), vec![BlockKind::Heading, BlockKind::Code]);
        assert_eq!(
            doc.blocks()[1],
            Block::Code {
                lines: lines(&["line one", "# still code"]),
                lang: None,
            }
        );
    }

    #[test]
    fn test_list_lines_merge() {
        let doc = parse_markdown("- a\n- b\n\n* c\n1. d");
        assert_eq!(
            doc.blocks(),
            &[Block::List {
                lines: lines(&["- a", "- b", "* c", "1. d"])
            }]
        );
    }

    #[test]
    fn test_list_after_paragraph_starts_new_block() {
        let doc = parse_markdown("Intro text\n- a\n- b\nOutro");
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Paragraph, BlockKind::List, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_paragraph_blank_line_marker() {
        let doc = parse_markdown("first\nsecond\n\nthird\n");
        assert_eq!(
            doc.blocks(),
            &[Block::Paragraph {
                lines: lines(&["first", "second", "", "third"])
            }]
        );
    }

    #[test]
    fn test_separator_skipped() {
        let doc = parse_markdown("# T\n---\n## S\n---\n");
        assert_eq!(kinds(&doc), vec![BlockKind::Heading, BlockKind::Heading]);
    }

    #[test]
    fn test_separator_does_not_add_paragraph_break() {
        let doc = parse_markdown("one\n---\ntwo");
        assert_eq!(
            doc.blocks(),
            &[Block::Paragraph {
                lines: lines(&["one", "two"])
            }]
        );
    }

    #[test]
    fn test_headings_never_merge() {
        let doc = parse_markdown("# A\n# B\n#### C");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.blocks()[2].level(), Some(4));
    }

    #[test]
    fn test_table_rows_merge_until_non_row() {
        let doc = parse_markdown("| a | b |\n|---|---|\n| c | d |\ntext\n| e |");
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Table, BlockKind::Paragraph, BlockKind::Table]
        );
        assert_eq!(
            doc.blocks()[0],
            Block::Table {
                rows: lines(&["| a | b |", "|---|---|", "| c | d |"])
            }
        );
    }

    #[test]
    fn test_tables_split_by_blank_line() {
        let doc = parse_markdown("| a |\n\n| b |");
        assert_eq!(kinds(&doc), vec![BlockKind::Table, BlockKind::Table]);
    }

    #[test]
    fn test_image_block() {
        let doc = parse_markdown("![Arch](./docs/arch.png)");
        assert_eq!(
            doc.blocks(),
            &[Block::Image {
                alt: "Arch".to_string(),
                path: "./docs/arch.png".to_string()
            }]
        );
    }

    #[test]
    fn test_notes_block_excludes_markers() {
        let md = "## A\n<!-- SPEAKER_NOTES_START -->\nRemember this\n  - raw\n<!-- SPEAKER_NOTES_END -->\n- item";
        let doc = parse_markdown(md);
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Heading, BlockKind::Notes, BlockKind::List]
        );
        assert_eq!(
            doc.blocks()[1],
            Block::Notes {
                lines: lines(&["Remember this", "  - raw"])
            }
        );
    }

    #[test]
    fn test_unterminated_notes_absorb_rest() {
        let doc = parse_markdown("<!-- SPEAKER_NOTES_START\n# not heading\n```");
        assert_eq!(
            doc.blocks(),
            &[Block::Notes {
                lines: lines(&["# not heading", "```"])
            }]
        );
    }

    #[test]
    fn test_inline_notes() {
        let doc =
            parse_markdown("## A\n<!-- SPEAKER_NOTES_START Short note SPEAKER_NOTES_END -->\n- x");
        assert_eq!(
            doc.blocks()[1],
            Block::Notes {
                lines: lines(&["Short note"])
            }
        );
        assert_eq!(doc.blocks()[2].kind(), BlockKind::List);
    }

    #[test]
    fn test_step_emits_previous_block() {
        let state = ParserState::new();
        let (state, closed) = step(state, "- a", Some("## B"));
        assert!(closed.is_none());
        let (state, closed) = step(state, "## B", None);
        assert_eq!(
            closed,
            Some(Block::List {
                lines: lines(&["- a"])
            })
        );
        assert_eq!(
            finish(state),
            Some(Block::Heading {
                level: 2,
                text: "B".to_string()
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("\n\n---\n").is_empty());
    }

    proptest! {
        #[test]
        fn prop_parsing_is_deterministic(
            input in proptest::collection::vec(
                prop_oneof![
                    Just("# T".to_string()),
                    Just("## S".to_string()),
                    Just("- item".to_string()),
                    Just("```mermaid".to_string()),
                    Just("```".to_string()),
                    Just("| a | b |".to_string()),
                    Just("|---|---|".to_string()),
                    Just("---".to_string()),
                    Just(String::new()),
                    Just("<!-- SPEAKER_NOTES_START".to_string()),
                    Just("SPEAKER_NOTES_END -->".to_string()),
                    "[a-z !|#*-]{0,12}",
                ],
                0..40,
            )
        ) {
            let md = input.join("\n");
            prop_assert_eq!(parse_markdown(&md), parse_markdown(&md));
        }

        #[test]
        fn prop_code_lines_survive_verbatim(body in proptest::collection::vec("[a-z #|*-]{0,10}", 0..10)) {
            let body: Vec<String> = body
                .into_iter()
                .filter(|l| !l.trim().starts_with("```"))
                .collect();
            let md = format!("```\n{}\n```", body.join("\n"));
            let doc = parse_markdown(&md);
            let expected = if body.is_empty() { vec![String::new()] } else { body.clone() };
            prop_assert_eq!(
                doc.blocks(),
                &[Block::Code { lines: expected, lang: None }]
            );
        }
    }
}
