//! End-to-end conversion of Markdown files into `.pptx` packages.

use quick_xml::Reader;
use quick_xml::events::Event;
use slidemark::convert::Converter;
use slidemark::deck::{DeckOptions, SlideKind};
use slidemark::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

/// A valid 1x1 RGBA PNG.
const PIXEL_PNG: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const RELEASE_NOTES: &str = "\
# Release Notes & Plans

<!-- SPEAKER_NOTES_START
Welcome everyone
SPEAKER_NOTES_END -->

## Highlights
- Faster builds
* Smaller <binaries>

```rust
fn main() {}
```

![Logo](./img/logo.png)

![Chart](missing.png)

| Name | Value |
|------|-------|
| a | 1 |

```mermaid
graph TD; A-->B
```
";

fn converter() -> Converter {
    Converter::new(DeckOptions::default().with_diagrams(false))
}

/// Write `markdown` (and the logo) into a fresh directory and return it with the input path.
fn fixture(markdown: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("img")).unwrap();
    std::fs::write(dir.path().join("img/logo.png"), PIXEL_PNG).unwrap();
    let input = dir.path().join("talk.md");
    std::fs::write(&input, markdown).unwrap();
    (dir, input)
}

fn open(path: &Path) -> ZipArchive<File> {
    ZipArchive::new(File::open(path).unwrap()).unwrap()
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> String {
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut text)
        .unwrap();
    text
}

fn entries_with_prefix(archive: &ZipArchive<File>, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with(prefix) && !name.contains("_rels"))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0i32;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => panic!("{name} is not well-formed: {e}"),
        }
    }
    assert_eq!(depth, 0, "{name} has unbalanced elements");
}

#[test]
fn test_full_document() {
    let (dir, input) = fixture(RELEASE_NOTES);
    let output = dir.path().join("out/deck.pptx");

    let (summary, outline) = converter()
        .convert_file_with_outline(&input, &output)
        .unwrap();
    assert_eq!(summary.slides, 7);
    assert_eq!(summary.notes, 1);
    assert_eq!(summary.missing_images, 1);
    assert_eq!(summary.diagram_fallbacks, 1);

    let kinds: Vec<_> = outline.slides().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SlideKind::Title,
            SlideKind::Bullets,
            SlideKind::Code,
            SlideKind::Image,
            SlideKind::MissingImage,
            SlideKind::Table,
            SlideKind::Code,
        ]
    );
    assert_eq!(
        outline.titles(),
        vec![
            "Release Notes & Plans",
            "Highlights",
            "Code: Highlights",
            "Logo",
            "Chart",
            "Highlights",
            "Mermaid (code): Highlights",
        ]
    );

    let mut archive = open(&output);
    let slides = entries_with_prefix(&archive, "ppt/slides/slide");
    assert_eq!(slides.len(), 7);
    assert_eq!(
        entries_with_prefix(&archive, "ppt/notesSlides/"),
        vec!["ppt/notesSlides/notesSlide1.xml"]
    );
    assert_eq!(entries_with_prefix(&archive, "ppt/media/"), vec!["ppt/media/image1.png"]);

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for name in names.iter().filter(|n| n.ends_with(".xml") || n.ends_with(".rels")) {
        let xml = read_entry(&mut archive, name);
        assert_well_formed(name, &xml);
    }

    let bullets = read_entry(&mut archive, "ppt/slides/slide2.xml");
    assert!(bullets.contains("<a:t>Faster builds</a:t>"));
    assert!(bullets.contains("<a:t>Smaller &lt;binaries&gt;</a:t>"));

    let code = read_entry(&mut archive, "ppt/slides/slide3.xml");
    assert!(code.contains(r#"typeface="Consolas""#));
    assert!(code.contains("<a:t>fn main() {}</a:t>"));

    let missing = read_entry(&mut archive, "ppt/slides/slide5.xml");
    assert!(missing.contains("Image not found: "));
    assert!(missing.contains("missing.png"));

    let table = read_entry(&mut archive, "ppt/slides/slide6.xml");
    assert!(table.contains("<a:tbl>"));
    assert_eq!(table.matches("<a:tr ").count(), 2);

    let notes = read_entry(&mut archive, "ppt/notesSlides/notesSlide1.xml");
    assert!(notes.contains("<a:t>Welcome everyone</a:t>"));

    let core = read_entry(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Release Notes &amp; Plans</dc:title>"));

    let content_types = read_entry(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"Extension="png""#));
}

#[test]
fn test_picture_is_stored_uncompressed() {
    let (dir, input) = fixture("# Deck\n\n![Logo](img/logo.png)\n");
    let output = dir.path().join("deck.pptx");
    converter().convert_file(&input, &output).unwrap();

    let mut archive = open(&output);
    let media = archive.by_name("ppt/media/image1.png").unwrap();
    assert_eq!(media.compression(), zip::CompressionMethod::Stored);
    assert_eq!(media.size(), PIXEL_PNG.len() as u64);
}

#[test]
fn test_empty_document_still_opens() {
    let (dir, input) = fixture("");
    let output = dir.path().join("empty.pptx");
    let summary = converter().convert_file(&input, &output).unwrap();
    assert_eq!(summary.slides, 0);

    let mut archive = open(&output);
    assert!(entries_with_prefix(&archive, "ppt/slides/").is_empty());
    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert_well_formed("ppt/presentation.xml", &presentation);
    assert!(!presentation.contains("<p:sldIdLst>"));
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");
    let err = converter()
        .convert_file(dir.path().join("absent.md"), &output)
        .unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_options_file_is_honoured() {
    let (dir, input) = fixture("# One\n# Two\n- item\n");
    let config = dir.path().join("deck.yaml");
    std::fs::write(&config, "repeated_title: ignore\ndiagrams: false\n").unwrap();

    let options = DeckOptions::from_file(&config).unwrap();
    let outline = Converter::new(options).outline(&input).unwrap();
    assert_eq!(outline.titles(), vec!["One", "One"]);
}
