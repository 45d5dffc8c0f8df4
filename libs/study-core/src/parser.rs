//! Markdown parser for study notes.
//!
//! # Format
//! ```markdown
//! # Ancient Mesopotamia
//!
//! ## KEY TERMS
//! ### Ziggurat
//! A stepped temple built by the Sumerians.
//!
//! ## Review Questions
//! 1. Who wrote the first law code? **Hammurabi**
//! ```
//!
//! Level-2 headings split the document into sections; level-3 headings
//! split a section into subsections. Parsing never fails: text that does
//! not follow the convention just produces fewer sections.

use crate::extract;
use crate::types::{Document, Section, Subsection};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

const UNTITLED: &str = "Untitled";

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("title pattern"));
static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").expect("section pattern"));
static SUBSECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###\s+(.+)$").expect("subsection pattern"));

/// Parse markdown into a fully derived document.
pub fn parse_document(content: &str) -> Document {
    let sections = parse_sections(content);
    let key_terms = extract::key_terms(content, &sections);
    let quiz_questions = extract::embedded_questions(content);

    Document {
        title: parse_title(content),
        content: content.to_string(),
        html_content: render_html(content),
        sections,
        key_terms,
        quiz_questions,
        word_count: content.split_whitespace().count(),
    }
}

/// First level-1 heading, or "Untitled".
pub fn parse_title(content: &str) -> String {
    TITLE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Split markdown into level-2 sections.
pub fn parse_sections(content: &str) -> Vec<Section> {
    split_blocks(content, &SECTION_HEADING)
        .into_iter()
        .map(|block| {
            let body = block.body.trim();
            Section {
                title: block.title.to_string(),
                content: body.to_string(),
                subsections: parse_subsections(body),
                span: block.span,
            }
        })
        .collect()
}

/// Split a section body into level-3 subsections.
pub fn parse_subsections(content: &str) -> Vec<Subsection> {
    split_blocks(content, &SUBSECTION_HEADING)
        .into_iter()
        .map(|block| Subsection {
            title: block.title.to_string(),
            content: block.body.trim().to_string(),
        })
        .collect()
}

/// Render markdown to HTML for the display layer.
pub fn render_html(content: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(content, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

struct Block<'a> {
    title: &'a str,
    body: &'a str,
    span: Range<usize>,
}

/// Cut `content` at every heading matched by `heading`. Each block's body
/// runs from the end of its heading line to the start of the next heading.
fn split_blocks<'a>(content: &'a str, heading: &Regex) -> Vec<Block<'a>> {
    let headings: Vec<(Range<usize>, &str)> = heading
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?;
            Some((whole.range(), title.as_str().trim()))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(idx, (range, title))| {
            let end = headings
                .get(idx + 1)
                .map_or(content.len(), |(next, _)| next.start);
            Block {
                title,
                body: &content[range.end..end],
                span: range.start..end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "# Ancient Mesopotamia\n\nIntro text.\n\n## Geography\nLand between rivers.\n\n### Tigris\nEastern river.\n### Euphrates\nWestern river.\n\n## Culture\nWriting and law.\n";

    #[test]
    fn title_from_first_h1() {
        assert_eq!(parse_title(SAMPLE), "Ancient Mesopotamia");
    }

    #[test]
    fn title_defaults_to_untitled() {
        assert_eq!(parse_title("## Only a section\ntext"), "Untitled");
        assert_eq!(parse_title(""), "Untitled");
    }

    #[test]
    fn sections_split_on_level_two_headings() {
        let sections = parse_sections(SAMPLE);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Geography");
        assert_eq!(sections[1].title, "Culture");
        assert_eq!(sections[1].content, "Writing and law.");
    }

    #[test]
    fn subsections_split_on_level_three_headings() {
        let sections = parse_sections(SAMPLE);
        let subs = &sections[0].subsections;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].title, "Tigris");
        assert_eq!(subs[0].content, "Eastern river.");
        assert_eq!(subs[1].title, "Euphrates");
        assert_eq!(subs[1].content, "Western river.");
    }

    #[test]
    fn level_three_headings_do_not_start_sections() {
        let sections = parse_sections("### Not a section\ntext\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn no_sections_is_valid() {
        assert!(parse_sections("just a paragraph").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn heading_text_is_trimmed() {
        let sections = parse_sections("##   Spaced Out   \nbody");
        assert_eq!(sections[0].title, "Spaced Out");
    }

    #[test]
    fn spans_cover_document_from_first_section() {
        let doc = "# T\npreamble\n## A\none\n## B\ntwo\n### B1\nthree\n## C\n";
        let sections = parse_sections(doc);
        assert_eq!(sections.len(), 3);

        let first = doc.find("## A").unwrap();
        assert_eq!(sections[0].span.start, first);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].span.end, pair[1].span.start);
        }
        assert_eq!(sections.last().unwrap().span.end, doc.len());

        let rebuilt: String = sections.iter().map(|s| &doc[s.span.clone()]).collect();
        assert_eq!(rebuilt, &doc[first..]);
    }

    #[test]
    fn parse_document_key_terms_scenario() {
        let doc = parse_document("# T\n## KEY TERMS\n### Foo\nA thing.\n");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.key_terms.len(), 1);
        assert_eq!(doc.key_terms[0].term, "Foo");
        assert_eq!(doc.key_terms[0].definition, "A thing.");
    }

    #[test]
    fn parse_document_collects_metadata() {
        let doc = parse_document(SAMPLE);
        assert_eq!(doc.word_count, SAMPLE.split_whitespace().count());
        assert!(doc.html_content.contains("<h1>Ancient Mesopotamia</h1>"));
        assert!(doc.html_content.contains("<h2>Geography</h2>"));
        assert_eq!(doc.content, SAMPLE);
    }
}
