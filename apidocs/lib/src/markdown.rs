//! Markdown to HTML for the catalog's prose fields.
//!
//! ## Examples
//!
//! ```
//! use apidocs_lib::markdown::{to_html, to_inline_html};
//!
//! assert_eq!(to_html("Hello *world*"), "<p>Hello <em>world</em></p>\n");
//! assert_eq!(to_inline_html("Hello `code`"), "Hello <code>code</code>");
//! ```

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Renders block-level markdown (paragraphs, lists, headings, ...).
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Renders markdown as inline content only.
///
/// Emphasis, code spans, links and strikethrough are rendered. Block
/// syntax at the start of a line (`# `, `- `, `> `, `1. `, fences, rules)
/// is kept as literal text, and there is no surrounding paragraph.
pub fn to_inline_html(markdown: &str) -> String {
    let source = escape_block_markers(markdown);
    let parser = Parser::new_ext(&source, Options::ENABLE_STRIKETHROUGH).filter(|event| {
        !matches!(
            event,
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
        )
    });
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Backslash-escapes whatever would open a block on each line.
///
/// Leading indentation is dropped so nothing becomes an indented code
/// block.
fn escape_block_markers(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 8);
    for (i, line) in markdown.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let line = line.trim_start();
        match block_marker_at(line) {
            Some(at) => {
                out.push_str(&line[..at]);
                out.push('\\');
                out.push_str(&line[at..]);
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Byte offset of the character that makes `line` open a block, if any.
fn block_marker_at(line: &str) -> Option<usize> {
    let first = line.chars().next()?;
    let after_first = &line[first.len_utf8()..];
    let spaced = after_first.trim_end().is_empty() || after_first.starts_with([' ', '\t']);
    let only_marker = line.trim_end().chars().all(|c| c == first || c == ' ' || c == '\t');

    match first {
        '#' | '>' => Some(0),
        '`' | '~' if line.starts_with("```") || line.starts_with("~~~") => Some(0),
        '-' | '+' | '*' if spaced || only_marker => Some(0),
        '_' | '=' if only_marker => Some(0),
        '0'..='9' => {
            let digits = line.bytes().take_while(u8::is_ascii_digit).count();
            let after = &line[digits..];
            let ordinal = digits <= 9
                && after.starts_with(['.', ')'])
                && (after.len() == 1 || after[1..].starts_with([' ', '\t']));
            ordinal.then_some(digits)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_wraps_in_paragraph() {
        assert_eq!(to_html("Ping."), "<p>Ping.</p>\n");
    }

    #[test]
    fn block_renders_links_and_strikethrough() {
        let html = to_html("See [docs](https://example.org) ~~old~~");
        assert!(html.contains(r#"<a href="https://example.org">docs</a>"#));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn inline_drops_paragraph() {
        let html = to_inline_html("Requires the `token` cookie.");
        assert_eq!(html, "Requires the <code>token</code> cookie.");
    }

    #[test]
    fn inline_keeps_soft_breaks() {
        let html = to_inline_html("first line\n`second` line");
        assert_eq!(html, "first line\n<code>second</code> line");
    }

    #[test]
    fn inline_escapes_text_it_processes() {
        assert_eq!(to_inline_html("a < b"), "a &lt; b");
    }

    #[test]
    fn inline_keeps_block_syntax_literal() {
        assert_eq!(to_inline_html("# Heads up"), "# Heads up");
        assert_eq!(to_inline_html("- rate limited"), "- rate limited");
        assert_eq!(to_inline_html("> quoted"), "&gt; quoted");
        assert_eq!(to_inline_html("1. first"), "1. first");
        assert_eq!(to_inline_html("2) second"), "2) second");
        assert_eq!(to_inline_html("---"), "---");
    }

    #[test]
    fn inline_keeps_block_syntax_literal_on_later_lines() {
        let html = to_inline_html("Note:\n* one\n    indented");
        assert_eq!(html, "Note:\n* one\nindented");
    }

    #[test]
    fn inline_still_renders_emphasis_at_line_start() {
        assert_eq!(to_inline_html("**Heads up**: slow"), "<strong>Heads up</strong>: slow");
        assert_eq!(to_inline_html("*really*"), "<em>really</em>");
        assert_eq!(to_inline_html("2024 was fine"), "2024 was fine");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_inline_html(""), "");
    }
}
