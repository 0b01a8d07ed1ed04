//! Markdown flattening for metadata text

use pulldown_cmark::{Event, Parser as MdParser, TagEnd};

/// Flatten Markdown into a single line of plain text.
///
/// Descriptions end up in `content` attributes where markup is meaningless,
/// so emphasis, links and code spans collapse to their text and block
/// boundaries become single spaces.
pub fn plain_text(markdown: &str) -> String {
    let mut output = String::new();

    for event in MdParser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak => output.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => output.push(' '),
            _ => {}
        }
    }

    output.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(plain_text("See our plans"), "See our plans");
    }

    #[test]
    fn test_plain_text_strips_inline_markup() {
        assert_eq!(
            plain_text("Build **beautiful** forms with [Formly](https://formly.example) and `embeds`"),
            "Build beautiful forms with Formly and embeds"
        );
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        assert_eq!(
            plain_text("# Pricing\n\nSimple plans.\nNo surprises.\n\n- Free\n- Pro"),
            "Pricing Simple plans. No surprises. Free Pro"
        );
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(plain_text(""), "");
    }
}
