//! Inline emphasis in script bodies
//!
//! `**text**` is strong and `*text*` is light emphasis. Strong pairs are
//! consumed first; light pairs are only looked for in the plain text left
//! between them. Pairs never nest, never span a line break, and match the
//! nearest closing marker. A marker without a partner stays literal.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    None,
    Strong,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::None)
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Strong)
    }

    pub fn light(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Light)
    }
}

/// One source line, split into emphasis spans
pub type Line = Vec<Span>;

/// Parse a script body into lines of spans. Every `\n` in the source starts
/// a new line; an empty body has none.
pub fn parse(content: &str) -> Vec<Line> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .split('\n')
        .map(|line| parse_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn parse_line(line: &str) -> Line {
    let mut spans = Vec::new();
    for (text, strong) in split_pairs(line, "**") {
        if strong {
            spans.push(Span::strong(text));
            continue;
        }
        for (text, light) in split_pairs(text, "*") {
            if light {
                spans.push(Span::light(text));
            } else if !text.is_empty() {
                spans.push(Span::plain(text));
            }
        }
    }
    spans
}

/// Split `text` into segments, flagging those enclosed by a `marker` pair
fn split_pairs<'a>(text: &'a str, marker: &str) -> Vec<(&'a str, bool)> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(marker) {
        let inner_start = open + marker.len();
        let Some(len) = rest[inner_start..].find(marker) else {
            break;
        };
        segments.push((&rest[..open], false));
        segments.push((&rest[inner_start..inner_start + len], true));
        rest = &rest[inner_start + len + marker.len()..];
    }
    segments.push((rest, false));
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_has_no_lines() {
        assert!(parse("").is_empty());
        assert_eq!(parse("\n"), vec![Line::new(), Line::new()]);
    }

    #[test]
    fn strong_then_light() {
        assert_eq!(
            parse("**bold** and *em*"),
            vec![vec![
                Span::strong("bold"),
                Span::plain(" and "),
                Span::light("em"),
            ]]
        );
    }

    #[test]
    fn lone_asterisk_is_literal() {
        assert_eq!(parse("5 * 3"), vec![vec![Span::plain("5 * 3")]]);
    }

    #[test]
    fn unclosed_strong_falls_through_to_light() {
        // The `**` has no partner, so its asterisks pair up as light emphasis
        assert_eq!(
            parse("a **b"),
            vec![vec![Span::plain("a "), Span::light(""), Span::plain("b")]]
        );
    }

    #[test]
    fn pairs_are_non_greedy() {
        assert_eq!(
            parse("*a* b *c*"),
            vec![vec![Span::light("a"), Span::plain(" b "), Span::light("c")]]
        );
    }

    #[test]
    fn light_is_not_applied_inside_strong() {
        assert_eq!(parse("**a *b* c**"), vec![vec![Span::strong("a *b* c")]]);
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(
            parse("**open\nclose**"),
            vec![
                vec![Span::light(""), Span::plain("open")],
                vec![Span::plain("close"), Span::light("")],
            ]
        );
    }

    #[test]
    fn line_breaks_are_kept() {
        let lines = parse("one\n\nthree\r\n");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], vec![Span::plain("one")]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![Span::plain("three")]);
        assert!(lines[3].is_empty());
    }

    #[test]
    fn unicode_content_is_preserved() {
        assert_eq!(
            parse("**¡Hola!** señor"),
            vec![vec![Span::strong("¡Hola!"), Span::plain(" señor")]]
        );
    }
}
