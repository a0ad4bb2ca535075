/// A link reference definition found at the start of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Case-folded label with inner whitespace collapsed.
    pub label: String,
    pub destination: String,
    pub title: Option<String>,
    /// Number of source lines the definition spans.
    pub line_count: usize,
}

/// Link reference definitions: `[label]: destination "optional title"`.
///
/// Definitions only start a paragraph and always end at a line end, so the
/// paragraph they came from is split on whole lines.
pub struct LinkReference;

impl LinkReference {
    const MAX_LABEL_LENGTH: usize = 999;
    const MAX_PAREN_DEPTH: usize = 32;

    /// Parses one definition from the start of `text`, which holds the
    /// paragraph's remaining lines joined by `\n`.
    pub fn parse(text: &str) -> Option<LinkDefinition> {
        let bytes = text.as_bytes();
        if bytes.first() != Some(&b'[') {
            return None;
        }
        let label_end = Self::label_end(text)?;
        let raw_label = &text[1..label_end];
        if raw_label.trim().is_empty() || raw_label.chars().count() > Self::MAX_LABEL_LENGTH {
            return None;
        }
        let mut index = label_end + 1;
        if bytes.get(index) != Some(&b':') {
            return None;
        }
        index = skip_whitespace(text, index + 1, true);

        let (destination, after_destination) = Self::destination(text, index)?;
        let line_end = skip_whitespace(text, after_destination, false);
        let at_line_end = matches!(bytes.get(line_end), None | Some(b'\n'));

        let title_start = skip_whitespace(text, after_destination, true);
        let (title, end) = match Self::title(text, title_start) {
            Some((title, end)) if title_start > after_destination => (Some(title), end),
            _ if at_line_end => (None, line_end),
            _ => return None,
        };

        Some(LinkDefinition {
            label: normalize_label(raw_label),
            destination: unescape(destination),
            title: title.map(unescape),
            line_count: text[..end].matches('\n').count() + 1,
        })
    }

    fn label_end(text: &str) -> Option<usize> {
        let mut chars = text.char_indices().skip(1);
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '[' => return None,
                ']' => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// Returns the destination and the index just past it.
    fn destination(text: &str, start: usize) -> Option<(&str, usize)> {
        let rest = &text[start..];
        if let Some(inner) = rest.strip_prefix('<') {
            let mut chars = inner.char_indices();
            while let Some((index, c)) = chars.next() {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '<' | '\n' => return None,
                    '>' => {
                        let end = start + 1 + index + 1;
                        let followed_by_space = text[end..]
                            .chars()
                            .next()
                            .is_none_or(char::is_whitespace);
                        return followed_by_space.then_some((&inner[..index], end));
                    }
                    _ => {}
                }
            }
            return None;
        }

        let mut depth = 0usize;
        let mut end = rest.len();
        let mut chars = rest.char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '(' => {
                    depth += 1;
                    if depth > Self::MAX_PAREN_DEPTH {
                        return None;
                    }
                }
                ')' if depth == 0 => {
                    end = index;
                    break;
                }
                ')' => depth -= 1,
                c if c.is_whitespace() || c.is_control() => {
                    end = index;
                    break;
                }
                _ => {}
            }
        }
        (end > 0 && depth == 0).then_some((&rest[..end], start + end))
    }

    /// Returns the title and the index of the line end after it.
    fn title(text: &str, start: usize) -> Option<(&str, usize)> {
        let rest = &text[start..];
        let opener = rest.chars().next()?;
        let closer = match opener {
            '"' => '"',
            '\'' => '\'',
            '(' => ')',
            _ => return None,
        };
        let mut chars = rest.char_indices().skip(1);
        while let Some((index, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == closer {
                let line_end = skip_whitespace(text, start + index + 1, false);
                return matches!(text.as_bytes().get(line_end), None | Some(b'\n'))
                    .then_some((&rest[1..index], line_end));
            } else if opener == '(' && c == '(' {
                return None;
            }
        }
        None
    }
}

/// Skips spaces and tabs, and at most one line end when `newline` is set.
fn skip_whitespace(text: &str, start: usize, newline: bool) -> usize {
    let bytes = text.as_bytes();
    let mut index = start;
    let mut seen_newline = !newline;
    while let Some(&b) = bytes.get(index) {
        match b {
            b' ' | b'\t' => {}
            b'\n' if !seen_newline => seen_newline = true,
            _ => break,
        }
        index += 1;
    }
    index
}

fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn definition(
        label: &str,
        destination: &str,
        title: Option<&str>,
        lines: usize,
    ) -> LinkDefinition {
        LinkDefinition {
            label: label.to_string(),
            destination: destination.to_string(),
            title: title.map(str::to_string),
            line_count: lines,
        }
    }

    #[rstest]
    #[case("[foo]: /url \"title\"", definition("foo", "/url", Some("title"), 1))]
    #[case("[Foo Bar]:\n/url", definition("foo bar", "/url", None, 2))]
    #[case("[foo]: <my url> 'it\\'s'", definition("foo", "my url", Some("it's"), 1))]
    #[case("[foo]: /url\n(title)", definition("foo", "/url", Some("title"), 2))]
    #[case("[foo]: /url\n===", definition("foo", "/url", None, 1))]
    #[case("[foo]: /url \"title\" \n[bar]: /b", definition("foo", "/url", Some("title"), 1))]
    #[case("[foo]: /url\n\"title\" ok", definition("foo", "/url", None, 1))]
    #[case("[a\\]b]: /p(a(b))", definition("a\\]b", "/p(a(b))", None, 1))]
    #[case("[foo]: /url\"title\"", definition("foo", "/url\"title\"", None, 1))]
    #[case("[foo]: <>", definition("foo", "", None, 1))]
    fn parses_definitions(#[case] text: &str, #[case] expected: LinkDefinition) {
        assert_eq!(LinkReference::parse(text), Some(expected));
    }

    #[rstest]
    #[case("[foo]:")]
    #[case("[foo]: /url \"title\" ok")]
    #[case("[foo] : /url")]
    #[case("[]: /url")]
    #[case("[ ]: /url")]
    #[case("[a[b]: /url")]
    #[case("[foo]: <bar>(baz)")]
    #[case("[foo]:\n\n/url")]
    #[case("foo [bar]: /url")]
    fn rejects_non_definitions(#[case] text: &str) {
        assert_eq!(LinkReference::parse(text), None);
    }
}
