use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::parser_helper::ParserHelper;

/// Raw HTML blocks, identified by one of seven start conditions.
///
/// Types 1 to 5 run until a line containing their end marker; types 6 and 7
/// run until a blank line. Type 7 cannot interrupt a paragraph.
pub struct HtmlBlock;

impl HtmlBlock {
    pub const RAW_TAGS: &'static [&'static str] = &["pre", "script", "style", "textarea"];

    pub const BLOCK_TAGS: &'static [&'static str] = &[
        "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption",
        "center", "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt",
        "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2",
        "h3", "h4", "h5", "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link",
        "main", "menu", "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param",
        "search", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title",
        "tr", "track", "ul",
    ];

    /// Returns the block type (1..=7) if `text`, starting at its first non-space
    /// character, opens an HTML block.
    pub fn start_condition(text: &str, allow_type_7: bool) -> Option<u8> {
        if !text.starts_with('<') {
            return None;
        }
        let lower = text.to_ascii_lowercase();
        let after_open = &lower[1..];

        if Self::RAW_TAGS
            .iter()
            .any(|tag| after_open.starts_with(tag) && Self::ends_tag_name(after_open, tag.len()))
        {
            return Some(1);
        }
        if lower.starts_with("<!--") {
            return Some(2);
        }
        if lower.starts_with("<?") {
            return Some(3);
        }
        if text.starts_with("<![CDATA[") {
            return Some(5);
        }
        if lower.starts_with("<!") && lower[2..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Some(4);
        }

        let name_part = after_open.strip_prefix('/').unwrap_or(after_open);
        let name_len = name_part
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(name_part.len());
        let name = &name_part[..name_len];
        if Self::BLOCK_TAGS.contains(&name) {
            let rest = &name_part[name_len..];
            if rest.is_empty()
                || rest.starts_with('>')
                || rest.starts_with("/>")
                || ParserHelper::is_character_at_index_whitespace(rest, 0)
            {
                return Some(6);
            }
        }

        if allow_type_7 && Self::is_complete_tag_line(text) {
            return Some(7);
        }
        None
    }

    /// True if `line` ends an HTML block of `block_type` (types 1 to 5 only).
    pub fn ends(block_type: u8, line: &str) -> bool {
        match block_type {
            1 => {
                let lower = line.to_ascii_lowercase();
                Self::RAW_TAGS
                    .iter()
                    .any(|tag| lower.contains(&format!("</{tag}>")))
            }
            2 => line.contains("-->"),
            3 => line.contains("?>"),
            4 => line.contains('>'),
            5 => line.contains("]]>"),
            _ => false,
        }
    }

    /// Blank lines end types 6 and 7; the other types absorb them.
    pub fn ends_on_blank_line(block_type: u8) -> bool {
        block_type >= 6
    }

    fn ends_tag_name(text: &str, at: usize) -> bool {
        match text[at..].chars().next() {
            None | Some('>') => true,
            Some(c) => c == ' ' || c == '\t',
        }
    }

    fn is_complete_tag_line(text: &str) -> bool {
        static TAG_LINE: OnceLock<Regex> = OnceLock::new();
        let tag_line = TAG_LINE.get_or_init(|| {
            Regex::new(
                r#"^(?:<(?P<open>[A-Za-z][A-Za-z0-9-]*)(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>|</(?P<close>[A-Za-z][A-Za-z0-9-]*)\s*>)[ \t]*$"#,
            )
            .expect("Invalid HTML tag regex")
        });

        let Some(captures) = tag_line.captures(text) else {
            return false;
        };
        let name = captures
            .name("open")
            .or_else(|| captures.name("close"))
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        !Self::RAW_TAGS.contains(&name.as_str())
    }
}
