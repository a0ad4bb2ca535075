/// A leading metadata block delimited by `---` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterBlock {
    pub start_fence: String,
    pub end_fence: String,
    /// Lines between the fences, verbatim.
    pub lines: Vec<String>,
    /// Top-level `key: value` pairs in document order.
    pub matter: Vec<(String, String)>,
}

impl FrontMatterBlock {
    /// Source lines covered, fences included.
    pub fn line_count(&self) -> usize {
        self.lines.len() + 2
    }
}

pub struct FrontMatter;

impl FrontMatter {
    pub const START_FENCE: &'static str = "---";
    pub const END_FENCES: [&'static str; 2] = ["---", "..."];

    /// Recognises front matter at the very start of a document.
    ///
    /// An unterminated block is not front matter.
    pub fn parse(lines: &[&str]) -> Option<FrontMatterBlock> {
        let (first, rest) = lines.split_first()?;
        if first.trim_end() != Self::START_FENCE {
            return None;
        }
        let end = rest
            .iter()
            .position(|line| Self::END_FENCES.contains(&line.trim_end()))?;

        let body = &rest[..end];
        Some(FrontMatterBlock {
            start_fence: first.to_string(),
            end_fence: rest[end].to_string(),
            lines: body.iter().map(|l| l.to_string()).collect(),
            matter: body.iter().filter_map(|l| Self::parse_pair(l)).collect(),
        })
    }

    fn parse_pair(line: &str) -> Option<(String, String)> {
        if line.starts_with([' ', '\t', '-', '#']) {
            return None;
        }
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        Some((key.to_string(), value.to_string()))
    }
}
