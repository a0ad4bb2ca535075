use crate::parsing::position_marker::PositionMarker;

/// Indented code blocks: content indented by at least four columns.
pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: usize = 4;

    /// Consumes up to four columns of indentation, returning the whitespace taken
    /// verbatim and the remaining text.
    ///
    /// A tab that straddles the fourth column stays in the remaining text.
    pub fn strip_indent<'a>(pm: &mut PositionMarker<'a>) -> (&'a str, &'a str) {
        let start = pm.index_number();
        let columns = pm.indent().min(Self::INDENT);
        pm.advance_offset(columns, true);
        let line = pm.text_to_parse();
        (&line[start..pm.index_number()], pm.remaining())
    }
}
