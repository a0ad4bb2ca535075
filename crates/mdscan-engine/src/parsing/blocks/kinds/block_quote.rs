use crate::parsing::position_marker::PositionMarker;

/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered
/// through the dispatcher.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Maximum indentation before the `>` marker.
    pub const MAX_INDENT: usize = 3;

    /// True if the cursor sits before a blockquote marker (after at most 3 columns).
    pub fn detect(pm: &PositionMarker<'_>) -> bool {
        pm.indent() <= Self::MAX_INDENT && pm.peek_nonspace() == Some(Self::PREFIX)
    }

    /// Consumes the `>` marker and at most one column of following whitespace.
    ///
    /// A following tab is consumed by a single column, possibly leaving the rest
    /// of it partially consumed for the content.
    pub fn consume_prefix(pm: &mut PositionMarker<'_>) {
        pm.advance_to_first_nonspace();
        pm.advance_offset(1, false);
        if pm.is_space_or_tab() {
            pm.advance_offset(1, true);
        }
    }
}
