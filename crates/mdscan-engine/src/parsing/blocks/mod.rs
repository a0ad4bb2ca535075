//! # Block Parsing
//!
//! Line-at-a-time block recognition over a stack of open containers.
//!
//! ## Modules
//!
//! - **`kinds`**: one type per block construct, owning its syntax (markers,
//!   fences, start and end conditions)
//! - **`builder`**: `BlockBuilder`, the line dispatcher that matches open
//!   containers, opens new blocks and emits tokens as blocks close
//!
//! ## Key Invariants
//!
//! - Every line records exactly one container prefix, so the source can be
//!   regenerated from the tokens
//! - Nothing is emitted while a leaf block is open; a leaf's tokens are
//!   written when it closes, before any container end tokens that follow
//! - Fenced code and HTML blocks are raw zones: no block parsing inside

pub mod builder;
pub mod kinds;

pub use builder::{BlockBuilder, BlockOutput};
