//! Hard limits of the model and the binary format.
//!
//! These are forever-lower bounds: a future format revision may raise them
//! but must never lower them.

/// Maximum depth of a rule in the rule tree.
pub const MAX_RULE_DEPTH: usize = 20;

/// Maximum number of tiles on one side (WHEN or DO) of a rule.
pub const MAX_TILESET_TILES: usize = 20;

/// Maximum length of a brain or page name, in bytes.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum number of pages in a brain.
pub const MAX_PAGES: usize = 100;

/// Maximum length of a short string in the binary format, in bytes.
pub const MAX_SHORT_STR: usize = 512;

/// Maximum length of a long string in the binary format, in bytes.
pub const MAX_LONG_STR: usize = u16::MAX as usize;

/// Maximum length of a byte array in the binary format.
pub const MAX_BYTES: usize = 1 << 20;
