//! Model errors.
//!
//! Expected business failures are returned, never thrown across the module
//! boundary; stream failures surface through the `Stream` variant at the
//! I/O boundary.

use tilebrain_core::stream::StreamError;
use tilebrain_core::tiles::TileId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("brain already has the maximum number of pages ({0})")]
    MaxPagesExceeded(usize),

    #[error("page index {0} out of bounds")]
    PageIndexOutOfBounds(usize),

    #[error("rule depth would exceed the maximum ({0})")]
    RuleDepthExceeded(usize),

    #[error("tile set is full ({0} tiles)")]
    TileSetCapacityExceeded(usize),

    #[error("tile index {0} out of bounds")]
    TileIndexOutOfBounds(usize),

    #[error("name exceeds {0} bytes")]
    NameTooLong(usize),

    #[error("unknown rule")]
    UnknownRule,

    #[error("unknown page")]
    UnknownPage,

    #[error("operation is not legal for this rule")]
    IllegalMove,

    #[error("rule is already attached")]
    AlreadyAttached,

    #[error("tile `{0}` could not be resolved through any catalog")]
    MissingTile(TileId),

    #[error(transparent)]
    Stream(#[from] StreamError),
}
