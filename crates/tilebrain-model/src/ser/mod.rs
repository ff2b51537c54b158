//! Binary brain format.
//!
//! Chunk layout (all chunks versioned, unknown trailing bytes tolerated):
//!
//! ```text
//! BRAN v1 {
//!   NAME tagged-string          ; brain name
//!   TCAT v1 {                   ; persist-marked tiles
//!     TCNT tagged-u32
//!     TCNT x ( TDHD v1 { TKND string, TIID string }, <kind payload chunk> )
//!   }
//!   PGCT tagged-u32             ; page count
//!   PGCT x PAGE v2 {            ; v1 accepted: no PGID, a fresh uid is minted
//!     NAME tagged-string
//!     PGID tagged-string
//!     RLCT tagged-u32
//!     RLCT x RUL1 v1 {
//!       RUL2 v1 { TSET when, TSET do }
//!       CRCT tagged-u32
//!       CRCT x RUL1             ; recursive
//!     }
//!   }
//! }
//! ```
//!
//! Kind payload chunks: `BLIT` (literal), `BVAR` (variable), `BPAG` (page,
//! payload is the pageId string), `BMIS` (missing placeholder).

mod catalog;
mod read;
mod value;
mod write;

pub(crate) use catalog::{read_catalog, write_catalog};
pub(crate) use read::{brain_from_bytes, rule_from_bytes};
pub(crate) use write::{brain_to_bytes, rule_to_bytes};

use tilebrain_core::fourcc::FourCc;

/// How deserialization treats a tile id that resolves through no catalog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MissingTilePolicy {
    /// Insert a `Missing` placeholder into the brain catalog (clipboard
    /// path).
    Placeholder,
    /// Abort the deserialization (brain load path).
    Fail,
}

pub(crate) const BRAN: FourCc = FourCc::new(*b"BRAN");
pub(crate) const NAME: FourCc = FourCc::new(*b"NAME");
pub(crate) const TCAT: FourCc = FourCc::new(*b"TCAT");
pub(crate) const TCNT: FourCc = FourCc::new(*b"TCNT");
pub(crate) const TDHD: FourCc = FourCc::new(*b"TDHD");
pub(crate) const TKND: FourCc = FourCc::new(*b"TKND");
pub(crate) const TIID: FourCc = FourCc::new(*b"TIID");
pub(crate) const BLIT: FourCc = FourCc::new(*b"BLIT");
pub(crate) const BVAR: FourCc = FourCc::new(*b"BVAR");
pub(crate) const BPAG: FourCc = FourCc::new(*b"BPAG");
pub(crate) const BMIS: FourCc = FourCc::new(*b"BMIS");
pub(crate) const PGCT: FourCc = FourCc::new(*b"PGCT");
pub(crate) const PAGE: FourCc = FourCc::new(*b"PAGE");
pub(crate) const PGID: FourCc = FourCc::new(*b"PGID");
pub(crate) const RLCT: FourCc = FourCc::new(*b"RLCT");
pub(crate) const RUL1: FourCc = FourCc::new(*b"RUL1");
pub(crate) const RUL2: FourCc = FourCc::new(*b"RUL2");
pub(crate) const TSET: FourCc = FourCc::new(*b"TSET");
pub(crate) const CRCT: FourCc = FourCc::new(*b"CRCT");

pub(crate) const BRAN_VERSION: u32 = 1;
pub(crate) const TCAT_VERSION: u32 = 1;
pub(crate) const TDHD_VERSION: u32 = 1;
pub(crate) const PAYLOAD_VERSION: u32 = 1;
pub(crate) const PAGE_VERSION: u32 = 2;
pub(crate) const RUL1_VERSION: u32 = 1;
pub(crate) const RUL2_VERSION: u32 = 1;
pub(crate) const TSET_VERSION: u32 = 1;
