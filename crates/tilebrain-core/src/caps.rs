//! Capability bitsets.
//!
//! A tile's `caps` are granted to descendants in the rule tree; a tile's
//! `requires` must be a subset of the capabilities OR'd from all enclosing
//! rules' WHEN-side tiles (and from tiles earlier on the same side).

bitflags::bitflags! {
    /// Capability grants flowing down the rule tree.
    ///
    /// The low bits are well-known; hosts may claim further bits with
    /// `from_bits_retain`.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Capabilities: u32 {
        /// A target actor is bound in the enclosing context.
        const TARGET_ACTOR = 1 << 0;
        /// A collision contact is bound in the enclosing context.
        const CONTACT = 1 << 1;
    }
}

impl Capabilities {
    /// True when every required bit is available.
    pub fn satisfies(self, requires: Capabilities) -> bool {
        self.contains(requires)
    }
}
