//! Alignment flags describing how a container arranges its children.

use bitflags::bitflags;

bitflags! {
    /// Arrangement of a container's children, combined freely
    /// (e.g. `FLOAT | BLOCK`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct AlignmentType: u32 {
        /// Arrangement could not be inferred.
        const UNKNOWN = 1;
        /// Arrangement is computed by an adapter.
        const AUTO_LAYOUT = 1 << 1;
        /// Children form one horizontal run.
        const HORIZONTAL = 1 << 2;
        /// Children stack vertically.
        const VERTICAL = 1 << 3;
        /// Some children are absolutely positioned.
        const ABSOLUTE = 1 << 4;
        /// Children are block-level boxes.
        const BLOCK = 1 << 5;
        /// Children are split across synthesized groups.
        const SEGMENTED = 1 << 6;
        /// Multi-column arrangement.
        const COLUMN = 1 << 7;
        /// Children include floats.
        const FLOAT = 1 << 8;
        /// Inline content wraps over several lines.
        const INLINE_WRAP = 1 << 9;
        /// Content is aligned to the right edge.
        const RIGHT = 1 << 10;
        /// Exactly one child.
        const SINGLE = 1 << 11;
        /// Content may extend past the container.
        const EXTENDABLE = 1 << 12;
        /// Synthesized wrapper around a single view.
        const WRAPPER = 1 << 13;
        /// Children are sized by percentages.
        const PERCENT = 1 << 14;
    }
}
