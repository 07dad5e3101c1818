//! Typed graph identifiers.
//!
//! Nodes and edges are addressed by dense `u32` indices issued by the graph
//! builder, so every per-node or per-edge table in the search engine is a
//! plain `Vec` indexed with `.index()`.  External ids coming from the map
//! extractor are translated to these once, at load time.

use std::fmt;

/// Generate a typed id around `u32` with an `INVALID` sentinel.
macro_rules! graph_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "no id", e.g. an unset predecessor slot.
            pub const INVALID: $name = $name(u32::MAX);

            /// Position of this id in its dense table.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

graph_id! {
    /// Index of a road-network node (intersection or waypoint).
    pub struct NodeId;
}

graph_id! {
    /// Index of a directed road segment in CSR order.
    pub struct EdgeId;
}
