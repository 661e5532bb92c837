//! Stable identifier wrappers for the node arena and the storage arena.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// Creates an identifier from a raw value.
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            pub const fn value(self) -> u32 {
                self.0
            }

            /// Returns the raw value as an arena index.
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Creates an identifier from an arena index.
            ///
            /// Returns `None` when the index does not fit.
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Index of one instruction node in an [`crate::ir::InstructionGraph`].
    NodeId
);
define_id!(
    /// Index of one cell in the [`crate::ir::Storage`] arena.
    Location
);
