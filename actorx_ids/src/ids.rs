//! Handles the importer passes to its providers and puts in its command stream.
//!
//! Each handle packs a slot index into the low 32 bits and an import-session
//! generation into the high 32. Index 0 is reserved for nil.

use std::fmt;

const INDEX_MASK: u64 = 0xFFFF_FFFF;
const GENERATION_SHIFT: u32 = 32;

macro_rules! session_handle {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub const NIL: Self = Self(0);

            #[inline]
            pub const fn nil() -> Self {
                Self::NIL
            }

            #[inline]
            pub const fn from_parts(index: u32, generation: u32) -> Self {
                Self(index as u64 | (generation as u64) << GENERATION_SHIFT)
            }

            #[inline]
            pub const fn index(self) -> u32 {
                (self.0 & INDEX_MASK) as u32
            }

            #[inline]
            pub const fn generation(self) -> u32 {
                (self.0 >> GENERATION_SHIFT) as u32
            }

            #[inline]
            pub const fn is_nil(self) -> bool {
                self.index() == 0
            }

            /// Non-nil and issued by the session with this generation.
            #[inline]
            pub const fn is_from_session(self, generation: u32) -> bool {
                !self.is_nil() && self.generation() == generation
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_nil() {
                    return f.write_str(concat!(stringify!($name), "(nil)"));
                }
                write!(f, "{}({}@{})", stringify!($name), self.index(), self.generation())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}@{}", self.index(), self.generation())
            }
        }
    };
}

session_handle!(
    InstanceID,
    "Actor instance. Index is the actor index + 1, generation is the import session."
);
session_handle!(MeshID, "Imported mesh, allocated by the mesh or model provider.");
session_handle!(TextureID, "Loaded image, allocated by the texture provider.");
session_handle!(LightID, "Created light, numbered per import.");
session_handle!(TileID, "Landscape base tile, numbered per import.");
