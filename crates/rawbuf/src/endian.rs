use crate::SIZE_OF_U32;

/// Byte order of the fixed-width integers a buffer reads and writes.
///
/// Defaults to little-endian, which keeps persisted bytes portable across
/// architectures. Use [`Endian::NATIVE`] only when bytes never leave the machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    #[inline]
    pub fn is_little(&self) -> bool {
        *self == Self::Little
    }

    #[inline]
    pub fn is_big(&self) -> bool {
        *self == Self::Big
    }

    #[inline]
    pub fn read_u32(self, bytes: [u8; SIZE_OF_U32]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn write_u32(self, value: u32) -> [u8; SIZE_OF_U32] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}
