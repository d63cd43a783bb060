//! System title handling

use core::fmt;

use cosem_core::{CosemError, CosemResult};

/// System Title
///
/// An 8-byte identifier that uniquely identifies the sending device.
/// It forms the first 8 bytes of every AES-GCM nonce, so two devices
/// sharing a block cipher key must never share a system title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemTitle {
    value: [u8; 8],
}

impl SystemTitle {
    /// Length of a system title in bytes
    pub const LEN: usize = 8;

    /// Create a new System Title from bytes
    pub fn new(bytes: [u8; 8]) -> Self {
        Self { value: bytes }
    }

    /// Create a System Title from a slice
    ///
    /// # Errors
    /// Returns `InvalidSystemTitle` if the slice is not exactly 8 bytes.
    pub fn from_slice(bytes: &[u8]) -> CosemResult<Self> {
        if bytes.len() != Self::LEN {
            return Err(CosemError::InvalidSystemTitle(bytes.len()));
        }
        let mut value = [0u8; 8];
        value.copy_from_slice(bytes);
        Ok(Self { value })
    }

    /// Get the System Title as bytes
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.value
    }

    /// Get the System Title as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.value
    }
}

impl fmt::Display for SystemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.value {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
