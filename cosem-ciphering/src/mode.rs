//! Security modes and the security control byte

use cosem_core::{CosemError, CosemResult};

const AUTHENTICATION_BIT: u8 = 0x01;
const ENCRYPTION_BIT: u8 = 0x20;

/// Protection level of a single ciphering operation
///
/// Serialized as the security control byte: bit 0 marks authentication,
/// bit 5 marks encryption, so the three modes encode as `0x01`, `0x20`
/// and `0x21`. Any other byte is rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SecurityMode {
    /// Integrity only: plaintext travels in clear but is bound into the tag.
    Authentication = AUTHENTICATION_BIT,
    /// Confidentiality only: payload is encrypted, no tag on the wire.
    Encryption = ENCRYPTION_BIT,
    /// Both confidentiality and authenticity.
    AuthenticationEncryption = AUTHENTICATION_BIT | ENCRYPTION_BIT,
}

impl SecurityMode {
    /// Get the security control byte
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Decode a security control byte
    pub fn from_byte(byte: u8) -> CosemResult<Self> {
        match byte {
            b if b == SecurityMode::Authentication.byte() => Ok(SecurityMode::Authentication),
            b if b == SecurityMode::Encryption.byte() => Ok(SecurityMode::Encryption),
            b if b == SecurityMode::AuthenticationEncryption.byte() => {
                Ok(SecurityMode::AuthenticationEncryption)
            }
            _ => Err(CosemError::InvalidSecurityMode(byte)),
        }
    }

    /// Check if this mode carries an authentication tag on the wire
    pub fn is_authenticated(self) -> bool {
        self.byte() & AUTHENTICATION_BIT != 0
    }

    /// Check if this mode encrypts the payload
    pub fn is_encrypted(self) -> bool {
        self.byte() & ENCRYPTION_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_values() {
        assert_eq!(SecurityMode::Authentication.byte(), 0x01);
        assert_eq!(SecurityMode::Encryption.byte(), 0x20);
        assert_eq!(SecurityMode::AuthenticationEncryption.byte(), 0x21);
    }

    #[test]
    fn test_from_byte() {
        assert_eq!(SecurityMode::from_byte(0x01).unwrap(), SecurityMode::Authentication);
        assert_eq!(SecurityMode::from_byte(0x20).unwrap(), SecurityMode::Encryption);
        assert_eq!(
            SecurityMode::from_byte(0x21).unwrap(),
            SecurityMode::AuthenticationEncryption
        );
        for bad in [0x00, 0x02, 0x10, 0x30, 0xFF] {
            assert_eq!(SecurityMode::from_byte(bad), Err(CosemError::InvalidSecurityMode(bad)));
        }
    }

    #[test]
    fn test_flags() {
        assert!(SecurityMode::Authentication.is_authenticated());
        assert!(!SecurityMode::Authentication.is_encrypted());
        assert!(!SecurityMode::Encryption.is_authenticated());
        assert!(SecurityMode::Encryption.is_encrypted());
        assert!(SecurityMode::AuthenticationEncryption.is_authenticated());
        assert!(SecurityMode::AuthenticationEncryption.is_encrypted());
    }
}
