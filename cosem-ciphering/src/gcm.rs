//! AES-128-GCM primitive wrapper, nonce construction and AAD assembly

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::aes::Aes128;
use aes_gcm::{AesGcm, Nonce};

use cosem_core::{CosemError, CosemResult};

use crate::mode::SecurityMode;
use crate::title::SystemTitle;

/// Length of the AEAD nonce in bytes
pub const NONCE_LEN: usize = 12;
/// Length of the wire authentication tag in bytes
pub const TAG_LEN: usize = 12;
/// Length of the AES-128 block cipher key in bytes
pub const KEY_LEN: usize = 16;

/// AES-128-GCM with the 96-bit tag used on the wire
type Aes128Gcm96 = AesGcm<Aes128, U12, U12>;

/// Derive the 12-byte AEAD nonce from a frame counter and a system title
///
/// Bytes 0-7 are the system title verbatim, bytes 8-11 the frame counter
/// big-endian. Pure and stateless; the nonce must never repeat for a
/// given `(system title, block cipher key)` pair, which the caller
/// guarantees through frame counter uniqueness.
pub fn build_nonce(frame_counter: u32, system_title: &SystemTitle) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce[..8].copy_from_slice(system_title.as_bytes());
    nonce[8..].copy_from_slice(&frame_counter.to_be_bytes());
    nonce
}

/// Assemble the additional authenticated data for one ciphering operation
///
/// What is bound into the tag matches what is otherwise unprotected:
/// - `Authentication`: security byte, authentication key and the
///   plaintext itself (the plaintext travels in clear).
/// - `Encryption`: the authentication key alone.
/// - `AuthenticationEncryption`: security byte and authentication key;
///   the payload is covered by the cipher.
pub fn build_aad(security: SecurityMode, authentication_key: &[u8], plaintext: &[u8]) -> Vec<u8> {
    match security {
        SecurityMode::Authentication => {
            let mut aad = Vec::with_capacity(1 + authentication_key.len() + plaintext.len());
            aad.push(security.byte());
            aad.extend_from_slice(authentication_key);
            aad.extend_from_slice(plaintext);
            aad
        }
        SecurityMode::Encryption => authentication_key.to_vec(),
        SecurityMode::AuthenticationEncryption => {
            let mut aad = Vec::with_capacity(1 + authentication_key.len());
            aad.push(security.byte());
            aad.extend_from_slice(authentication_key);
            aad
        }
    }
}

/// One-shot AES-128-GCM seal/open context
pub struct GcmCipher {
    cipher: Aes128Gcm96,
}

impl core::fmt::Debug for GcmCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GcmCipher").finish_non_exhaustive()
    }
}

impl GcmCipher {
    /// Create a cipher context for a 16-byte block cipher key
    pub fn new(key: &[u8]) -> CosemResult<Self> {
        let cipher = Aes128Gcm96::new_from_slice(key).map_err(|_| CosemError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    /// Seal a plaintext, returning the ciphertext and the detached tag
    ///
    /// With an empty plaintext this degenerates to a pure GMAC over the
    /// AAD, which is how authentication-only frames obtain their tag.
    pub fn seal(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> CosemResult<(Vec<u8>, [u8; TAG_LEN])> {
        let mut sealed = self
            .cipher
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| CosemError::CipherFailure)?;
        let split = sealed.len() - TAG_LEN;
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&sealed[split..]);
        sealed.truncate(split);
        Ok((sealed, tag))
    }

    /// Open a ciphertext, verifying the tag inside the primitive
    pub fn open(
        &self,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8; TAG_LEN],
    ) -> CosemResult<Vec<u8>> {
        let mut msg = Vec::with_capacity(ciphertext.len() + TAG_LEN);
        msg.extend_from_slice(ciphertext);
        msg.extend_from_slice(tag);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), Payload { msg: &msg, aad })
            .map_err(|_| CosemError::AuthenticationFailed)
    }

    /// Recover the payload of an encryption-only frame
    ///
    /// Encryption-only traffic carries no tag, so the one-shot open cannot
    /// be used. The counter-mode layer of GCM is its own inverse: sealing
    /// the ciphertext again yields the plaintext, and the tag produced
    /// here is discarded. No authenticity claim is made.
    pub fn open_unauthenticated(
        &self,
        nonce: &[u8; NONCE_LEN],
        ciphertext: &[u8],
    ) -> CosemResult<Vec<u8>> {
        let (plaintext, _tag) = self.seal(nonce, &[], ciphertext)?;
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_nonce_layout() {
        let title = SystemTitle::new([1, 2, 3, 4, 5, 6, 7, 8]);
        let nonce = build_nonce(0x01020304, &title);
        assert_eq!(nonce, [1, 2, 3, 4, 5, 6, 7, 8, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_build_nonce_deterministic() {
        let title = SystemTitle::new([0xAA; 8]);
        assert_eq!(build_nonce(7, &title), build_nonce(7, &title));
        assert_ne!(build_nonce(7, &title), build_nonce(8, &title));
        let other = SystemTitle::new([0xAB; 8]);
        assert_ne!(build_nonce(7, &title), build_nonce(7, &other));
    }

    #[test]
    fn test_build_aad_per_mode() {
        let ak = [0xD0, 0xD1, 0xD2];
        let plaintext = [0x11, 0x22];

        let aad = build_aad(SecurityMode::Authentication, &ak, &plaintext);
        assert_eq!(aad, [0x01, 0xD0, 0xD1, 0xD2, 0x11, 0x22]);

        let aad = build_aad(SecurityMode::Encryption, &ak, &plaintext);
        assert_eq!(aad, [0xD0, 0xD1, 0xD2]);

        let aad = build_aad(SecurityMode::AuthenticationEncryption, &ak, &plaintext);
        assert_eq!(aad, [0x21, 0xD0, 0xD1, 0xD2]);
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let cipher = GcmCipher::new(&[0u8; 16]).unwrap();
        let nonce = [0x42u8; NONCE_LEN];
        let aad = [0x21, 0xAA, 0xBB];
        let plaintext = b"attribute value";

        let (ciphertext, tag) = cipher.seal(&nonce, &aad, plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(ciphertext.as_slice(), plaintext.as_slice());

        let opened = cipher.open(&nonce, &aad, &ciphertext, &tag).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_open_rejects_tampered_tag() {
        let cipher = GcmCipher::new(&[7u8; 16]).unwrap();
        let nonce = [0u8; NONCE_LEN];
        let (ciphertext, mut tag) = cipher.seal(&nonce, &[], b"data").unwrap();
        tag[0] ^= 0x01;
        assert_eq!(
            cipher.open(&nonce, &[], &ciphertext, &tag),
            Err(CosemError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_seal_empty_plaintext_is_gmac() {
        let cipher = GcmCipher::new(&[0u8; 16]).unwrap();
        let nonce = [1u8; NONCE_LEN];
        let (ciphertext, tag) = cipher.seal(&nonce, b"aad bytes", &[]).unwrap();
        assert!(ciphertext.is_empty());

        let (_, other_tag) = cipher.seal(&nonce, b"other aad", &[]).unwrap();
        assert_ne!(tag, other_tag);
    }

    #[test]
    fn test_open_unauthenticated_inverts_seal() {
        let cipher = GcmCipher::new(&[3u8; 16]).unwrap();
        let nonce = [9u8; NONCE_LEN];
        let plaintext = b"counter-mode keystream";
        let (ciphertext, _) = cipher.seal(&nonce, &[], plaintext).unwrap();
        let recovered = cipher.open_unauthenticated(&nonce, &ciphertext).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn test_invalid_key_length() {
        assert_eq!(
            GcmCipher::new(&[0u8; 15]).unwrap_err(),
            CosemError::InvalidKeyLength { expected: 16, actual: 15 }
        );
        assert_eq!(
            GcmCipher::new(&[0u8; 32]).unwrap_err(),
            CosemError::InvalidKeyLength { expected: 16, actual: 32 }
        );
    }
}
