//! Per-operation ciphering context

use cosem_core::{Command, CosemError, CosemResult};

use crate::gcm::KEY_LEN;
use crate::mode::SecurityMode;
use crate::title::SystemTitle;

/// Shape of the encoder output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Self-describing APDU: Glo command byte, length field, then the
    /// protected body.
    #[default]
    Framed,
    /// Protected body only (security byte onward), for embedding inside a
    /// larger structure.
    Bare,
}

/// Parameters of one ciphering operation
///
/// A `CipherContext` aggregates everything a single encode or decode
/// needs. It is built immediately before the call, is immutable once
/// built, and is discarded afterwards; output is a pure function of the
/// inputs plus the AEAD primitive, so contexts are never cached or
/// reused across frame counters.
#[derive(Debug, Clone)]
pub struct CipherContext {
    command: Command,
    security: SecurityMode,
    frame_counter: u32,
    system_title: SystemTitle,
    block_cipher_key: Vec<u8>,
    authentication_key: Vec<u8>,
    payload: Vec<u8>,
    shape: OutputShape,
}

impl CipherContext {
    /// Create a builder for an outgoing operation
    ///
    /// `command` is the caller's plaintext service command; its Glo
    /// counterpart is resolved when the context is built.
    pub fn builder(
        command: Command,
        security: SecurityMode,
        system_title: SystemTitle,
    ) -> CipherContextBuilder {
        CipherContextBuilder {
            command,
            security,
            system_title,
            frame_counter: 0,
            block_cipher_key: Vec::new(),
            authentication_key: Vec::new(),
            payload: Vec::new(),
            shape: OutputShape::default(),
        }
    }

    /// Reassemble a context from fields parsed off the wire.
    pub(crate) fn from_wire(
        command: Command,
        security: SecurityMode,
        frame_counter: u32,
        system_title: SystemTitle,
        block_cipher_key: Vec<u8>,
        authentication_key: Vec<u8>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            command,
            security,
            frame_counter,
            system_title,
            block_cipher_key,
            authentication_key,
            payload,
            shape: OutputShape::Framed,
        }
    }

    /// Get the resolved Glo command
    pub fn command(&self) -> Command {
        self.command
    }

    /// Get the security mode
    pub fn security(&self) -> SecurityMode {
        self.security
    }

    /// Get the frame counter
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Get the system title
    pub fn system_title(&self) -> &SystemTitle {
        &self.system_title
    }

    /// Get the block cipher key
    pub fn block_cipher_key(&self) -> &[u8] {
        &self.block_cipher_key
    }

    /// Get the authentication key
    pub fn authentication_key(&self) -> &[u8] {
        &self.authentication_key
    }

    /// Get the payload (plaintext on encode, ciphertext on decode)
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the output shape
    pub fn shape(&self) -> OutputShape {
        self.shape
    }
}

/// Builder for [`CipherContext`]
pub struct CipherContextBuilder {
    command: Command,
    security: SecurityMode,
    system_title: SystemTitle,
    frame_counter: u32,
    block_cipher_key: Vec<u8>,
    authentication_key: Vec<u8>,
    payload: Vec<u8>,
    shape: OutputShape,
}

impl CipherContextBuilder {
    /// Set the frame counter for this operation
    pub fn set_frame_counter(mut self, frame_counter: u32) -> Self {
        self.frame_counter = frame_counter;
        self
    }

    /// Set the block cipher key (16 bytes)
    pub fn set_block_cipher_key(mut self, key: Vec<u8>) -> Self {
        self.block_cipher_key = key;
        self
    }

    /// Set the authentication key folded into the AAD
    pub fn set_authentication_key(mut self, key: Vec<u8>) -> Self {
        self.authentication_key = key;
        self
    }

    /// Set the plaintext payload
    pub fn set_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Set the output shape
    pub fn set_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    /// Build the context
    ///
    /// Resolves the plaintext command to its Glo counterpart and
    /// validates the key length before any cryptographic work.
    pub fn build(self) -> CosemResult<CipherContext> {
        let command = self.command.to_glo()?;
        if self.block_cipher_key.len() != KEY_LEN {
            return Err(CosemError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: self.block_cipher_key.len(),
            });
        }
        Ok(CipherContext {
            command,
            security: self.security,
            frame_counter: self.frame_counter,
            system_title: self.system_title,
            block_cipher_key: self.block_cipher_key,
            authentication_key: self.authentication_key,
            payload: self.payload,
            shape: self.shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> SystemTitle {
        SystemTitle::new([1, 2, 3, 4, 5, 6, 7, 8])
    }

    #[test]
    fn test_builder_resolves_glo_command() {
        let ctx = CipherContext::builder(Command::GetRequest, SecurityMode::Encryption, title())
            .set_frame_counter(9)
            .set_block_cipher_key(vec![0u8; 16])
            .set_authentication_key(vec![1u8; 16])
            .set_payload(vec![0xAA])
            .build()
            .unwrap();
        assert_eq!(ctx.command(), Command::GloGetRequest);
        assert_eq!(ctx.frame_counter(), 9);
        assert_eq!(ctx.shape(), OutputShape::Framed);
    }

    #[test]
    fn test_builder_rejects_glo_command() {
        let err = CipherContext::builder(Command::GloSetRequest, SecurityMode::Encryption, title())
            .set_block_cipher_key(vec![0u8; 16])
            .build()
            .unwrap_err();
        assert_eq!(err, CosemError::InvalidCommand(Command::GloSetRequest.tag()));
    }

    #[test]
    fn test_builder_rejects_bad_key_length() {
        let err = CipherContext::builder(Command::GetRequest, SecurityMode::Encryption, title())
            .set_block_cipher_key(vec![0u8; 8])
            .build()
            .unwrap_err();
        assert_eq!(err, CosemError::InvalidKeyLength { expected: 16, actual: 8 });
    }
}
