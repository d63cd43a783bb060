//! Global ciphering for DLMS/COSEM APDUs
//!
//! This crate protects application-layer messages exchanged between a
//! metering device and a client using AES-128-GCM. Three protection
//! levels are supported: authentication only, encryption only, and
//! combined authentication + encryption. Outgoing plaintext APDUs are
//! encapsulated into the ciphered Glo command space and incoming
//! protected APDUs are parsed, decrypted and verified.
//!
//! Each encode/decode call is a stateless transformation over its
//! explicit inputs, so the engine is safe to use concurrently without
//! locking. Frame-counter uniqueness per system title is the caller's
//! obligation; [`FrameCounter`] provides an externally-synchronized
//! counter for that purpose.

pub mod context;
pub mod counter;
pub mod decoder;
pub mod encoder;
pub mod gcm;
pub mod mode;
pub mod title;

pub use context::{CipherContext, CipherContextBuilder, OutputShape};
pub use cosem_core::{Command, CosemError, CosemResult};
pub use counter::FrameCounter;
pub use decoder::decrypt;
pub use encoder::encrypt;
pub use mode::SecurityMode;
pub use title::SystemTitle;
