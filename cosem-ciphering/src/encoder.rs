//! Protected APDU encoding

use bytes::{BufMut, BytesMut};

use cosem_core::{Command, CosemResult, wire};

use crate::context::{CipherContext, OutputShape};
use crate::gcm::{GcmCipher, TAG_LEN, build_aad, build_nonce};
use crate::mode::SecurityMode;
use crate::title::SystemTitle;

/// Encode the protected byte sequence for one ciphering operation
///
/// Body layout after the security byte and the 4-byte big-endian frame
/// counter depends on the mode:
/// - `Authentication`: plaintext then the 12-byte tag
/// - `Encryption`: ciphertext only
/// - `AuthenticationEncryption`: ciphertext then the 12-byte tag
///
/// With `OutputShape::Framed` the body is wrapped with the Glo command
/// byte and a variable-length count; `OutputShape::Bare` returns the
/// body alone.
pub fn encode(ctx: &CipherContext) -> CosemResult<Vec<u8>> {
    log::trace!(
        "ciphering {:?} apdu: {} byte payload, mode 0x{:02X}",
        ctx.command(),
        ctx.payload().len(),
        ctx.security().byte()
    );
    let cipher = GcmCipher::new(ctx.block_cipher_key())?;
    let nonce = build_nonce(ctx.frame_counter(), ctx.system_title());
    let aad = build_aad(ctx.security(), ctx.authentication_key(), ctx.payload());

    let mut body = BytesMut::with_capacity(1 + 4 + ctx.payload().len() + TAG_LEN);
    body.put_u8(ctx.security().byte());
    body.put_u32(ctx.frame_counter());
    match ctx.security() {
        SecurityMode::Authentication => {
            // Tag over the AAD only; the plaintext inside it travels in clear.
            let (_, tag) = cipher.seal(&nonce, &aad, &[])?;
            body.put_slice(ctx.payload());
            body.put_slice(&tag);
        }
        SecurityMode::Encryption => {
            let (ciphertext, _tag) = cipher.seal(&nonce, &aad, ctx.payload())?;
            body.put_slice(&ciphertext);
        }
        SecurityMode::AuthenticationEncryption => {
            let (ciphertext, tag) = cipher.seal(&nonce, &aad, ctx.payload())?;
            body.put_slice(&ciphertext);
            body.put_slice(&tag);
        }
    }

    match ctx.shape() {
        OutputShape::Bare => Ok(body.to_vec()),
        OutputShape::Framed => {
            let mut framed = BytesMut::with_capacity(body.len() + 6);
            framed.put_u8(ctx.command().tag());
            wire::put_length(&mut framed, body.len());
            framed.put_slice(&body);
            Ok(framed.to_vec())
        }
    }
}

/// Protect a plaintext APDU
///
/// Remaps `command` into the Glo command space, then encodes the payload
/// under the requested security mode. Frame counter uniqueness per
/// system title is the caller's obligation.
#[allow(clippy::too_many_arguments)]
pub fn encrypt(
    command: Command,
    security: SecurityMode,
    frame_counter: u32,
    system_title: SystemTitle,
    block_cipher_key: &[u8],
    authentication_key: &[u8],
    plaintext: &[u8],
    shape: OutputShape,
) -> CosemResult<Vec<u8>> {
    let ctx = CipherContext::builder(command, security, system_title)
        .set_frame_counter(frame_counter)
        .set_block_cipher_key(block_cipher_key.to_vec())
        .set_authentication_key(authentication_key.to_vec())
        .set_payload(plaintext.to_vec())
        .set_shape(shape)
        .build()?;
    encode(&ctx)
}
