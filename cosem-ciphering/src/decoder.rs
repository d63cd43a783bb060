//! Protected APDU decoding

use bytes::Buf;
use subtle::ConstantTimeEq;

use cosem_core::{Command, CosemError, CosemResult, wire};

use crate::context::CipherContext;
use crate::gcm::{GcmCipher, TAG_LEN, build_aad, build_nonce};
use crate::mode::SecurityMode;
use crate::title::SystemTitle;

/// Recover the plaintext APDU from a framed protected buffer
///
/// Expects the self-describing form: Glo command byte, variable-length
/// count, then the protected body. `system_title` must be the sender's
/// title, the one used when the frame was ciphered.
///
/// Replay protection is out of scope here: the received frame counter is
/// consumed for nonce reconstruction only, and tracking its monotonicity
/// is left to the protocol layer.
pub fn decrypt(
    buffer: &[u8],
    system_title: &SystemTitle,
    block_cipher_key: &[u8],
    authentication_key: &[u8],
) -> CosemResult<Vec<u8>> {
    if buffer.len() < 2 {
        return Err(CosemError::BufferTooShort {
            needed: 2,
            actual: buffer.len(),
        });
    }
    let mut buf = buffer;
    let tag_byte = buf.get_u8();
    let command = match Command::from_tag(tag_byte) {
        Some(cmd) if cmd.is_glo() => cmd,
        _ => return Err(CosemError::UnsupportedCommand(tag_byte)),
    };
    let declared = wire::get_length(&mut buf)?;
    if declared > buf.len() {
        return Err(CosemError::LengthMismatch {
            declared,
            remaining: buf.len(),
        });
    }
    // A trailing surplus beyond the declared length is tolerated.
    let mut body = &buf[..declared];
    if body.len() < 5 {
        return Err(CosemError::BufferTooShort {
            needed: 5,
            actual: body.len(),
        });
    }
    let security = SecurityMode::from_byte(body.get_u8())?;
    let frame_counter = body.get_u32();
    log::trace!(
        "deciphering {:?} apdu: mode 0x{:02X}, fc={}, {} body bytes",
        command,
        security.byte(),
        frame_counter,
        body.len()
    );

    let ctx = CipherContext::from_wire(
        command,
        security,
        frame_counter,
        *system_title,
        block_cipher_key.to_vec(),
        authentication_key.to_vec(),
        body.to_vec(),
    );
    open_body(&ctx)
}

/// Open the protected body of a parsed context
fn open_body(ctx: &CipherContext) -> CosemResult<Vec<u8>> {
    let cipher = GcmCipher::new(ctx.block_cipher_key())?;
    let nonce = build_nonce(ctx.frame_counter(), ctx.system_title());
    let body = ctx.payload();
    match ctx.security() {
        SecurityMode::Authentication => {
            let (plaintext, received) = split_tag(body)?;
            let aad = build_aad(SecurityMode::Authentication, ctx.authentication_key(), plaintext);
            let (_, expected) = cipher.seal(&nonce, &aad, &[])?;
            // Fixed-time compare; the mismatch position must not leak.
            if expected[..].ct_eq(&received[..]).into() {
                Ok(plaintext.to_vec())
            } else {
                log::debug!("tag mismatch on authenticated-plaintext frame (fc={})", ctx.frame_counter());
                Err(CosemError::AuthenticationFailed)
            }
        }
        SecurityMode::Encryption => cipher.open_unauthenticated(&nonce, body),
        SecurityMode::AuthenticationEncryption => {
            let (ciphertext, received) = split_tag(body)?;
            let aad =
                build_aad(SecurityMode::AuthenticationEncryption, ctx.authentication_key(), &[]);
            cipher.open(&nonce, &aad, ciphertext, &received)
        }
    }
}

/// Split the trailing 12-byte tag off an authenticated body
fn split_tag(body: &[u8]) -> CosemResult<(&[u8], [u8; TAG_LEN])> {
    if body.len() < TAG_LEN {
        return Err(CosemError::BufferTooShort {
            needed: TAG_LEN,
            actual: body.len(),
        });
    }
    let (data, tail) = body.split_at(body.len() - TAG_LEN);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(tail);
    Ok((data, tag))
}
