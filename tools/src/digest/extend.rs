//! Length-extension forgery against the keyed-prefix MAC `SHA1(secret || message)`.
//!
//! Knowing only `len(secret)`, `message` and the published digest, the attacker rebuilds the
//! padding the victim appended, resumes compression from the digest, and obtains a valid digest
//! for `message || padding || extension`.

use bytes::{BufMut, BytesMut};
use log::{debug, trace};

use super::padding::{blocks, pad, BLOCK_LEN};
use super::sha1::{compress, parse_digest, Digest, HashState};
use super::{FromState, Hasher};
use crate::error::Result;

/// A forged message together with the digest the victim will compute for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forgery {
    /// The bytes to send in place of the known message: `message || padding || extension`.
    pub message: Vec<u8>,
    pub digest: Digest,
}

/// Forges `(message', digest')` with `digest' == SHA1(secret || message')` for any secret of
/// `key_len` bytes, given the hex encoded `digest_hex == SHA1(secret || message)`.
pub fn forge(key_len: usize, message: &[u8], digest_hex: &str, extension: &[u8]) -> Result<Forgery> {
    let digest = parse_digest(digest_hex)?;
    Ok(forge_with_digest(key_len, message, &digest, extension))
}

/// Like [`forge`], with the published digest already decoded.
pub fn forge_with_digest(key_len: usize, message: &[u8], digest: &Digest, extension: &[u8]) -> Forgery {
    // the padding the victim's hasher appended after secret || message
    let padded_message = pad(message, key_len as u64);
    // wraps like the bit length inside pad_into, totals beyond 2^64 bits are not representable
    let length_before_extension = (padded_message.len() as u64).wrapping_add(key_len as u64);

    // the extension is the tail of a message that already holds length_before_extension bytes
    let padded_extension = pad(extension, length_before_extension);
    debug!(
        "key {} bytes, glue padding {} bytes, {} extension block(s)",
        key_len,
        padded_message.len() - message.len(),
        padded_extension.len() / BLOCK_LEN
    );

    let state = blocks(&padded_extension)
        .enumerate()
        .fold(HashState::from_digest(digest), |state, (i, block)| {
            let next = compress(block, state);
            trace!("block {i}: {state:08x?} -> {next:08x?}");
            next
        });

    let mut forged = padded_message;
    forged.put(extension);
    Forgery { message: forged.to_vec(), digest: state.to_digest() }
}

/// Implements Length-Extension Attack on a HashAlgorithm where the inner state can be reconstructed from the output.
/// The extension may be fed in pieces through `update`.
pub struct LengthExtender<H : FromState> {
    msg : BytesMut,
    hasher : Hasher<H>
}

impl<H : FromState> LengthExtender<H>
{
    pub fn new( keylen : usize, msg : &[u8], hash : H::OUTPUT ) -> Self {
        let mut bytes = BytesMut::with_capacity(msg.len() + 2*H::BUFFERLEN);
        bytes.put(msg);

        // simulate the victim's padding, the key stays virtual
        H::padding(&mut bytes, keylen as u64);
        let block_ind = (bytes.len() as u64).wrapping_add(keylen as u64) / H::BUFFERLEN as u64;

        Self { msg: bytes, hasher: Hasher::from_state(hash, block_ind) }
    }

    pub fn update(&mut self, bytes : &[u8] ) {
        self.hasher.update(bytes);
        self.msg.put(bytes);
    }

    pub fn finalize(self) -> (Vec<u8>, H::OUTPUT) {
        (self.msg.into(), self.hasher.finalize())
    }
}
