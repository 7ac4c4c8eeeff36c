//! Merkle–Damgård strengthening as used by SHA-1: a single `0x80` byte, zero fill up to 56 mod 64,
//! then the total message length in bits as a big-endian u64.
//!
//! The total length includes a *virtual prefix*: bytes that precede the buffer in the hashed
//! message but are not available here, either because they were already compressed or because
//! they are a secret key nobody outside the victim knows.

use bytes::{BufMut, BytesMut};

pub const BLOCK_LEN: usize = 64;

/// Length of the trailing bit-length field.
const LENGTH_FIELD: u64 = 8;

/// Appends the padding to `buf` in place. Afterwards `(buf.len() + prefix_len) % 64 == 0`.
///
/// The bit length wraps silently for messages longer than 2^64 bits.
pub fn pad_into(buf: &mut BytesMut, prefix_len: u64) {
    let total = (buf.len() as u64).wrapping_add(prefix_len);
    let bit_len = total.wrapping_mul(8);

    let block = BLOCK_LEN as u64;
    let tail = total % block;
    // one 0x80 byte plus zeros so that tail + 1 + zeros == 56 (mod 64)
    let n_zeros = (2 * block - LENGTH_FIELD - 1 - tail) % block;

    buf.reserve(1 + n_zeros as usize + LENGTH_FIELD as usize);
    buf.put_u8(0x80);
    buf.put_bytes(0x00, n_zeros as usize);
    buf.put_u64(bit_len);
}

/// Returns a copy of `buffer` followed by its padding, see [`pad_into`].
pub fn pad(buffer: &[u8], prefix_len: u64) -> BytesMut {
    let mut padded = BytesMut::with_capacity(buffer.len() + 2 * BLOCK_LEN);
    padded.put(buffer);
    pad_into(&mut padded, prefix_len);
    padded
}

/// Splits a padded buffer into whole blocks. A trailing partial block is not yielded.
pub fn blocks(buf: &[u8]) -> impl Iterator<Item = &[u8; BLOCK_LEN]> {
    buf.chunks_exact(BLOCK_LEN).filter_map(|block| block.try_into().ok())
}
