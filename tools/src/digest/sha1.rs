use bytes::BytesMut;

use super::padding::{pad_into, BLOCK_LEN};
use super::{FromState, HashAlgorithm, Hasher};
use crate::encode::hex::from_hex;
use crate::error::{Error, Result};

pub const DIGEST_LEN: usize = 20;

/// Big-endian serialization of a [`HashState`].
pub type Digest = [u8; DIGEST_LEN];

pub type Sha1 = Hasher<Sha1Core>;

/// The five chaining words `(a, b, c, d, e)` between two blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashState(pub [u32; 5]);

impl HashState {
    /// The standard SHA-1 initial vector.
    pub const IV: Self = Self([0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0]);

    /// Splits a digest back into the chaining state that produced it.
    pub fn from_digest(digest: &Digest) -> Self {
        let mut state = [0u32; 5];
        state
            .iter_mut()
            .zip(digest.chunks_exact(4))
            .for_each(|(v, chunk)| *v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        Self(state)
    }

    pub fn to_digest(self) -> Digest {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes
            .chunks_exact_mut(4)
            .zip(self.0)
            .for_each(|(chunk, v)| chunk.copy_from_slice(&v.to_be_bytes()));
        bytes
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::IV
    }
}

/// Parses a published digest given as 40 hex characters.
pub fn parse_digest(hex: &str) -> Result<Digest> {
    let n_chars = hex.chars().count();
    if n_chars != 2 * DIGEST_LEN {
        return Err(Error::InvalidDigest(format!(
            "expected {} hex characters, got {}",
            2 * DIGEST_LEN,
            n_chars
        )));
    }
    let bytes = from_hex(hex).map_err(|e| Error::InvalidDigest(format!("{e}")))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| Error::InvalidDigest(format!("expected {DIGEST_LEN} bytes, got {}", b.len())))
}

/// SHA-1 compression of a single 64 byte block, starting from an arbitrary `state`.
///
/// All word arithmetic wraps modulo 2^32.
pub fn compress(block: &[u8; BLOCK_LEN], state: HashState) -> HashState {
    let mut w = [0u32; 80];
    w.iter_mut()
        .zip(block.chunks_exact(4))
        .for_each(|(u, v)| *u = u32::from_be_bytes([v[0], v[1], v[2], v[3]]));

    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1)
    }

    let [mut a, mut b, mut c, mut d, mut e] = state.0;

    for (i, wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => (f1(b, c, d), 0x5A827999),
            20..=39 => (f2(b, c, d), 0x6ED9EBA1),
            40..=59 => (f3(b, c, d), 0x8F1BBCDC),
            _ => (f2(b, c, d), 0xCA62C1D6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(*wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    let [h0, h1, h2, h3, h4] = state.0;
    HashState([
        h0.wrapping_add(a),
        h1.wrapping_add(b),
        h2.wrapping_add(c),
        h3.wrapping_add(d),
        h4.wrapping_add(e),
    ])
}

#[derive(Default)]
pub struct Sha1Core {
    state: HashState,
    block_ind: u64,
}

impl HashAlgorithm for Sha1Core {
    const BUFFERLEN: usize = BLOCK_LEN;
    type OUTPUT = Digest;

    fn compress(&mut self, bytes: &[u8]) {
        let block = bytes.try_into().expect("Hasher only hands out whole blocks");
        self.state = compress(block, self.state);
        self.block_ind = self.block_ind.wrapping_add(1);
    }

    fn padding(buf: &mut BytesMut, prefix_len: u64) {
        pad_into(buf, prefix_len)
    }

    fn processed(&self) -> u64 {
        self.block_ind.wrapping_mul(Self::BUFFERLEN as u64)
    }

    fn finalize(self) -> Self::OUTPUT {
        self.state.to_digest()
    }
}

impl FromState for Sha1Core {
    fn from_state(hash: Self::OUTPUT, block_ind: u64) -> Self {
        Self { state: HashState::from_digest(&hash), block_ind }
    }
}

#[inline]
fn f1(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (!b & d)
}

#[inline]
fn f2(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}

#[inline]
fn f3(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (b & d) | (c & d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::padding::{blocks, pad};
    use crate::encode::hex::to_hex;

    fn digest_of(message: &[u8]) -> String {
        let padded = pad(message, 0);
        let state = blocks(&padded).fold(HashState::IV, |state, block| compress(block, state));
        to_hex(&state.to_digest())
    }

    #[test]
    fn test_compress_known_vectors() {
        assert_eq!(digest_of(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(digest_of(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        // two blocks after padding
        assert_eq!(
            digest_of(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
        );
    }

    #[test]
    fn test_sha1() {
        // test vectors again from wikipedia : https://en.wikipedia.org/wiki/SHA-1
        let mut hasher = Sha1::new();
        hasher.update(&b"The quick brown fox jumps over the lazy dog"[..]);
        let state = hasher.finalize();

        assert_eq!(to_hex(&state), "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12");

        let mut hasher = Sha1::new();
        hasher.update(&b"The quick brown fox jumps over the lazy cog"[..]);
        let state = hasher.finalize();

        assert_eq!(to_hex(&state), "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3")
    }

    #[test]
    fn test_sha1_against_openssl() {
        for len in [0usize, 1, 55, 56, 63, 64, 65, 119, 120, 1000] {
            let msg: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let mut hasher = Sha1::new();
            hasher.update(&msg);
            assert_eq!(hasher.finalize(), openssl::sha::sha1(&msg), "len {len}");
        }
    }

    #[test]
    fn test_state_digest_conversion() {
        let digest = HashState::IV.to_digest();
        assert_eq!(to_hex(&digest), "67452301efcdab8998badcfe10325476c3d2e1f0");
        assert_eq!(HashState::from_digest(&digest), HashState::IV);
    }

    #[test]
    fn test_compress_is_pure() {
        let block = [0x5Au8; BLOCK_LEN];
        let state = HashState([u32::MAX; 5]);
        assert_eq!(compress(&block, state), compress(&block, state));
        assert_ne!(compress(&block, state), compress(&block, HashState::IV));
    }

    #[test]
    #[should_panic]
    fn test_core_rejects_short_block() {
        let mut core = Sha1Core::default();
        HashAlgorithm::compress(&mut core, &[0u8; 63]);
    }

    #[test]
    fn test_parse_digest() {
        let digest = parse_digest("DA39A3EE5E6B4B0D3255BFEF95601890AFD80709").unwrap();
        assert_eq!(to_hex(&digest), "da39a3ee5e6b4b0d3255bfef95601890afd80709");

        for bad in [
            "",
            "da39a3ee",
            "da39a3ee5e6b4b0d3255bfef95601890afd8070",
            "da39a3ee5e6b4b0d3255bfef95601890afd8070900",
            "da39a3ee5e6b4b0d3255bfef95601890afd8070g",
            "da39a3ee5e6b4b0d3255bfef95601890afd8070 ",
        ] {
            assert!(matches!(parse_digest(bad), Err(Error::InvalidDigest(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_digest_counts_characters() {
        assert_eq!(
            parse_digest(&"é".repeat(3)),
            Err(Error::InvalidDigest("expected 40 hex characters, got 3".into()))
        );
        // 20 two-byte characters are 40 bytes but still not a digest
        assert_eq!(
            parse_digest(&"é".repeat(20)),
            Err(Error::InvalidDigest("expected 40 hex characters, got 20".into()))
        );
        assert!(matches!(parse_digest(&"é".repeat(40)), Err(Error::InvalidDigest(_))));
    }
}
