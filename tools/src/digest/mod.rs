use bytes::{Buf, BufMut, BytesMut};

pub mod extend;
pub mod padding;
pub mod sha1;

pub struct Hasher<H : HashAlgorithm> {
    core : H,
    buf : BytesMut
}

/// Allows translation from a given hash and block_ind to reconstruct an internal state
pub trait FromState : HashAlgorithm {
    fn from_state( hash : Self::OUTPUT, block_ind : u64 ) -> Self;
}

/// Basic pattern for a Merkle–Damgård HashAlgorithm
///  - compress for exactly BUFFERLEN bytes
///  - padding to complete the tail of a message to whole blocks
///  - finalize for translating internal state to Hash
pub trait HashAlgorithm : Default {
    const BUFFERLEN : usize;
    type OUTPUT : Sized + Clone + Copy + AsRef<[u8]>;

    fn compress( &mut self, bytes : &[u8] );

    /// Appends the padding for a message whose first `prefix_len` bytes are not part of `buf`
    /// (already compressed, or never seen at all).
    fn padding( buf : &mut BytesMut, prefix_len : u64 );

    /// Number of bytes compressed into the state so far.
    fn processed( &self ) -> u64;

    fn finalize(self) -> Self::OUTPUT;
}

/// Implements a basic Hasher for a given HashAlgorithm
impl<H : HashAlgorithm> Hasher<H> {
    pub fn new() -> Self {
        Self { core: H::default(), buf: BytesMut::with_capacity(2*H::BUFFERLEN) }
    }

    pub fn update(&mut self, bytes : impl AsRef<[u8]> ) {
        self.buf.put(bytes.as_ref());
        self.compress_blocks();
    }

    pub fn finalize(mut self) -> H::OUTPUT {
        H::padding(&mut self.buf, self.core.processed());
        self.compress_blocks();
        debug_assert!(self.buf.is_empty());
        self.core.finalize()
    }

    fn compress_blocks(&mut self) {
        while let Some(block) = self.buf.get(0..H::BUFFERLEN) {
            self.core.compress(block);
            self.buf.advance(H::BUFFERLEN);
        }
    }
}

impl<H : HashAlgorithm> Default for Hasher<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H : FromState> Hasher<H> {
    pub(crate) fn from_state( hash : H::OUTPUT, block_ind : u64 ) -> Self {
        Self { core: H::from_state(hash, block_ind), buf: BytesMut::with_capacity(2*H::BUFFERLEN) }
    }
}

/// Calculates the MAC of a given (secret) key and message : MAC(key, message) = H( key || message )
pub fn mac<H : HashAlgorithm>( key : &[u8], message : &[u8] ) -> H::OUTPUT
{
    let mut hasher = Hasher::<H>::new();
    hasher.update(key);
    hasher.update(message);
    hasher.finalize()
}
