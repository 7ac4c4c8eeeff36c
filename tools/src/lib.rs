//! SHA-1 building blocks exposed at the granularity a length-extension attack needs:
//! Merkle–Damgård padding with a virtual prefix, a compression function that accepts any
//! starting state, and a driver that resumes hashing from a published digest.

pub mod digest;
pub mod encode;
pub mod error;

pub use error::{Error, Result};
