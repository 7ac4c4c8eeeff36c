pub mod hex {
    pub use ::hex::FromHexError;

    /// Converts a hex string into bytes. Both lower- and upper-case digits are accepted.
    pub fn from_hex(hex: &str) -> Result<Vec<u8>, FromHexError> {
        ::hex::decode(hex)
    }

    /// Converts bytes to a lower-case hex string.
    pub fn to_hex(bytes: &[u8]) -> String {
        ::hex::encode(bytes)
    }

}

pub mod ascii {

    /// Encodes a Byte Slice into ASCII Encoding with an option to escape non-printable characters
    pub fn to_ascii(bytes: &[u8], escape: bool) -> String {
        if escape {
            bytes
                .iter()
                .flat_map(|v| v.escape_ascii().map(|v| v as char))
                .collect()
        } else {
            bytes.iter().map(|v| *v as char).collect()
        }
    }

}
