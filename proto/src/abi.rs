//! Decoding of values returned by contract view functions.
//!
//! A view call answers with a list of base64 strings, one per returned value.
//! Each top-level value is top-encoded (minimal big-endian, empty = zero);
//! struct fields inside it are nested-encoded (fixed width integers, big
//! integers prefixed with a 4-byte big-endian length).

use base64::{engine::general_purpose::STANDARD, Engine};
use errors::abi::AbiError;
use intl::BigUint;

pub type Result<T> = std::result::Result<T, AbiError>;

pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|e| AbiError::InvalidBase64(e.to_string()))
}

pub fn top_decode_u64(bytes: &[u8]) -> Result<u64> {
    if bytes.len() > 8 {
        return Err(AbiError::Overflow("u64"));
    }

    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
}

pub fn top_decode_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

pub struct NestedReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> NestedReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(AbiError::UnexpectedEof {
                pos: self.pos,
                need: len,
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;

        Ok(slice)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;

        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);

        Ok(u64::from_be_bytes(buf))
    }

    pub fn read_biguint(&mut self) -> Result<BigUint> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_bytes(len)?;

        Ok(BigUint::from_bytes_be(bytes))
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(AbiError::TrailingBytes(n)),
        }
    }
}

/// A struct returned as one top-level value with nested-encoded fields.
pub trait NestedDecode: Sized {
    fn dep_decode(reader: &mut NestedReader<'_>) -> Result<Self>;

    fn top_decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = NestedReader::new(bytes);
        let value = Self::dep_decode(&mut reader)?;
        reader.finish()?;

        Ok(value)
    }

    fn from_base64(data: &str) -> Result<Self> {
        let bytes = decode_base64(data)?;

        Self::top_decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: u64,
        amount: BigUint,
    }

    impl NestedDecode for Pair {
        fn dep_decode(reader: &mut NestedReader<'_>) -> Result<Self> {
            Ok(Pair {
                id: reader.read_u64()?,
                amount: reader.read_biguint()?,
            })
        }
    }

    #[test]
    fn test_top_decode_u64() {
        assert_eq!(top_decode_u64(&[]).unwrap(), 0);
        assert_eq!(top_decode_u64(&[0x01, 0x00]).unwrap(), 256);
        assert_eq!(top_decode_u64(&[0xff; 8]).unwrap(), u64::MAX);
        assert_eq!(top_decode_u64(&[1; 9]), Err(AbiError::Overflow("u64")));
    }

    #[test]
    fn test_top_decode_biguint() {
        assert_eq!(top_decode_biguint(&[]), BigUint::default());
        assert_eq!(top_decode_biguint(&[0x03, 0xe8]), BigUint::from(1000u32));
    }

    #[test]
    fn test_nested_struct() {
        let bytes = [
            0, 0, 0, 0, 0, 0, 0, 7, // id
            0, 0, 0, 2, 0x03, 0xe8, // amount, 2 bytes
        ];
        let pair = Pair::top_decode(&bytes).unwrap();

        assert_eq!(
            pair,
            Pair {
                id: 7,
                amount: BigUint::from(1000u32)
            }
        );
    }

    #[test]
    fn test_nested_struct_from_base64() {
        let bytes = [0u8, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0];
        let encoded = STANDARD.encode(bytes);
        let pair = Pair::from_base64(&encoded).unwrap();

        assert_eq!(pair.id, 1);
        assert_eq!(pair.amount, BigUint::default());
    }

    #[test]
    fn test_truncated_and_trailing() {
        let truncated = [0u8, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 5, 1];
        assert!(matches!(
            Pair::top_decode(&truncated),
            Err(AbiError::UnexpectedEof { .. })
        ));

        let trailing = [0u8, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 9];
        assert_eq!(Pair::top_decode(&trailing), Err(AbiError::TrailingBytes(1)));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_base64("***"),
            Err(AbiError::InvalidBase64(_))
        ));
    }
}
