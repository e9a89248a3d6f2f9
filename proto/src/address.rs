use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use config::address::{HRP_ERD, PUBKEY_LEN};
use errors::address::AddressError;

type Result<T> = std::result::Result<T, AddressError>;

/// Smart contract public keys start with this many zero bytes.
const CONTRACT_PREFIX_LEN: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; PUBKEY_LEN]);

impl Address {
    pub const ZERO: Self = Self([0u8; PUBKEY_LEN]);

    pub fn from_bytes(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bech32(addr: &str) -> Result<Self> {
        let (hrp, bytes) =
            bech32::decode(addr).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;

        if hrp.to_string() != HRP_ERD {
            return Err(AddressError::InvalidHRP(hrp.to_string()));
        }

        let len = bytes.len();
        let bytes: [u8; PUBKEY_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(len))?;

        Ok(Self(bytes))
    }

    pub fn from_hex(pubkey: &str) -> Result<Self> {
        let bytes = hex::decode(pubkey).map_err(|_| AddressError::InvalidHex)?;
        let len = bytes.len();
        let bytes: [u8; PUBKEY_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(len))?;

        Ok(Self(bytes))
    }

    pub fn to_bech32(&self) -> Result<String> {
        let hrp = Hrp::parse(HRP_ERD).map_err(|_| AddressError::InvalidHRP(HRP_ERD.to_string()))?;

        bech32::encode::<Bech32>(hrp, &self.0)
            .map_err(|e| AddressError::InvalidBech32(e.to_string()))
    }

    /// Public key hex, the form addresses take inside call data.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }

    pub fn is_smart_contract(&self) -> bool {
        self.0[..CONTRACT_PREFIX_LEN].iter().all(|b| *b == 0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = self.to_bech32().map_err(|_| std::fmt::Error)?;

        f.write_str(&encoded)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_bech32() {
            Ok(encoded) => write!(f, "{}", encoded),
            Err(_) => write!(f, "0x{}", self.to_hex()),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bech32(s.trim())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = self.to_bech32().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}
