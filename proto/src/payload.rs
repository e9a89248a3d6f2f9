use crate::address::Address;
use config::contracts::endpoints::{ESDT_TRANSFER, MULTI_ESDT_NFT_TRANSFER};
use intl::{
    hex::{encode_argument, encode_u64_argument, encode_utf8_to_hex},
    BigUint,
};

/// `function@arg@arg` call data. The function name stays plain text, every
/// argument is byte-aligned hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    function: String,
    args: Vec<String>,
}

impl CallData {
    pub fn new(function: &str) -> Self {
        Self {
            function: function.to_string(),
            args: Vec::new(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg_u64(mut self, value: u64) -> Self {
        self.args.push(encode_u64_argument(value));
        self
    }

    pub fn arg_biguint(mut self, value: &BigUint) -> Self {
        self.args.push(encode_argument(value));
        self
    }

    pub fn arg_str(mut self, value: &str) -> Self {
        self.args.push(encode_utf8_to_hex(value));
        self
    }

    pub fn arg_address(mut self, value: &Address) -> Self {
        self.args.push(value.to_hex());
        self
    }

    pub fn build(&self) -> String {
        let mut data = self.function.clone();

        for arg in &self.args {
            data.push('@');
            data.push_str(arg);
        }

        data
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub identifier: String,
    pub nonce: u64,
    pub amount: BigUint,
}

impl TokenTransfer {
    pub fn non_fungible(collection: &str, nonce: u64) -> Self {
        Self {
            identifier: collection.to_string(),
            nonce,
            amount: BigUint::from(1u8),
        }
    }
}

/// Fungible transfer that invokes `call` on the receiving contract.
pub fn esdt_transfer(token_identifier: &str, amount: &BigUint, call: &CallData) -> String {
    let mut data = CallData::new(ESDT_TRANSFER)
        .arg_str(token_identifier)
        .arg_biguint(amount)
        .arg_str(call.function());
    data.args.extend(call.args().iter().cloned());

    data.build()
}

/// Multi-token transfer. The transaction goes to the sender itself and names
/// the real destination inside the data.
pub fn multi_esdt_nft_transfer(
    destination: &Address,
    transfers: &[TokenTransfer],
    call: &CallData,
) -> String {
    let mut data = CallData::new(MULTI_ESDT_NFT_TRANSFER)
        .arg_address(destination)
        .arg_u64(transfers.len() as u64);

    for transfer in transfers {
        data = data
            .arg_str(&transfer.identifier)
            .arg_u64(transfer.nonce)
            .arg_biguint(&transfer.amount);
    }

    data = data.arg_str(call.function());
    data.args.extend(call.args().iter().cloned());

    data.build()
}

/// Identifier of a single NFT: `COLLECTION-hexnonce`.
pub fn nft_identifier(collection: &str, nonce: u64) -> String {
    format!("{}-{}", collection, encode_u64_argument(nonce))
}
