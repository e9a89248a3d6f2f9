use async_trait::async_trait;
use bigdecimal::BigDecimal;
use errors::{network::NetworkErrors, rpc::RpcError};
use intl::{wei::parse_chain_units, BigUint};
use proto::{
    abi::{decode_base64, top_decode_biguint, top_decode_u64, NestedDecode, NestedReader},
    address::Address,
    payload::nft_identifier,
    product::Product,
};
use rpc::{
    common::{GatewayRpc, GraphQlRpc},
    interfaces::{MexTokenRes, NftRes, TokenBalanceRes, VmQueryRequest, VmQueryResponse},
    methods::{ApiPath, ViewMethod},
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    earnings::ProductRates,
    provider::NetworkProvider,
    stake::{RewardQuote, StakingPosition},
    stake_parse::{normalize, USER_STAKING},
    Result,
};

const POSITIONS_QUERY: &str = r#"
    tokenPrice
    stakingNft {
        _address
        tokensPerDay
        rewardsForUser(address: $user)
        userStaking(user: $user) { nonce staked_epoch last_claimed_timestamp }
    }
    stakingToken {
        _address
        apr
        rewardsForUser(address: $user)
        userStaking(user: $user) { staked_amount staked_epoch last_claimed_timestamp }
    }
    stakingTokenLocked {
        _address
        apr
        lockDays
        rewardsForUser(address: $user)
        userStaking(user: $user) { id staked_amount staked_epoch last_claimed_timestamp unlock_timestamp }
    }
"#;

const LOTTERY_QUERY: &str = r#"
    lottery {
        _address
        ticketToken
        ticketPrice
        prizeAmount
        prizeToken
        prizeNonce
        prizeDescription
        userTickets(user: $user)
        winnerTicket
        lastTicketId
        deadline
    }
"#;

fn aggregate_query(root: &str, body: &str) -> String {
    format!("query($user: String) {{ {} {{ {} }} }}", root, body)
}

struct RawNftStake(Value);

impl NestedDecode for RawNftStake {
    fn dep_decode(reader: &mut NestedReader<'_>) -> proto::abi::Result<Self> {
        Ok(Self(json!({
            "nonce": reader.read_u64()?,
            "staked_epoch": reader.read_u64()?,
            "last_claimed_timestamp": reader.read_u64()?,
        })))
    }
}

struct RawTokenStake(Value);

impl NestedDecode for RawTokenStake {
    fn dep_decode(reader: &mut NestedReader<'_>) -> proto::abi::Result<Self> {
        Ok(Self(json!({
            "staked_amount": reader.read_biguint()?.to_string(),
            "staked_epoch": reader.read_u64()?,
            "last_claimed_timestamp": reader.read_u64()?,
        })))
    }
}

struct RawLockEntry(Value);

impl NestedDecode for RawLockEntry {
    fn dep_decode(reader: &mut NestedReader<'_>) -> proto::abi::Result<Self> {
        Ok(Self(json!({
            "id": reader.read_u64()?,
            "staked_amount": reader.read_biguint()?.to_string(),
            "staked_epoch": reader.read_u64()?,
            "last_claimed_timestamp": reader.read_u64()?,
            "unlock_timestamp": reader.read_u64()?,
        })))
    }
}

/// Read-only chain queries. Every call is independent and may run
/// concurrently with the others.
#[async_trait]
pub trait StakingReader {
    /// Raw `returnData` of a view function, base64 decoded.
    async fn query_contract(
        &self,
        contract: &Address,
        method: ViewMethod,
        args: Vec<String>,
    ) -> Result<Vec<Vec<u8>>>;

    async fn get_nft_positions(&self, contract: &Address, user: &Address) -> Result<Value>;
    async fn get_token_position(&self, contract: &Address, user: &Address) -> Result<Value>;
    async fn get_locked_positions(&self, contract: &Address, user: &Address) -> Result<Value>;
    async fn get_rewards(&self, contract: &Address, user: &Address) -> Result<BigUint>;
    async fn get_apr(&self, contract: &Address) -> Result<BigDecimal>;
    async fn get_lock_days(&self, contract: &Address) -> Result<u64>;
    async fn get_tokens_per_day(&self, contract: &Address) -> Result<BigUint>;
    async fn get_lottery(&self, user: &Address) -> Result<Value>;
    async fn get_token_price(&self, identifier: &str) -> Result<f64>;

    async fn get_token_balance(&self, user: &Address, identifier: &str) -> Result<BigUint>;
    async fn get_wallet_nfts(&self, user: &Address, collection: &str) -> Result<Vec<NftRes>>;
    async fn get_collection_nfts(&self, collection: &str, nonces: &[u64])
        -> Result<Vec<NftRes>>;
    async fn get_aggregate(&self, user: &Address) -> Result<Value>;

    async fn fetch_position(&self, product: Product, user: &Address) -> Result<StakingPosition>;
    async fn fetch_reward(&self, product: Product, user: &Address) -> Result<RewardQuote>;
    async fn fetch_rates(&self) -> Result<ProductRates>;
}

fn first_value(values: &[Vec<u8>]) -> &[u8] {
    values.first().map(|v| v.as_slice()).unwrap_or_default()
}

fn take_root(mut data: Value, root: &str) -> Result<Value> {
    match data.get_mut(root) {
        Some(aggregate) if aggregate.is_object() => Ok(aggregate.take()),
        _ => Err(NetworkErrors::QueryMalformed(format!(
            "missing aggregate root `{}`",
            root
        ))),
    }
}

#[async_trait]
impl StakingReader for NetworkProvider {
    async fn query_contract(
        &self,
        contract: &Address,
        method: ViewMethod,
        args: Vec<String>,
    ) -> Result<Vec<Vec<u8>>> {
        let request = VmQueryRequest {
            sc_address: contract.to_string(),
            func_name: method.to_string(),
            args,
        };
        let body =
            serde_json::to_value(&request).map_err(|e| NetworkErrors::QueryMalformed(e.to_string()))?;
        let res: VmQueryResponse = self.rpc().post(&ApiPath::VmQuery.path(), &body).await?;

        debug!(target: "reader", %contract, %method, code = %res.return_code, "view query");

        if !res.is_ok() {
            return Err(NetworkErrors::QueryFailed(RpcError::BadRequest(format!(
                "{}: {}",
                res.return_code,
                res.return_message.unwrap_or_default()
            ))));
        }

        res.values()
            .into_iter()
            .map(|v| decode_base64(v).map_err(NetworkErrors::from))
            .collect()
    }

    async fn get_nft_positions(&self, contract: &Address, user: &Address) -> Result<Value> {
        let values = self
            .query_contract(contract, ViewMethod::GetUserStaking, vec![user.to_hex()])
            .await?;
        let stakes = values
            .iter()
            .map(|v| RawNftStake::top_decode(v).map(|s| s.0))
            .collect::<proto::abi::Result<Vec<_>>>()?;

        Ok(json!({ USER_STAKING: stakes }))
    }

    async fn get_token_position(&self, contract: &Address, user: &Address) -> Result<Value> {
        let values = self
            .query_contract(contract, ViewMethod::GetUserStaking, vec![user.to_hex()])
            .await?;
        let bytes = first_value(&values);

        if bytes.is_empty() {
            return Ok(json!({ USER_STAKING: null }));
        }

        let stake = RawTokenStake::top_decode(bytes)?;

        Ok(json!({ USER_STAKING: stake.0 }))
    }

    async fn get_locked_positions(&self, contract: &Address, user: &Address) -> Result<Value> {
        let values = self
            .query_contract(contract, ViewMethod::GetUserStaking, vec![user.to_hex()])
            .await?;
        let entries = values
            .iter()
            .map(|v| RawLockEntry::top_decode(v).map(|e| e.0))
            .collect::<proto::abi::Result<Vec<_>>>()?;

        Ok(json!({ USER_STAKING: entries }))
    }

    async fn get_rewards(&self, contract: &Address, user: &Address) -> Result<BigUint> {
        let values = self
            .query_contract(
                contract,
                ViewMethod::CalculateRewardsForUser,
                vec![user.to_hex()],
            )
            .await?;

        Ok(top_decode_biguint(first_value(&values)))
    }

    async fn get_apr(&self, contract: &Address) -> Result<BigDecimal> {
        let values = self
            .query_contract(contract, ViewMethod::GetApr, vec![])
            .await?;

        Ok(BigDecimal::from(top_decode_u64(first_value(&values))?))
    }

    async fn get_lock_days(&self, contract: &Address) -> Result<u64> {
        let values = self
            .query_contract(contract, ViewMethod::GetLockDays, vec![])
            .await?;

        Ok(top_decode_u64(first_value(&values))?)
    }

    async fn get_tokens_per_day(&self, contract: &Address) -> Result<BigUint> {
        let values = self
            .query_contract(contract, ViewMethod::GetTokensPerDay, vec![])
            .await?;

        Ok(top_decode_biguint(first_value(&values)))
    }

    async fn get_lottery(&self, user: &Address) -> Result<Value> {
        let root = &self.deployment.aggregate_root;
        let query = aggregate_query(root, LOTTERY_QUERY);
        let data: Value = self
            .rpc()
            .query(&query, json!({ "user": user.to_string() }))
            .await?;

        let mut aggregate = take_root(data, root)?;

        Ok(aggregate["lottery"].take())
    }

    async fn get_token_price(&self, identifier: &str) -> Result<f64> {
        let res: MexTokenRes = self
            .rpc()
            .get(&ApiPath::MexToken { identifier }.path())
            .await?;

        Ok(res.price)
    }

    async fn get_token_balance(&self, user: &Address, identifier: &str) -> Result<BigUint> {
        let address = user.to_string();
        let path = ApiPath::AccountToken {
            address: &address,
            token: identifier,
        }
        .path();

        match self.rpc().get::<TokenBalanceRes>(&path).await {
            Ok(res) => parse_chain_units(&res.balance)
                .map_err(|e| NetworkErrors::QueryMalformed(e.to_string())),
            // the account never held the token
            Err(RpcError::HttpError(404, _)) => Ok(BigUint::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_wallet_nfts(&self, user: &Address, collection: &str) -> Result<Vec<NftRes>> {
        let address = user.to_string();
        let path = ApiPath::AccountNfts {
            address: &address,
            collection,
        }
        .path();

        Ok(self.rpc().get(&path).await?)
    }

    async fn get_collection_nfts(
        &self,
        collection: &str,
        nonces: &[u64],
    ) -> Result<Vec<NftRes>> {
        if nonces.is_empty() {
            return Ok(Vec::new());
        }

        let identifiers: Vec<String> = nonces
            .iter()
            .map(|nonce| nft_identifier(collection, *nonce))
            .collect();
        let path = ApiPath::CollectionNfts {
            collection,
            identifiers: &identifiers,
        }
        .path();

        Ok(self.rpc().get(&path).await?)
    }

    async fn get_aggregate(&self, user: &Address) -> Result<Value> {
        let root = &self.deployment.aggregate_root;
        let body = format!("{}{}", POSITIONS_QUERY, LOTTERY_QUERY);
        let query = aggregate_query(root, &body);
        let data: Value = self
            .rpc()
            .query(&query, json!({ "user": user.to_string() }))
            .await?;

        take_root(data, root)
    }

    async fn fetch_position(&self, product: Product, user: &Address) -> Result<StakingPosition> {
        let contract = self.deployment.contract(product);
        let raw = match product {
            Product::Nft => self.get_nft_positions(&contract, user).await?,
            Product::Token => self.get_token_position(&contract, user).await?,
            Product::LockedToken => self.get_locked_positions(&contract, user).await?,
        };
        let position = normalize(&raw, product)?;

        Ok(position.unwrap_or_else(|| StakingPosition::empty(product)))
    }

    async fn fetch_reward(&self, product: Product, user: &Address) -> Result<RewardQuote> {
        let contract = self.deployment.contract(product);
        let amount = self.get_rewards(&contract, user).await?;

        Ok(RewardQuote::new(product, amount))
    }

    async fn fetch_rates(&self) -> Result<ProductRates> {
        let deployment = &self.deployment;
        let (tokens_per_day, token_apr, locked_apr, lock_days) = tokio::try_join!(
            self.get_tokens_per_day(&deployment.nft_staking),
            self.get_apr(&deployment.token_staking),
            self.get_apr(&deployment.locked_staking),
            self.get_lock_days(&deployment.locked_staking),
        )?;

        Ok(ProductRates {
            tokens_per_day,
            token_apr,
            locked_apr,
            lock_days,
        })
    }
}
