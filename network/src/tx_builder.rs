use config::{
    contracts::endpoints::{
        BUY_TICKETS, CLAIM_REWARDS, DEPOSIT_REWARDS, DRAW_WINNER, SET_TOKENS_PER_DAY, STAKE,
        STAKE_MULTIPLE, START_LOTTERY, UNSTAKE, UNSTAKE_MULTIPLE,
    },
    CREATE_LOTTERY_FEE, NATIVE_DECIMALS,
};
use errors::{intl::IntlErrors, tx::TransactionErrors};
use intl::{
    wei::{to_chain_amount, whole_tokens},
    BigUint,
};
use proto::{
    address::Address,
    payload::{esdt_transfer, multi_esdt_nft_transfer, CallData, TokenTransfer},
    product::Product,
    tx::{StakingAction, TransactionMetadata, TransactionRequest},
};
use token::ft::Token;

use crate::{
    deployment::GasFormula,
    lottery::{LotteryPhase, LotteryState},
    provider::NetworkProvider,
    stake::{RewardQuote, StakingPosition},
};

pub type Result<T> = std::result::Result<T, TransactionErrors>;

/// Chain units of a human amount rounded down to the token precision, and
/// whether non-zero digits were cut off.
fn floor_units(amount: &str, decimals: u8) -> Result<(BigUint, bool)> {
    let trimmed = amount.trim();
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntlErrors::InvalidAmount(trimmed.to_string()).into());
    }

    let keep = frac_part.len().min(decimals as usize);
    let dropped = frac_part[keep..].bytes().any(|b| b != b'0');
    let head = format!("{}.{}", int_part, &frac_part[..keep]);
    let head = head.trim_end_matches('.');
    let units = to_chain_amount(head, decimals)
        .map_err(|_| IntlErrors::InvalidAmount(trimmed.to_string()))?;

    Ok((units, dropped))
}

/// Positive chain amount not above `available`. The bound is checked against
/// the exact value before the representability of the amount.
fn bounded_amount(
    amount: &str,
    token: &Token,
    available: &BigUint,
    exceeded: fn(String, String) -> TransactionErrors,
) -> Result<BigUint> {
    let (units, dropped) = floor_units(amount, token.decimals)?;

    if units > *available || (dropped && units == *available) {
        return Err(exceeded(amount.trim().to_string(), token.to_display(available)));
    }

    positive_amount(amount, units, dropped)
}

fn positive_amount(amount: &str, units: BigUint, dropped: bool) -> Result<BigUint> {
    if dropped || units == BigUint::default() {
        return Err(IntlErrors::InvalidAmount(amount.trim().to_string()).into());
    }

    Ok(units)
}

fn insufficient_funds(requested: String, available: String) -> TransactionErrors {
    TransactionErrors::InsufficientFunds {
        requested,
        available,
    }
}

fn insufficient_stake(requested: String, available: String) -> TransactionErrors {
    TransactionErrors::InsufficientStake {
        requested,
        available,
    }
}

fn dedup_nonces(nonces: &[u64]) -> Vec<u64> {
    let mut unique = Vec::with_capacity(nonces.len());

    for nonce in nonces {
        if !unique.contains(nonce) {
            unique.push(*nonce);
        }
    }

    unique
}

fn claim_metadata() -> TransactionMetadata {
    TransactionMetadata::new(
        "Claiming rewards...",
        "An error has occurred during claiming",
        "Rewards claimed successfully!",
    )
}

pub trait StakingTxBuilder {
    fn build_stake_nfts(
        &self,
        sender: &Address,
        nonces: &[u64],
        wallet_nonces: &[u64],
    ) -> Result<TransactionRequest>;
    fn build_unstake_nfts(
        &self,
        nonces: &[u64],
        position: &StakingPosition,
    ) -> Result<TransactionRequest>;
    fn build_stake_tokens(
        &self,
        product: Product,
        amount: &str,
        balance: &BigUint,
    ) -> Result<TransactionRequest>;
    fn build_unstake_tokens(
        &self,
        amount: &str,
        position: &StakingPosition,
    ) -> Result<TransactionRequest>;
    fn build_unstake_locked(
        &self,
        id: u64,
        position: &StakingPosition,
        now: u64,
    ) -> Result<TransactionRequest>;
    fn build_claim_rewards(&self, position: &StakingPosition) -> Result<TransactionRequest>;
    fn build_claim_all(
        &self,
        quotes: &[RewardQuote],
        nft_position: &StakingPosition,
    ) -> Result<Vec<TransactionRequest>>;
    fn build_buy_tickets(
        &self,
        lottery: &LotteryState,
        count: &str,
        balance: &BigUint,
        now: u64,
    ) -> Result<TransactionRequest>;
    fn build_create_lottery(
        &self,
        current: Option<&LotteryState>,
        deadline: u64,
        now: u64,
    ) -> Result<TransactionRequest>;
    fn build_draw_winner(&self, lottery: &LotteryState, now: u64) -> Result<TransactionRequest>;
    fn build_deposit_rewards(
        &self,
        product: Product,
        amount: &str,
        balance: &BigUint,
    ) -> Result<TransactionRequest>;
    fn build_set_tokens_per_day(&self, amount: &str) -> Result<TransactionRequest>;
}

impl NetworkProvider {
    fn request(
        &self,
        action: StakingAction,
        receiver: Address,
        data: String,
        gas: (GasFormula, usize),
        metadata: TransactionMetadata,
    ) -> TransactionRequest {
        TransactionRequest {
            action,
            receiver,
            value: BigUint::default(),
            data,
            gas_limit: self.deployment.gas.limit(gas.0, gas.1),
            metadata,
        }
    }

    fn lottery_contract(&self, lottery: Option<&LotteryState>) -> Result<Address> {
        lottery
            .and_then(|l| l.address)
            .or(self.deployment.lottery)
            .ok_or_else(|| TransactionErrors::UnknownContract("lottery".to_string()))
    }

    fn claim_request(&self, product: Product, nft_count: usize) -> TransactionRequest {
        let gas = &self.deployment.gas;
        let formula = match product {
            Product::Nft => (gas.nft_claim, nft_count),
            Product::Token | Product::LockedToken => (gas.token_claim, 0),
        };

        self.request(
            StakingAction::ClaimRewards { product },
            self.deployment.contract(product),
            CallData::new(CLAIM_REWARDS).build(),
            formula,
            claim_metadata(),
        )
    }
}

impl StakingTxBuilder for NetworkProvider {
    fn build_stake_nfts(
        &self,
        sender: &Address,
        nonces: &[u64],
        wallet_nonces: &[u64],
    ) -> Result<TransactionRequest> {
        let nonces = dedup_nonces(nonces);

        if nonces.is_empty() {
            return Err(TransactionErrors::EmptySelection);
        }

        let collection = &self.deployment.collection;
        let mut transfers = Vec::with_capacity(nonces.len());

        for nonce in &nonces {
            if !wallet_nonces.contains(nonce) {
                return Err(insufficient_funds(
                    proto::payload::nft_identifier(collection, *nonce),
                    "0".to_string(),
                ));
            }

            transfers.push(TokenTransfer::non_fungible(collection, *nonce));
        }

        let data = multi_esdt_nft_transfer(
            &self.deployment.nft_staking,
            &transfers,
            &CallData::new(STAKE_MULTIPLE),
        );
        let items = nonces.len();

        // multi transfers are sent to the sender itself
        Ok(self.request(
            StakingAction::StakeNfts { nonces },
            *sender,
            data,
            (self.deployment.gas.nft_stake, items),
            TransactionMetadata::new(
                "Staking NFTs...",
                "An error has occurred during staking",
                "NFTs staked successfully!",
            ),
        ))
    }

    fn build_unstake_nfts(
        &self,
        nonces: &[u64],
        position: &StakingPosition,
    ) -> Result<TransactionRequest> {
        let nonces = dedup_nonces(nonces);

        if nonces.is_empty() {
            return Err(TransactionErrors::EmptySelection);
        }
        if position.product() != Product::Nft {
            return Err(TransactionErrors::ProductMismatch(position.product().to_string()));
        }
        if let Some(nonce) = nonces.iter().find(|n| !position.has_nft(**n)) {
            return Err(TransactionErrors::NotStaked(*nonce));
        }

        let data = nonces
            .iter()
            .fold(CallData::new(UNSTAKE_MULTIPLE), |call, nonce| call.arg_u64(*nonce))
            .build();
        let items = nonces.len();

        Ok(self.request(
            StakingAction::UnstakeNfts { nonces },
            self.deployment.nft_staking,
            data,
            (self.deployment.gas.nft_unstake, items),
            TransactionMetadata::new(
                "Unstaking NFTs...",
                "An error has occurred during unstaking",
                "NFTs unstaked successfully!",
            ),
        ))
    }

    fn build_stake_tokens(
        &self,
        product: Product,
        amount: &str,
        balance: &BigUint,
    ) -> Result<TransactionRequest> {
        if product == Product::Nft {
            return Err(TransactionErrors::ProductMismatch(product.to_string()));
        }

        let token = &self.deployment.staking_token;
        let amount = bounded_amount(amount, token, balance, insufficient_funds)?;
        let data = esdt_transfer(&token.identifier, &amount, &CallData::new(STAKE));

        Ok(self.request(
            StakingAction::StakeTokens { product, amount },
            self.deployment.contract(product),
            data,
            (self.deployment.gas.token_stake, 0),
            TransactionMetadata::new(
                "Staking tokens...",
                "An error has occurred during staking",
                "Tokens staked successfully!",
            ),
        ))
    }

    fn build_unstake_tokens(
        &self,
        amount: &str,
        position: &StakingPosition,
    ) -> Result<TransactionRequest> {
        let StakingPosition::Fungible(stake) = position else {
            return Err(TransactionErrors::ProductMismatch(position.product().to_string()));
        };

        let token = &self.deployment.staking_token;
        let amount = bounded_amount(amount, token, stake.staked_amount(), insufficient_stake)?;
        let data = CallData::new(UNSTAKE).arg_biguint(&amount).build();

        Ok(self.request(
            StakingAction::UnstakeTokens { amount },
            self.deployment.token_staking,
            data,
            (self.deployment.gas.token_unstake, 0),
            TransactionMetadata::new(
                "Unstaking tokens...",
                "An error has occurred during unstaking",
                "Tokens unstaked successfully!",
            ),
        ))
    }

    fn build_unstake_locked(
        &self,
        id: u64,
        position: &StakingPosition,
        now: u64,
    ) -> Result<TransactionRequest> {
        if position.product() != Product::LockedToken {
            return Err(TransactionErrors::ProductMismatch(position.product().to_string()));
        }

        let lock = position
            .find_lock(id)
            .ok_or(TransactionErrors::LockNotFound(id))?;

        if !lock.is_unlocked(now) {
            return Err(TransactionErrors::StillLocked {
                id,
                unlock_timestamp: lock.unlock_timestamp(),
            });
        }

        Ok(self.request(
            StakingAction::UnstakeLocked { id },
            self.deployment.locked_staking,
            CallData::new(UNSTAKE).arg_u64(id).build(),
            (self.deployment.gas.locked_unstake, 0),
            TransactionMetadata::new(
                "Unstaking tokens...",
                "An error has occurred during unstaking",
                "Tokens unstaked successfully!",
            ),
        ))
    }

    fn build_claim_rewards(&self, position: &StakingPosition) -> Result<TransactionRequest> {
        Ok(self.claim_request(position.product(), position.nft_count()))
    }

    fn build_claim_all(
        &self,
        quotes: &[RewardQuote],
        nft_position: &StakingPosition,
    ) -> Result<Vec<TransactionRequest>> {
        let threshold = self.deployment.claim_threshold();
        let amounts: Vec<BigUint> = quotes.iter().map(|q| q.amount().clone()).collect();

        if !self.deployment.claim_policy.is_met(&amounts, &threshold) {
            return Err(TransactionErrors::NothingToClaim);
        }

        let nft_count = nft_position.nft_count();
        let requests: Vec<TransactionRequest> = self
            .deployment
            .claim_policy
            .claimable(quotes, &threshold)
            .into_iter()
            // the nft contract rejects claims without staked nfts
            .filter(|product| *product != Product::Nft || nft_count > 0)
            .map(|product| self.claim_request(product, nft_count))
            .collect();

        if requests.is_empty() {
            return Err(TransactionErrors::NothingToClaim);
        }

        Ok(requests)
    }

    fn build_buy_tickets(
        &self,
        lottery: &LotteryState,
        count: &str,
        balance: &BigUint,
        now: u64,
    ) -> Result<TransactionRequest> {
        let count = match count.trim().parse::<u64>() {
            Ok(count) if count > 0 => count,
            _ => return Err(TransactionErrors::InvalidTicketCount(count.trim().to_string())),
        };

        if lottery.phase(now) != LotteryPhase::Live {
            return Err(TransactionErrors::LotteryClosed);
        }

        let receiver = self.lottery_contract(Some(lottery))?;
        let ticket_token = lottery
            .ticket_token
            .as_deref()
            .unwrap_or(&self.deployment.reward_token.identifier);
        let cost = lottery.tickets_cost(count);

        if cost > *balance {
            // unknown tokens are reported in chain units
            let display = |amount: &BigUint| match self.deployment.token(ticket_token) {
                Some(token) => token.to_display(amount),
                None => amount.to_string(),
            };

            return Err(insufficient_funds(display(&cost), display(balance)));
        }

        let data = esdt_transfer(ticket_token, &cost, &CallData::new(BUY_TICKETS).arg_u64(count));

        Ok(self.request(
            StakingAction::BuyTickets { count, cost },
            receiver,
            data,
            (self.deployment.gas.buy_tickets, 0),
            TransactionMetadata::new(
                "Buying tickets...",
                "An error has occurred during buy",
                "Tickets bought successfully",
            ),
        ))
    }

    fn build_create_lottery(
        &self,
        current: Option<&LotteryState>,
        deadline: u64,
        now: u64,
    ) -> Result<TransactionRequest> {
        if current.is_some_and(|l| l.phase(now) != LotteryPhase::Finished) {
            return Err(TransactionErrors::LotteryInProgress);
        }
        if deadline <= now {
            return Err(TransactionErrors::InvalidDeadline);
        }

        let mut tx = self.request(
            StakingAction::CreateLottery { deadline },
            self.lottery_contract(current)?,
            CallData::new(START_LOTTERY).arg_u64(deadline).build(),
            (self.deployment.gas.create_lottery, 0),
            TransactionMetadata::new(
                "Creating lottery...",
                "An error has occurred during lottery creation",
                "Lottery created successfully",
            ),
        );
        tx.value = whole_tokens(CREATE_LOTTERY_FEE, NATIVE_DECIMALS);

        Ok(tx)
    }

    fn build_draw_winner(&self, lottery: &LotteryState, now: u64) -> Result<TransactionRequest> {
        if lottery.phase(now) != LotteryPhase::AwaitingDraw {
            return Err(TransactionErrors::LotteryNotDrawable);
        }

        Ok(self.request(
            StakingAction::DrawWinner,
            self.lottery_contract(Some(lottery))?,
            CallData::new(DRAW_WINNER).build(),
            (self.deployment.gas.draw_winner, 0),
            TransactionMetadata::new(
                "Drawing winner...",
                "An error has occurred during draw",
                "Winner drawn successfully",
            ),
        ))
    }

    fn build_deposit_rewards(
        &self,
        product: Product,
        amount: &str,
        balance: &BigUint,
    ) -> Result<TransactionRequest> {
        let token = &self.deployment.reward_token;
        let amount = bounded_amount(amount, token, balance, insufficient_funds)?;
        let data = esdt_transfer(&token.identifier, &amount, &CallData::new(DEPOSIT_REWARDS));

        Ok(self.request(
            StakingAction::DepositRewards { amount },
            self.deployment.contract(product),
            data,
            (self.deployment.gas.deposit_rewards, 0),
            TransactionMetadata::new(
                "Depositing rewards...",
                "An error has occurred during deposit",
                "Rewards deposited successfully",
            ),
        ))
    }

    fn build_set_tokens_per_day(&self, amount: &str) -> Result<TransactionRequest> {
        let (units, dropped) = floor_units(amount, self.deployment.reward_token.decimals)?;
        let amount = positive_amount(amount, units, dropped)?;

        Ok(self.request(
            StakingAction::SetTokensPerDay {
                amount: amount.clone(),
            },
            self.deployment.nft_staking,
            CallData::new(SET_TOKENS_PER_DAY).arg_biguint(&amount).build(),
            (self.deployment.gas.set_tokens_per_day, 0),
            TransactionMetadata::new(
                "Updating rewards rate...",
                "An error has occurred during update",
                "Rewards rate updated successfully",
            ),
        ))
    }
}

#[cfg(test)]
mod tests_tx_builder {
    use super::*;
    use crate::{
        deployment::ClaimMode,
        stake::{LockEntry, NftStake, TokenStake},
    };
    use config::contracts::NFT_STAKING_CONTRACT;
    use proto::payload::nft_identifier;

    const ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";

    fn alice() -> Address {
        Address::from_bech32(ALICE).unwrap()
    }

    fn staked(amount: &str) -> StakingPosition {
        let units = Token::staking().to_chain(amount).unwrap();
        StakingPosition::Fungible(TokenStake::new(units, 0, 0))
    }

    fn lottery(deadline: u64, winner_ticket: u64) -> LotteryState {
        LotteryState {
            address: Some(Address::from_bech32(NFT_STAKING_CONTRACT).unwrap()),
            ticket_price: BigUint::from(5_000_000_000_000u64),
            deadline,
            winner_ticket,
            last_ticket_id: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_stake_nfts() {
        let provider = NetworkProvider::default();
        let tx = provider
            .build_stake_nfts(&alice(), &[1, 10, 1], &[1, 10, 11])
            .unwrap();

        assert_eq!(tx.receiver, alice());
        assert_eq!(tx.value, BigUint::default());
        assert_eq!(tx.gas_limit, 3_500_000 + 3_500_000 * 2);
        assert_eq!(tx.action, StakingAction::StakeNfts { nonces: vec![1, 10] });
        assert!(tx.data.starts_with(&format!(
            "MultiESDTNFTTransfer@{}@02@",
            provider.deployment.nft_staking.to_hex()
        )));
        assert!(tx.data.ends_with("@7374616b655f6d756c7469706c65"));

        assert_eq!(
            provider.build_stake_nfts(&alice(), &[], &[1]),
            Err(TransactionErrors::EmptySelection)
        );
        assert_eq!(
            provider.build_stake_nfts(&alice(), &[2], &[1]),
            Err(TransactionErrors::InsufficientFunds {
                requested: nft_identifier("GIANT-1ed993", 2),
                available: "0".to_string()
            })
        );
    }

    #[test]
    fn test_unstake_nfts() {
        let provider = NetworkProvider::default();
        let position = StakingPosition::Nft(vec![NftStake::new(4, 0, 0), NftStake::new(300, 0, 0)]);
        let tx = provider.build_unstake_nfts(&[4, 300], &position).unwrap();

        assert_eq!(tx.data, "unstake_multiple@04@012c");
        assert_eq!(tx.receiver, provider.deployment.nft_staking);
        assert_eq!(tx.gas_limit, 30_000_000);

        assert_eq!(
            provider.build_unstake_nfts(&[5], &position),
            Err(TransactionErrors::NotStaked(5))
        );
        assert!(matches!(
            provider.build_unstake_nfts(&[4], &staked("1")),
            Err(TransactionErrors::ProductMismatch(_))
        ));
    }

    #[test]
    fn test_stake_tokens() {
        let provider = NetworkProvider::default();
        let balance = Token::staking().to_chain("100").unwrap();
        let tx = provider
            .build_stake_tokens(Product::Token, "1.5", &balance)
            .unwrap();

        assert_eq!(tx.receiver, provider.deployment.token_staking);
        assert_eq!(tx.gas_limit, 10_000_000);
        // 1.5e18 = 0x14d1120d7b160000
        assert_eq!(
            tx.data,
            "ESDTTransfer@5843554d422d646130653335@14d1120d7b160000@7374616b65"
        );

        let locked = provider
            .build_stake_tokens(Product::LockedToken, "100", &balance)
            .unwrap();
        assert_eq!(locked.receiver, provider.deployment.locked_staking);
    }

    #[test]
    fn test_stake_tokens_validation() {
        let provider = NetworkProvider::default();
        let balance = Token::staking().to_chain("100").unwrap();

        for amount in ["", "0", "0.000", "abc", "-1", "1e3"] {
            assert!(
                matches!(
                    provider.build_stake_tokens(Product::Token, amount, &balance),
                    Err(TransactionErrors::InvalidAmount(_))
                ),
                "{amount}"
            );
        }

        assert_eq!(
            provider.build_stake_tokens(Product::Token, "100.0001", &balance),
            Err(TransactionErrors::InsufficientFunds {
                requested: "100.0001".to_string(),
                available: "100".to_string()
            })
        );
        assert!(matches!(
            provider.build_stake_tokens(Product::Nft, "1", &balance),
            Err(TransactionErrors::ProductMismatch(_))
        ));
    }

    #[test]
    fn test_unstake_bound_ignores_formatting() {
        let provider = NetworkProvider::default();
        let position = staked("1000");

        for amount in [
            "1000.5",
            "0001000.1",
            "1001",
            "1000.0000000000000000001",
            " 2000.000 ",
        ] {
            assert!(
                matches!(
                    provider.build_unstake_tokens(amount, &position),
                    Err(TransactionErrors::InsufficientStake { .. })
                ),
                "{amount}"
            );
        }

        let tx = provider.build_unstake_tokens("0001000.000", &position).unwrap();
        assert_eq!(tx.gas_limit, 25_000_000);
        assert_eq!(tx.receiver, provider.deployment.token_staking);
        assert_eq!(tx.data, "unstake@3635c9adc5dea00000");
    }

    #[test]
    fn test_unstake_locked() {
        let provider = NetworkProvider::default();
        let position = StakingPosition::locked(vec![
            LockEntry::new(7, BigUint::from(1u8), 0, 0, 1_000),
            LockEntry::new(8, BigUint::from(1u8), 0, 0, 5_000),
        ]);
        let tx = provider.build_unstake_locked(7, &position, 1_000).unwrap();

        assert_eq!(tx.data, "unstake@07");
        assert_eq!(tx.gas_limit, 10_000_000);
        assert_eq!(tx.receiver, provider.deployment.locked_staking);

        assert_eq!(
            provider.build_unstake_locked(8, &position, 1_000),
            Err(TransactionErrors::StillLocked {
                id: 8,
                unlock_timestamp: 5_000
            })
        );
        assert_eq!(
            provider.build_unstake_locked(9, &position, 9_000),
            Err(TransactionErrors::LockNotFound(9))
        );
    }

    #[test]
    fn test_claim_rewards_gas() {
        let provider = NetworkProvider::default();
        let few = StakingPosition::Nft(vec![NftStake::new(1, 0, 0)]);
        let many = StakingPosition::Nft((1..=100).map(|n| NftStake::new(n, 0, 0)).collect());

        let tx = provider.build_claim_rewards(&few).unwrap();
        assert_eq!(tx.data, "claim_rewards");
        assert_eq!(tx.gas_limit, 17_000_000);
        assert_eq!(
            provider.build_claim_rewards(&many).unwrap().gas_limit,
            600_000_000
        );
        assert_eq!(
            provider.build_claim_rewards(&staked("1")).unwrap().gas_limit,
            20_000_000
        );
    }

    #[test]
    fn test_claim_all() {
        let provider = NetworkProvider::default();
        let threshold = provider.deployment.claim_threshold();
        let nfts = StakingPosition::Nft(vec![NftStake::new(1, 0, 0)]);

        let quotes = [
            RewardQuote::new(Product::Nft, &threshold + 1u8),
            RewardQuote::new(Product::Token, threshold.clone()),
            RewardQuote::new(Product::LockedToken, &threshold * 2u8),
        ];
        let txs = provider.build_claim_all(&quotes, &nfts).unwrap();
        let receivers: Vec<Address> = txs.iter().map(|t| t.receiver).collect();
        assert_eq!(
            receivers,
            vec![provider.deployment.nft_staking, provider.deployment.locked_staking]
        );

        let exact = [RewardQuote::new(Product::Token, threshold.clone())];
        assert_eq!(
            provider.build_claim_all(&exact, &nfts),
            Err(TransactionErrors::NothingToClaim)
        );
    }

    /// Two products just over half the minimum each, nothing on nfts.
    fn split_quotes(threshold: &BigUint) -> [RewardQuote; 3] {
        let half = threshold / 2u8 + 1u8;

        [
            RewardQuote::new(Product::Nft, BigUint::default()),
            RewardQuote::new(Product::Token, half.clone()),
            RewardQuote::new(Product::LockedToken, half),
        ]
    }

    #[test]
    fn test_claim_all_total_only() {
        let mut provider = NetworkProvider::default();
        provider.deployment.claim_policy.mode = ClaimMode::TotalOnly;
        let threshold = provider.deployment.claim_threshold();
        let nfts = StakingPosition::Nft(vec![NftStake::new(1, 0, 0)]);

        let txs = provider
            .build_claim_all(&split_quotes(&threshold), &nfts)
            .unwrap();
        let products: Vec<StakingAction> = txs.into_iter().map(|t| t.action).collect();
        assert_eq!(
            products,
            vec![
                StakingAction::ClaimRewards { product: Product::Token },
                StakingAction::ClaimRewards { product: Product::LockedToken },
            ]
        );
    }

    #[test]
    fn test_claim_all_per_product_modes() {
        let threshold = NetworkProvider::default().deployment.claim_threshold();
        let nfts = StakingPosition::Nft(vec![NftStake::new(1, 0, 0)]);

        for mode in [ClaimMode::TotalAndAnyProduct, ClaimMode::AnyProduct] {
            let mut provider = NetworkProvider::default();
            provider.deployment.claim_policy.mode = mode;

            assert_eq!(
                provider.build_claim_all(&split_quotes(&threshold), &nfts),
                Err(TransactionErrors::NothingToClaim)
            );

            let mut quotes = split_quotes(&threshold);
            quotes[2] = RewardQuote::new(Product::LockedToken, &threshold + 1u8);
            let txs = provider.build_claim_all(&quotes, &nfts).unwrap();
            assert_eq!(txs.len(), 1);
            assert_eq!(txs[0].receiver, provider.deployment.locked_staking);
        }
    }

    #[test]
    fn test_claim_all_skips_nft_without_stake() {
        let provider = NetworkProvider::default();
        let threshold = provider.deployment.claim_threshold();
        let none = StakingPosition::Nft(Vec::new());

        let quotes = [
            RewardQuote::new(Product::Nft, &threshold * 3u8),
            RewardQuote::new(Product::LockedToken, &threshold * 2u8),
        ];
        let txs = provider.build_claim_all(&quotes, &none).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].receiver, provider.deployment.locked_staking);

        let only_nft = [RewardQuote::new(Product::Nft, &threshold * 3u8)];
        assert_eq!(
            provider.build_claim_all(&only_nft, &none),
            Err(TransactionErrors::NothingToClaim)
        );
    }

    #[test]
    fn test_buy_tickets() {
        let provider = NetworkProvider::default();
        let balance = BigUint::from(20_000_000_000_000u64);
        let tx = provider
            .build_buy_tickets(&lottery(2_000, 0), "3", &balance, 1_000)
            .unwrap();

        assert_eq!(tx.gas_limit, 50_000_000);
        assert_eq!(tx.receiver, Address::from_bech32(NFT_STAKING_CONTRACT).unwrap());
        // 15e12 = 0x0da475abf000, reward token as ticket token
        assert_eq!(
            tx.data,
            "ESDTTransfer@44454652412d333936316531@0da475abf000@6275795f7469636b657473@03"
        );

        for count in ["0", "-1", "1.5", "", "x"] {
            assert!(matches!(
                provider.build_buy_tickets(&lottery(2_000, 0), count, &balance, 1_000),
                Err(TransactionErrors::InvalidTicketCount(_))
            ));
        }
        assert!(matches!(
            provider.build_buy_tickets(&lottery(2_000, 0), "5", &balance, 1_000),
            Err(TransactionErrors::InsufficientFunds { .. })
        ));
        assert_eq!(
            provider.build_buy_tickets(&lottery(2_000, 0), "1", &balance, 2_000),
            Err(TransactionErrors::LotteryClosed)
        );
    }

    #[test]
    fn test_buy_tickets_funds_in_ticket_token() {
        let provider = NetworkProvider::default();
        let balance = BigUint::from(20_000_000_000_000u64);
        let cost = BigUint::from(25_000_000_000_000u64);

        let mut staking_priced = lottery(2_000, 0);
        staking_priced.ticket_token = Some("XCUMB-da0e35".to_string());
        let staking = Token::staking();
        assert_eq!(
            provider.build_buy_tickets(&staking_priced, "5", &balance, 1_000),
            Err(TransactionErrors::InsufficientFunds {
                requested: staking.to_display(&cost),
                available: staking.to_display(&balance),
            })
        );
        assert_ne!(staking.to_display(&cost), Token::reward().to_display(&cost));

        let mut foreign = lottery(2_000, 0);
        foreign.ticket_token = Some("WEGLD-bd4d79".to_string());
        assert_eq!(
            provider.build_buy_tickets(&foreign, "5", &balance, 1_000),
            Err(TransactionErrors::InsufficientFunds {
                requested: "25000000000000".to_string(),
                available: "20000000000000".to_string(),
            })
        );
    }

    #[test]
    fn test_lottery_admin() {
        let mut provider = NetworkProvider::default();
        assert_eq!(
            provider.build_create_lottery(None, 2_000, 1_000),
            Err(TransactionErrors::UnknownContract("lottery".to_string()))
        );

        let contract = Address::from_bech32(NFT_STAKING_CONTRACT).unwrap();
        provider.deployment.lottery = Some(contract);

        let tx = provider.build_create_lottery(None, 0x0100, 1).unwrap();
        assert_eq!(tx.data, "start_lottery@0100");
        assert_eq!(tx.value, BigUint::from(10u8).pow(18));
        assert_eq!(tx.gas_limit, 20_000_000);
        assert_eq!(
            provider.build_create_lottery(None, 1_000, 1_000),
            Err(TransactionErrors::InvalidDeadline)
        );

        let tx = provider.build_draw_winner(&lottery(1_000, 0), 1_000).unwrap();
        assert_eq!(tx.data, "draw_winner");
        assert_eq!(tx.gas_limit, 15_000_000);
        assert_eq!(
            provider.build_draw_winner(&lottery(2_000, 0), 1_000),
            Err(TransactionErrors::LotteryNotDrawable)
        );
        assert_eq!(
            provider.build_draw_winner(&lottery(1_000, 4), 5_000),
            Err(TransactionErrors::LotteryNotDrawable)
        );
    }

    #[test]
    fn test_create_lottery_only_after_draw() {
        let provider = NetworkProvider::default();
        let now = 10_000;

        // live: deadline ahead, the new deadline would pass the deadline check
        assert_eq!(
            provider.build_create_lottery(Some(&lottery(now + 3_600, 0)), now + 7_200, now),
            Err(TransactionErrors::LotteryInProgress)
        );
        // deadline passed, winner not drawn yet
        assert_eq!(
            provider.build_create_lottery(Some(&lottery(now - 1, 0)), now + 7_200, now),
            Err(TransactionErrors::LotteryInProgress)
        );

        // finished: the contract comes from the last lottery
        let finished = lottery(now - 1, 3);
        let tx = provider
            .build_create_lottery(Some(&finished), now + 7_200, now)
            .unwrap();
        assert_eq!(tx.receiver, finished.address.unwrap());
        assert_eq!(tx.action, StakingAction::CreateLottery { deadline: now + 7_200 });
    }

    #[test]
    fn test_deposit_and_rate() {
        let provider = NetworkProvider::default();
        let balance = BigUint::from(10u8).pow(15);
        let tx = provider
            .build_deposit_rewards(Product::Token, "1", &balance)
            .unwrap();

        assert_eq!(tx.receiver, provider.deployment.token_staking);
        assert_eq!(
            tx.data,
            "ESDTTransfer@44454652412d333936316531@e8d4a51000@6465706f7369745f72657761726473"
        );
        assert_eq!(tx.gas_limit, 10_000_000);

        let tx = provider.build_set_tokens_per_day("2").unwrap();
        assert_eq!(tx.data, "set_tokens_per_day@01d1a94a2000");
        assert_eq!(tx.receiver, provider.deployment.nft_staking);
        assert!(matches!(
            provider.build_set_tokens_per_day("0"),
            Err(TransactionErrors::InvalidAmount(_))
        ));
    }
}
