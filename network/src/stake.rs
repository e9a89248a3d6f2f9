use intl::BigUint;
use proto::product::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftStake {
    nonce: u64,
    staked_epoch: u64,
    last_claimed_timestamp: u64,
}

impl NftStake {
    pub fn new(nonce: u64, staked_epoch: u64, last_claimed_timestamp: u64) -> Self {
        Self {
            nonce,
            staked_epoch,
            last_claimed_timestamp,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn staked_epoch(&self) -> u64 {
        self.staked_epoch
    }

    pub fn last_claimed_timestamp(&self) -> u64 {
        self.last_claimed_timestamp
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenStake {
    staked_amount: BigUint,
    staked_epoch: u64,
    last_claimed_timestamp: u64,
}

impl TokenStake {
    pub fn new(staked_amount: BigUint, staked_epoch: u64, last_claimed_timestamp: u64) -> Self {
        Self {
            staked_amount,
            staked_epoch,
            last_claimed_timestamp,
        }
    }

    pub fn staked_amount(&self) -> &BigUint {
        &self.staked_amount
    }

    pub fn staked_epoch(&self) -> u64 {
        self.staked_epoch
    }

    pub fn last_claimed_timestamp(&self) -> u64 {
        self.last_claimed_timestamp
    }
}

/// A locked stake. The unlock time is fixed when the lock is created and
/// only goes away together with the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    id: u64,
    staked_amount: BigUint,
    staked_epoch: u64,
    last_claimed_timestamp: u64,
    unlock_timestamp: u64,
}

impl LockEntry {
    pub fn new(
        id: u64,
        staked_amount: BigUint,
        staked_epoch: u64,
        last_claimed_timestamp: u64,
        unlock_timestamp: u64,
    ) -> Self {
        Self {
            id,
            staked_amount,
            staked_epoch,
            last_claimed_timestamp,
            unlock_timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn staked_amount(&self) -> &BigUint {
        &self.staked_amount
    }

    pub fn staked_epoch(&self) -> u64 {
        self.staked_epoch
    }

    pub fn last_claimed_timestamp(&self) -> u64 {
        self.last_claimed_timestamp
    }

    pub fn unlock_timestamp(&self) -> u64 {
        self.unlock_timestamp
    }

    pub fn is_unlocked(&self, now: u64) -> bool {
        now >= self.unlock_timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingPosition {
    Nft(Vec<NftStake>),
    Fungible(TokenStake),
    LockedFungible {
        entries: Vec<LockEntry>,
        total_staked: BigUint,
    },
}

impl StakingPosition {
    /// Fresh "not staked" position for a product.
    pub fn empty(product: Product) -> Self {
        match product {
            Product::Nft => StakingPosition::Nft(Vec::new()),
            Product::Token => StakingPosition::Fungible(TokenStake::default()),
            Product::LockedToken => StakingPosition::LockedFungible {
                entries: Vec::new(),
                total_staked: BigUint::default(),
            },
        }
    }

    pub fn locked(entries: Vec<LockEntry>) -> Self {
        let total_staked = entries.iter().map(|e| e.staked_amount()).sum();

        StakingPosition::LockedFungible {
            entries,
            total_staked,
        }
    }

    pub fn product(&self) -> Product {
        match self {
            StakingPosition::Nft(_) => Product::Nft,
            StakingPosition::Fungible(_) => Product::Token,
            StakingPosition::LockedFungible { .. } => Product::LockedToken,
        }
    }

    pub fn nft_count(&self) -> usize {
        match self {
            StakingPosition::Nft(stakes) => stakes.len(),
            _ => 0,
        }
    }

    /// Staked chain units of the fungible variants; zero for NFTs.
    pub fn staked_amount(&self) -> BigUint {
        match self {
            StakingPosition::Nft(_) => BigUint::default(),
            StakingPosition::Fungible(stake) => stake.staked_amount().clone(),
            StakingPosition::LockedFungible { total_staked, .. } => total_staked.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StakingPosition::Nft(stakes) => stakes.is_empty(),
            StakingPosition::Fungible(stake) => stake.staked_amount() == &BigUint::default(),
            StakingPosition::LockedFungible { entries, .. } => entries.is_empty(),
        }
    }

    pub fn has_nft(&self, nonce: u64) -> bool {
        match self {
            StakingPosition::Nft(stakes) => stakes.iter().any(|s| s.nonce() == nonce),
            _ => false,
        }
    }

    pub fn find_lock(&self, id: u64) -> Option<&LockEntry> {
        match self {
            StakingPosition::LockedFungible { entries, .. } => {
                entries.iter().find(|e| e.id() == id)
            }
            _ => None,
        }
    }
}

/// Pending reward of one product as of the read that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardQuote {
    product: Product,
    amount: BigUint,
    stale: bool,
}

impl RewardQuote {
    pub fn new(product: Product, amount: BigUint) -> Self {
        Self {
            product,
            amount,
            stale: false,
        }
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn amount(&self) -> &BigUint {
        &self.amount
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }
}
