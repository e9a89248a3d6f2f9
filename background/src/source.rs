use std::sync::Arc;

use async_trait::async_trait;
use network::{
    dashboard::{DashboardSnapshot, StakingDashboard},
    provider::NetworkProvider,
};
use proto::address::Address;

/// Data a view holds between refreshes.
pub trait Snapshot: Clone + Send + Sync + 'static {
    fn mark_stale(&mut self);
}

impl Snapshot for DashboardSnapshot {
    fn mark_stale(&mut self) {
        DashboardSnapshot::mark_stale(self)
    }
}

#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    type Snapshot: Snapshot;

    async fn load(&self) -> network::Result<Self::Snapshot>;
}

/// Dashboard of one connected user.
pub struct DashboardSource {
    provider: Arc<NetworkProvider>,
    user: Address,
}

impl DashboardSource {
    pub fn new(provider: Arc<NetworkProvider>, user: Address) -> Self {
        Self { provider, user }
    }

    pub fn provider(&self) -> &NetworkProvider {
        &self.provider
    }
}

#[async_trait]
impl SnapshotSource for DashboardSource {
    type Snapshot = DashboardSnapshot;

    async fn load(&self) -> network::Result<DashboardSnapshot> {
        self.provider.fetch_dashboard(&self.user).await
    }
}
