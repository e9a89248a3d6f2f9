use std::{sync::Arc, time::Duration};

use errors::background::BackgroundError;
use network::{dashboard::DashboardSnapshot, provider::NetworkProvider};
use proto::{address::Address, tx::TransactionStatus};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    source::{DashboardSource, Snapshot, SnapshotSource},
    view_state::{FetchTicket, ViewSnapshot, ViewState},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMessage {
    Refresh,
    TransactionResolved(TransactionStatus),
    Unmount,
}

type FetchResult<T> = (FetchTicket, network::Result<T>);

/// Keeps one view fresh: fetches on mount, on every tick of the poll
/// interval and right after a submitted transaction resolves.
///
/// In-flight fetches are never cancelled; results that arrive after
/// [`RefreshController::unmount`] are dropped. Dropping the controller
/// without unmounting aborts the timer loop.
pub struct RefreshController<T> {
    commands: mpsc::UnboundedSender<RefreshMessage>,
    view: watch::Receiver<ViewSnapshot<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Snapshot> RefreshController<T> {
    pub fn mount<S>(source: S, period: Duration) -> Self
    where
        S: SnapshotSource<Snapshot = T>,
    {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (publisher, view) = watch::channel(ViewSnapshot::default());
        let handle = tokio::spawn(run(Arc::new(source), period, commands_rx, publisher));

        info!(target: "refresh", period_ms = period.as_millis() as u64, "view mounted");

        Self {
            commands,
            view,
            handle: Some(handle),
        }
    }

    fn send(&self, message: RefreshMessage) -> Result<()> {
        self.commands
            .send(message)
            .map_err(|_| BackgroundError::Unmounted)
    }

    pub fn refresh(&self) -> Result<()> {
        self.send(RefreshMessage::Refresh)
    }

    /// Signal from the wallet session. `Pending` is ignored.
    pub fn transaction_resolved(&self, status: TransactionStatus) -> Result<()> {
        self.send(RefreshMessage::TransactionResolved(status))
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot<T>> {
        self.view.clone()
    }

    pub fn current(&self) -> ViewSnapshot<T> {
        self.view.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stops the timer and waits for the loop to exit.
    pub async fn unmount(&mut self) -> Result<()> {
        let handle = self.handle.take().ok_or(BackgroundError::Unmounted)?;

        // the loop may already be gone
        self.send(RefreshMessage::Unmount).unwrap_or_default();

        handle
            .await
            .map_err(|e| BackgroundError::WorkerError(e.to_string()))
    }
}

impl RefreshController<DashboardSnapshot> {
    pub fn mount_dashboard(provider: Arc<NetworkProvider>, user: Address) -> Self {
        let period = provider.deployment.poll_interval();

        Self::mount(DashboardSource::new(provider, user), period)
    }
}

impl<T> Drop for RefreshController<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn spawn_fetch<S: SnapshotSource>(
    source: &Arc<S>,
    state: &mut ViewState<S::Snapshot>,
    results: &mpsc::UnboundedSender<FetchResult<S::Snapshot>>,
) {
    let ticket = state.begin_fetch();
    let source = Arc::clone(source);
    let results = results.clone();

    debug!(target: "refresh", ticket = ticket.id(), "fetch started");

    tokio::spawn(async move {
        let result = source.load().await;

        if results.send((ticket, result)).is_err() {
            debug!(target: "refresh", ticket = ticket.id(), "view unmounted, result discarded");
        }
    });
}

async fn run<S: SnapshotSource>(
    source: Arc<S>,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<RefreshMessage>,
    publisher: watch::Sender<ViewSnapshot<S::Snapshot>>,
) {
    let (results_tx, mut results) = mpsc::unbounded_channel::<FetchResult<S::Snapshot>>();
    let mut state = ViewState::new();
    let mut timer = time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            message = commands.recv() => match message {
                Some(RefreshMessage::Refresh) => spawn_fetch(&source, &mut state, &results_tx),
                Some(RefreshMessage::TransactionResolved(status)) => {
                    if !status.is_resolved() {
                        continue;
                    }

                    info!(target: "refresh", ?status, "transaction resolved, view is stale");
                    state.mark_stale();
                    publisher.send_replace(state.view().clone());
                    spawn_fetch(&source, &mut state, &results_tx);
                    timer.reset();
                }
                Some(RefreshMessage::Unmount) | None => break,
            },
            Some((ticket, result)) = results.recv() => {
                if let Err(e) = &result {
                    warn!(target: "refresh", ticket = ticket.id(), error = %e, "fetch failed");
                }
                if !state.apply(ticket, result) {
                    continue;
                }
            }
            _ = timer.tick() => spawn_fetch(&source, &mut state, &results_tx),
        }

        publisher.send_replace(state.view().clone());
    }

    state.unmount();
    publisher.send_replace(state.view().clone());

    info!(target: "refresh", "view unmounted");
}
