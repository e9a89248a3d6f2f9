//! Transient state of one mounted view.
//!
//! Every fetch gets a [`FetchTicket`] when it starts. A result is applied only
//! when its ticket is newer than the one already shown and newer than the
//! last stale mark, so a slow fetch started before a transaction resolved can
//! never overwrite data read after it. The last intent wins, not the last
//! completion.

use errors::network::NetworkErrors;
use tracing::debug;

use crate::source::Snapshot;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    #[default]
    Idle,
    Fetching,
    Settled,
    /// A transaction resolved after the data shown was read.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What subscribers of a view observe.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<T> {
    pub state: RefreshState,
    pub data: Option<T>,
    /// Error of the newest applied fetch; `data` keeps the last good read.
    pub error: Option<NetworkErrors>,
}

impl<T> Default for ViewSnapshot<T> {
    fn default() -> Self {
        Self {
            state: RefreshState::Idle,
            data: None,
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct ViewState<T> {
    view: ViewSnapshot<T>,
    issued: u64,
    applied: u64,
    stale_mark: u64,
    mounted: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            view: ViewSnapshot::default(),
            issued: 0,
            applied: 0,
            stale_mark: 0,
            mounted: true,
        }
    }
}

impl<T: Snapshot> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RefreshState {
        self.view.state
    }

    pub fn view(&self) -> &ViewSnapshot<T> {
        &self.view
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.view.state = RefreshState::Fetching;

        FetchTicket(self.issued)
    }

    /// Returns `false` when the result was discarded.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<T, NetworkErrors>) -> bool {
        if !self.mounted {
            debug!(target: "refresh", ticket = ticket.0, "view unmounted, result discarded");
            return false;
        }
        if ticket.0 <= self.applied {
            debug!(
                target: "refresh",
                ticket = ticket.0,
                applied = self.applied,
                "newer fetch already applied, result discarded"
            );
            return false;
        }
        if ticket.0 <= self.stale_mark {
            debug!(
                target: "refresh",
                ticket = ticket.0,
                stale_mark = self.stale_mark,
                "fetch started before the last transaction resolved, result discarded"
            );
            return false;
        }

        self.applied = ticket.0;
        match result {
            Ok(data) => {
                self.view.data = Some(data);
                self.view.error = None;
            }
            Err(e) => self.view.error = Some(e),
        }
        self.view.state = if self.applied == self.issued {
            RefreshState::Settled
        } else {
            RefreshState::Fetching
        };

        true
    }

    /// Outdates every fetch issued so far and the data on display.
    pub fn mark_stale(&mut self) {
        self.stale_mark = self.issued;
        self.view.state = RefreshState::Stale;

        if let Some(data) = self.view.data.as_mut() {
            data.mark_stale();
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.view.state = RefreshState::Idle;
    }
}

#[cfg(test)]
mod tests_view_state {
    use super::*;
    use errors::rpc::RpcError;

    #[derive(Debug, Clone, PartialEq)]
    struct Reading {
        value: u64,
        stale: bool,
    }

    impl Snapshot for Reading {
        fn mark_stale(&mut self) {
            self.stale = true;
        }
    }

    fn reading(value: u64) -> Result<Reading, NetworkErrors> {
        Ok(Reading {
            value,
            stale: false,
        })
    }

    fn value(state: &ViewState<Reading>) -> Option<u64> {
        state.view().data.as_ref().map(|r| r.value)
    }

    #[test]
    fn test_lifecycle() {
        let mut state = ViewState::new();
        assert_eq!(state.state(), RefreshState::Idle);

        let ticket = state.begin_fetch();
        assert_eq!(state.state(), RefreshState::Fetching);

        assert!(state.apply(ticket, reading(1)));
        assert_eq!(state.state(), RefreshState::Settled);
        assert_eq!(value(&state), Some(1));

        state.mark_stale();
        assert_eq!(state.state(), RefreshState::Stale);
        assert!(state.view().data.as_ref().unwrap().stale);

        let ticket = state.begin_fetch();
        assert_eq!(state.state(), RefreshState::Fetching);
        assert!(state.apply(ticket, reading(2)));
        assert_eq!(state.state(), RefreshState::Settled);
        assert!(!state.view().data.as_ref().unwrap().stale);
    }

    #[test]
    fn test_pre_resolution_fetch_never_overwrites() {
        let mut state = ViewState::new();

        let before = state.begin_fetch();
        state.mark_stale();
        let after = state.begin_fetch();

        assert!(state.apply(after, reading(2)));
        assert!(!state.apply(before, reading(1)));
        assert_eq!(value(&state), Some(2));
        assert_eq!(state.state(), RefreshState::Settled);
    }

    #[test]
    fn test_pre_resolution_fetch_finishing_first_is_discarded() {
        let mut state = ViewState::new();

        let before = state.begin_fetch();
        state.mark_stale();
        let after = state.begin_fetch();

        assert!(!state.apply(before, reading(1)));
        assert_eq!(value(&state), None);
        assert_eq!(state.state(), RefreshState::Fetching);

        assert!(state.apply(after, reading(2)));
        assert_eq!(value(&state), Some(2));
    }

    #[test]
    fn test_out_of_order_periodic_fetches() {
        let mut state = ViewState::new();

        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.apply(second, reading(2)));
        assert!(!state.apply(first, reading(1)));
        assert_eq!(value(&state), Some(2));
    }

    #[test]
    fn test_error_keeps_last_data() {
        let mut state = ViewState::new();

        let ticket = state.begin_fetch();
        state.apply(ticket, reading(7));

        let ticket = state.begin_fetch();
        assert!(state.apply(ticket, Err(NetworkErrors::QueryFailed(RpcError::NetworkDown))));
        assert_eq!(value(&state), Some(7));
        assert_eq!(
            state.view().error,
            Some(NetworkErrors::QueryFailed(RpcError::NetworkDown))
        );

        let ticket = state.begin_fetch();
        state.apply(ticket, reading(8));
        assert_eq!(state.view().error, None);
    }

    #[test]
    fn test_unmounted_discards() {
        let mut state = ViewState::new();
        let ticket = state.begin_fetch();

        state.unmount();
        assert!(!state.is_mounted());
        assert!(!state.apply(ticket, reading(1)));
        assert_eq!(value(&state), None);
        assert_eq!(state.state(), RefreshState::Idle);
    }
}
