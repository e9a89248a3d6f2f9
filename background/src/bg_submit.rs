use std::collections::HashSet;

use errors::tx::TransactionErrors;
use proto::{
    address::Address,
    tx::{TransactionRequest, TransactionStatus},
};
use tracing::debug;

/// Refuses to hand the same action on the same contract to the signer twice
/// while the first submission is unresolved.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    pending: HashSet<(&'static str, Address)>,
}

fn key(request: &TransactionRequest) -> (&'static str, Address) {
    (request.action.kind(), request.receiver)
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, request: &TransactionRequest) -> bool {
        self.pending.contains(&key(request))
    }

    pub fn begin(&mut self, request: &TransactionRequest) -> Result<(), TransactionErrors> {
        let key = key(request);

        if !self.pending.insert(key) {
            return Err(TransactionErrors::AlreadyPending(key.0.to_string()));
        }
        debug!(target: "refresh", action = key.0, "submission pending");

        Ok(())
    }

    /// Releases every request of a batch once its status resolves.
    pub fn settle(&mut self, requests: &[TransactionRequest], status: TransactionStatus) {
        if !status.is_resolved() {
            return;
        }

        for request in requests {
            self.pending.remove(&key(request));
        }
    }

    /// Reserves a whole batch, or nothing when any part is already pending.
    pub fn begin_batch(&mut self, requests: &[TransactionRequest]) -> Result<(), TransactionErrors> {
        for (i, request) in requests.iter().enumerate() {
            if let Err(e) = self.begin(request) {
                self.settle(&requests[..i], TransactionStatus::Failed);
                return Err(e);
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
