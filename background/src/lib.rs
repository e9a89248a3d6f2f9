use errors::background::BackgroundError;

pub mod bg_refresh;
pub mod bg_submit;
pub mod source;
pub mod view_state;

pub type Result<T> = std::result::Result<T, BackgroundError>;

pub use bg_refresh::{RefreshController, RefreshMessage};
pub use bg_submit::SubmitGuard;
pub use source::{DashboardSource, Snapshot, SnapshotSource};
pub use view_state::{FetchTicket, RefreshState, ViewSnapshot, ViewState};
