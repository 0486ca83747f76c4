//! Agilix Daily View Gate
//!
//! Client-side policy limiting how many contacts a user may view per UTC
//! day. The gate caches the day's contact set per user, trips a sticky
//! "limit reached" flag when paging past the cap, and reports when the cap
//! resets. All state goes through an injected [`StateStore`].
//!
//! [`StateStore`]: agilix_storage::StateStore

pub mod error;
pub mod filter;
pub mod gate;
pub mod reset;
pub mod state;

pub use error::{GateError, GateResult};
pub use filter::filter;
pub use gate::{ready_user, today_key, DailyViewGate, LoadOutcome, PageDirection, PageResult, RecordSource};
pub use reset::{time_until_reset, ResetCountdown};
pub use state::DailyViewState;
