//! Contact data provider seam.

use async_trait::async_trait;

use crate::contact::ContactRecord;
use crate::error::ProviderError;

/// Upstream source of contact records.
///
/// One parameterless request returning the full, ordered contact list.
/// Implementations map any non-success outcome to a [`ProviderError`].
#[async_trait]
pub trait ContactProvider: Send + Sync {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, ProviderError>;
}
