//! Photo URL resolution for list responses.

use tracing::warn;

use clinic_core::storage::PhotoStore;

/// Resolve a stored key into a URL, degrading to `None` on signing errors so
/// one bad object never fails a whole listing.
pub(crate) async fn photo_url(store: &PhotoStore, key: Option<&str>) -> Option<String> {
    match store.presign(key).await {
        Ok(url) => url,
        Err(e) => {
            warn!(key = key.unwrap_or_default(), error = %e, "failed to presign photo");
            None
        }
    }
}
