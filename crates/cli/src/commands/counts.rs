//! Category count reconciliation.

use gehna_admin::services::counts::CountSync;
use gehna_datastore::{CategoryStore, ProductStore};

/// Recompute every category's `productCount` from a full product scan.
pub async fn reconcile() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::docstore_from_env()?;
    let counts = CountSync::new(
        ProductStore::new(store.clone()),
        CategoryStore::new(store),
    );

    let written = counts.reconcile().await?;
    for (name, count) in &written {
        tracing::info!(category = %name, count, "count written");
    }
    tracing::info!(categories = written.len(), "reconciliation complete");
    Ok(())
}
