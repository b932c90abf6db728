// SPDX-License-Identifier: GPL-3.0-only

//! Initial disk-encryption display state

use storage_contracts::{PartitioningMethod, PartitioningQuery, StorageError};

/// Object path the storage module reports when nothing has been applied
const NO_PARTITIONING: &str = "/";

/// Whether the applied automatic partitioning encrypts the disks.
///
/// `None` when nothing is applied, the method is not automatic, or a lookup fails; failures
/// are logged and never fatal.
pub async fn lookup_encryption_status(query: &dyn PartitioningQuery) -> Option<bool> {
    match try_lookup(query).await {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!("failed to look up disk encryption status: {err}");
            None
        }
    }
}

async fn try_lookup(query: &dyn PartitioningQuery) -> Result<Option<bool>, StorageError> {
    let applied = query.applied_partitioning().await?;
    if applied.is_empty() || applied == NO_PARTITIONING {
        tracing::debug!("no partitioning applied");
        return Ok(None);
    }

    let method = query.partitioning_method(&applied).await?;
    if method != PartitioningMethod::Automatic {
        tracing::debug!(%method, "encryption status only tracked for automatic partitioning");
        return Ok(None);
    }

    let request = query.partitioning_request(&applied).await?;
    Ok(Some(request.encrypted))
}
