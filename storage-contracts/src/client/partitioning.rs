// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use async_trait::async_trait;
use zbus::Connection;
use zbus::proxy;
use zbus::zvariant::{OwnedObjectPath, OwnedValue};

use crate::client::connection::installer_connection;
use crate::client::error::ClientError;
use crate::{AutomaticRequest, PartitioningMethod, PartitioningQuery, StorageError};

/// Installer storage module
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage",
    default_path = "/org/fedoraproject/Anaconda/Modules/Storage"
)]
pub trait StorageModule {
    /// Partitioning object applied to the storage model, "/" when none
    #[zbus(property)]
    fn applied_partitioning(&self) -> zbus::Result<OwnedObjectPath>;
}

/// A partitioning module object
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage.Partitioning",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage"
)]
pub trait Partitioning {
    #[zbus(property)]
    fn partitioning_method(&self) -> zbus::Result<String>;
}

/// Automatic partitioning object
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage.Partitioning.Automatic",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage"
)]
pub trait AutomaticPartitioning {
    #[zbus(property)]
    fn request(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}

/// Client for the installer's partitioning lookups
pub struct PartitioningClient {
    connection: Connection,
    storage: StorageModuleProxy<'static>,
}

impl PartitioningClient {
    /// Connect over the shared installer bus connection
    pub async fn new() -> Result<Self, ClientError> {
        let conn = installer_connection().await?;
        Self::with_connection(conn.clone()).await
    }

    pub async fn with_connection(connection: Connection) -> Result<Self, ClientError> {
        let storage = StorageModuleProxy::new(&connection).await.map_err(|e| {
            ClientError::Connection(format!("Failed to create storage module proxy: {}", e))
        })?;

        Ok(Self {
            connection,
            storage,
        })
    }

    pub async fn applied_partitioning(&self) -> Result<String, ClientError> {
        let path = self.storage.applied_partitioning().await?;
        Ok(path.as_str().to_string())
    }

    pub async fn partitioning_method(
        &self,
        partitioning: &str,
    ) -> Result<PartitioningMethod, ClientError> {
        let proxy = PartitioningProxy::builder(&self.connection)
            .path(partitioning.to_string())?
            .build()
            .await?;
        let method = proxy.partitioning_method().await?;
        Ok(PartitioningMethod::from_wire(&method))
    }

    pub async fn partitioning_request(
        &self,
        partitioning: &str,
    ) -> Result<AutomaticRequest, ClientError> {
        let proxy = AutomaticPartitioningProxy::builder(&self.connection)
            .path(partitioning.to_string())?
            .build()
            .await?;
        let request = proxy.request().await?;
        parse_automatic_request(request)
    }
}

fn parse_automatic_request(
    mut request: HashMap<String, OwnedValue>,
) -> Result<AutomaticRequest, ClientError> {
    let encrypted = match request.remove("encrypted") {
        Some(value) => bool::try_from(value)
            .map_err(|e| ClientError::ParseError(format!("Invalid 'encrypted' value: {}", e)))?,
        None => false,
    };

    let luks_version = match request.remove("luks-version") {
        Some(value) => {
            let version = String::try_from(value).map_err(|e| {
                ClientError::ParseError(format!("Invalid 'luks-version' value: {}", e))
            })?;
            Some(version).filter(|v| !v.is_empty())
        }
        None => None,
    };

    Ok(AutomaticRequest {
        encrypted,
        luks_version,
    })
}

#[async_trait]
impl PartitioningQuery for PartitioningClient {
    async fn applied_partitioning(&self) -> Result<String, StorageError> {
        Ok(PartitioningClient::applied_partitioning(self).await?)
    }

    async fn partitioning_method(
        &self,
        partitioning: &str,
    ) -> Result<PartitioningMethod, StorageError> {
        Ok(PartitioningClient::partitioning_method(self, partitioning).await?)
    }

    async fn partitioning_request(
        &self,
        partitioning: &str,
    ) -> Result<AutomaticRequest, StorageError> {
        Ok(PartitioningClient::partitioning_request(self, partitioning).await?)
    }
}

#[cfg(test)]
mod tests {
    use zbus::zvariant::Value;

    use super::*;

    fn owned(value: Value<'_>) -> OwnedValue {
        value.try_to_owned().unwrap()
    }

    #[test]
    fn automatic_request_reads_encryption_flag() {
        let mut request = HashMap::new();
        request.insert("encrypted".to_string(), owned(Value::from(true)));
        request.insert("luks-version".to_string(), owned(Value::from("luks2")));
        request.insert("passphrase".to_string(), owned(Value::from("")));

        let parsed = parse_automatic_request(request).unwrap();

        assert!(parsed.encrypted);
        assert_eq!(parsed.luks_version.as_deref(), Some("luks2"));
    }

    #[test]
    fn missing_keys_default_to_unencrypted() {
        let parsed = parse_automatic_request(HashMap::new()).unwrap();
        assert_eq!(parsed, AutomaticRequest::default());
    }

    #[test]
    fn mistyped_flag_is_a_parse_error() {
        let mut request = HashMap::new();
        request.insert("encrypted".to_string(), owned(Value::from("yes")));

        assert!(matches!(
            parse_automatic_request(request),
            Err(ClientError::ParseError(_))
        ));
    }
}
