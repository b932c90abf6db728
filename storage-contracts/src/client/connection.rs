// SPDX-License-Identifier: GPL-3.0-only

//! Installer bus connection management
//!
//! The installer runs its modules on a private message bus whose address is published in a
//! file under `/run/anaconda`. The default connection is established lazily and cached for
//! the lifetime of the process.

use std::path::Path;
use std::sync::OnceLock;

use zbus::Connection;
use zbus::connection::Builder as ConnectionBuilder;

use super::error::ClientError;

/// File the installer writes its bus address to
pub const BUS_ADDRESS_FILE: &str = "/run/anaconda/bus.address";

/// Cached connection to the default installer bus
static INSTALLER_CONNECTION: OnceLock<Connection> = OnceLock::new();

/// Read the bus address from `path`
pub fn read_bus_address(path: &Path) -> Result<String, ClientError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ClientError::Connection(format!(
            "Failed to read bus address from {}: {}",
            path.display(),
            e
        ))
    })?;

    let address = raw.trim();
    if address.is_empty() {
        return Err(ClientError::Connection(format!(
            "Bus address file {} is empty",
            path.display()
        )));
    }

    Ok(address.to_string())
}

/// Open a fresh connection to the bus at `address`
pub async fn connect(address: &str) -> Result<Connection, ClientError> {
    ConnectionBuilder::address(address)
        .map_err(|e| ClientError::Connection(format!("Invalid bus address {address}: {e}")))?
        .build()
        .await
        .map_err(|e| ClientError::Connection(format!("Failed to connect to {address}: {e}")))
}

/// Get or create the shared connection to the installer bus
pub async fn installer_connection() -> Result<&'static Connection, ClientError> {
    if let Some(conn) = INSTALLER_CONNECTION.get() {
        return Ok(conn);
    }

    let address = read_bus_address(Path::new(BUS_ADDRESS_FILE))?;
    let conn = connect(&address).await?;

    // Another task may have won the race; either connection is fine to keep.
    let _ = INSTALLER_CONNECTION.set(conn);

    INSTALLER_CONNECTION.get().ok_or_else(|| {
        ClientError::Connection("Failed to initialize shared installer bus connection".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_address_is_trimmed() {
        let dir = std::env::temp_dir().join(format!("bus-address-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("bus.address");
        std::fs::write(&file, "unix:path=/run/anaconda/bus\n").unwrap();

        assert_eq!(
            read_bus_address(&file).unwrap(),
            "unix:path=/run/anaconda/bus"
        );

        std::fs::write(&file, "  \n").unwrap();
        assert!(matches!(
            read_bus_address(&file),
            Err(ClientError::Connection(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_address_file_is_a_connection_error() {
        let missing = Path::new("/nonexistent/installer/bus.address");
        assert!(matches!(
            read_bus_address(missing),
            Err(ClientError::Connection(_))
        ));
    }
}
