// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::{StorageError, StorageErrorKind};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("installer storage service is not available")]
    ServiceNotAvailable,

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("no reply: {0}")]
    NoReply(String),

    #[error("not installed: {0}")]
    NotInstalled(String),

    #[error("method call failed: {0}")]
    MethodCall(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("process error: {0}")]
    Process(String),
}

impl From<zbus::Error> for ClientError {
    fn from(err: zbus::Error) -> Self {
        match err {
            zbus::Error::MethodError(ref name, ref detail, _) => match name.as_str() {
                "org.freedesktop.DBus.Error.ServiceUnknown" => ClientError::ServiceNotAvailable,
                "org.freedesktop.DBus.Error.AccessDenied" => {
                    ClientError::AccessDenied(detail.clone().unwrap_or_default())
                }
                "org.freedesktop.DBus.Error.NoReply" | "org.freedesktop.DBus.Error.Timeout" => {
                    ClientError::NoReply(name.to_string())
                }
                _ => ClientError::MethodCall(err.to_string()),
            },
            other => ClientError::MethodCall(other.to_string()),
        }
    }
}

impl From<ClientError> for StorageError {
    fn from(err: ClientError) -> Self {
        let kind = match err {
            ClientError::Connection(_) | ClientError::ServiceNotAvailable => {
                StorageErrorKind::Unavailable
            }
            ClientError::AccessDenied(_) => StorageErrorKind::PermissionDenied,
            ClientError::NoReply(_) => StorageErrorKind::Timeout,
            ClientError::NotInstalled(_) => StorageErrorKind::NotFound,
            ClientError::ParseError(_) => StorageErrorKind::InvalidInput,
            ClientError::MethodCall(_) | ClientError::Process(_) => StorageErrorKind::Internal,
        };
        StorageError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_storage_kinds() {
        let kind = |err: ClientError| StorageError::from(err).kind;

        assert_eq!(kind(ClientError::ServiceNotAvailable), StorageErrorKind::Unavailable);
        assert_eq!(
            kind(ClientError::NotInstalled("pwscore".into())),
            StorageErrorKind::NotFound
        );
        assert_eq!(
            kind(ClientError::NoReply("timeout".into())),
            StorageErrorKind::Timeout
        );
        assert_eq!(
            kind(ClientError::ParseError("bad variant".into())),
            StorageErrorKind::InvalidInput
        );
    }
}
