//! Session authentication against the KeyWarden service.
//!
//! Exchanges login credentials for a bearer "access key". The access key is
//! handed straight back to the caller; this component keeps no session
//! state between calls.

use std::sync::Arc;

use tracing::debug;

use crate::client::envelope::Envelope;
use crate::client::transport::RequestExecutor;
use crate::errors::ApiResult;

/// Exchanges credentials for an access key.
pub struct SessionAuthenticator {
    executor: Arc<dyn RequestExecutor>,
}

impl SessionAuthenticator {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Authenticate, surfacing the full failure taxonomy.
    ///
    /// POSTs `{"login": .., "password": ..}` to `auth` with no bearer and
    /// extracts `access_key` from the reply. Single attempt, no retries.
    pub async fn try_authenticate(&self, login: &str, password: &str) -> ApiResult<String> {
        let body = serde_json::json!({
            "login": login,
            "password": password,
        })
        .to_string();

        let raw = self.executor.post("auth", &body, None).await?;
        let envelope = Envelope::parse(&raw)?;

        Ok(envelope.str_field("access_key")?.to_string())
    }

    /// Sentinel-shaped wrapper: `Some(access_key)` on success, `None` on any
    /// failure. The reason is logged, not raised.
    pub async fn authenticate(&self, login: &str, password: &str) -> Option<String> {
        match self.try_authenticate(login, password).await {
            Ok(access_key) => Some(access_key),
            Err(err) => {
                debug!("authentication failed: {err}");
                None
            }
        }
    }
}

/// Local presence check: true iff the supplied access key is non-empty.
///
/// This is a syntactic check only. It never contacts the service and says
/// nothing about whether the token is still honored server-side.
pub fn is_access_key_present(access_key: &str) -> bool {
    !access_key.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_check_is_non_empty_only() {
        assert!(!is_access_key_present(""));
        assert!(is_access_key_present("anything-nonempty"));
        // Expired or garbage tokens still count as "present".
        assert!(is_access_key_present("no-longer-valid-token"));
    }

    #[test]
    fn auth_request_wire_shape() {
        let body = serde_json::json!({
            "login": "alice",
            "password": "pw1",
        });

        assert_eq!(body["login"], "alice");
        assert_eq!(body["password"], "pw1");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }
}
