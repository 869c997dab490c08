//! App key lifecycle operations: issuance, activation, activation counts.
//!
//! Every operation takes the caller-supplied access key (and app key) as
//! arguments. Nothing is cached here; the server holds the authoritative
//! state and the caller holds the tokens.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::envelope::Envelope;
use crate::client::transport::RequestExecutor;
use crate::errors::{ApiError, ApiResult};

/// Sentinel returned by `check_app_key_activations` on any failure.
/// Never a valid activation count.
pub const ACTIVATIONS_UNKNOWN: i64 = -1;

/// Literal success message the legacy service returns from `update_app_key`.
pub const UPDATE_SUCCESS_MESSAGE: &str = "App key activations updated successfully";

/// How `update_app_key` decides success.
///
/// The deployed service signals success only through the exact wording of
/// its `message` field, which silently breaks every caller the moment the
/// wording changes. Both contracts are supported so callers can keep
/// drop-in compatibility or opt into the structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateContract {
    /// Exact string match of `message` against [`UPDATE_SUCCESS_MESSAGE`].
    /// Wire-compatible with the existing service. Default.
    LegacyMessage,
    /// Any well-formed 2xx envelope counts as success; failures are expected
    /// to arrive as non-2xx statuses instead of prose.
    StatusOnly,
}

impl UpdateContract {
    /// Parse the config-file spelling of a contract name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name {
            "legacy-message" => Some(UpdateContract::LegacyMessage),
            "status-only" => Some(UpdateContract::StatusOnly),
            _ => None,
        }
    }
}

impl Default for UpdateContract {
    fn default() -> Self {
        UpdateContract::LegacyMessage
    }
}

/// Issues and manages app keys on behalf of an authenticated session.
pub struct AppKeyManager {
    executor: Arc<dyn RequestExecutor>,
    update_contract: UpdateContract,
}

impl AppKeyManager {
    /// Create a manager using the legacy update contract.
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self::with_update_contract(executor, UpdateContract::default())
    }

    /// Create a manager with an explicit update contract.
    pub fn with_update_contract(
        executor: Arc<dyn RequestExecutor>,
        update_contract: UpdateContract,
    ) -> Self {
        Self {
            executor,
            update_contract,
        }
    }

    /// Issue a new app key for the authenticated session.
    ///
    /// POST `create_app`, empty body, bearer = `access_key`; extracts
    /// `app_key` from the reply.
    pub async fn try_create_app_key(&self, access_key: &str) -> ApiResult<String> {
        let raw = self.executor.post("create_app", "", Some(access_key)).await?;
        let envelope = Envelope::parse(&raw)?;

        Ok(envelope.str_field("app_key")?.to_string())
    }

    /// Sentinel wrapper for [`Self::try_create_app_key`].
    ///
    /// The empty-body case gets its own diagnostic so operators can tell a
    /// silently-broken service from an outright request failure.
    pub async fn create_app_key(&self, access_key: &str) -> Option<String> {
        match self.try_create_app_key(access_key).await {
            Ok(app_key) => Some(app_key),
            Err(ApiError::EmptyBody) => {
                warn!("failed to create app key: service returned an empty response");
                None
            }
            Err(err) => {
                debug!("app key creation failed: {err}");
                None
            }
        }
    }

    /// Activate an app key against the service.
    ///
    /// POST `auth_app?app_key=..`, empty body, bearer = `access_key`.
    /// `Ok(false)` means the service answered and denied the activation;
    /// a missing or non-boolean `result` is a malformed envelope.
    pub async fn try_authenticate_app(&self, app_key: &str, access_key: &str) -> ApiResult<bool> {
        let path = format!("auth_app?app_key={app_key}");
        let raw = self.executor.post(&path, "", Some(access_key)).await?;

        Envelope::parse(&raw)?.bool_field("result")
    }

    /// Sentinel wrapper: the boolean at `result`, or `false` on any failure.
    pub async fn authenticate_app(&self, app_key: &str, access_key: &str) -> bool {
        match self.try_authenticate_app(app_key, access_key).await {
            Ok(result) => result,
            Err(err) => {
                debug!("app activation failed: {err}");
                false
            }
        }
    }

    /// Query how many activations remain for an app key.
    ///
    /// GET `check_app?app_key=..`, unauthenticated: the app key in the query
    /// string alone identifies the key.
    pub async fn try_check_activations(&self, app_key: &str) -> ApiResult<i64> {
        let path = format!("check_app?app_key={app_key}");
        let raw = self.executor.get(&path, None).await?;

        Envelope::parse(&raw)?.int_field("activations_left")
    }

    /// Sentinel wrapper: the integer at `activations_left` (zero included),
    /// or [`ACTIVATIONS_UNKNOWN`] on any failure.
    pub async fn check_app_key_activations(&self, app_key: &str) -> i64 {
        match self.try_check_activations(app_key).await {
            Ok(activations_left) => activations_left,
            Err(err) => {
                debug!("activation check failed: {err}");
                ACTIVATIONS_UNKNOWN
            }
        }
    }

    /// Change the allowed activation count for an app key.
    ///
    /// POST `update_app_key?app_key=..&num_activations=..`, empty body,
    /// bearer = `access_key`. Success is judged by the configured
    /// [`UpdateContract`]; under the legacy contract a well-formed reply with
    /// any other `message` is `Rejected`.
    pub async fn try_update_app_key(
        &self,
        app_key: &str,
        num_activations: u32,
        access_key: &str,
    ) -> ApiResult<()> {
        let path = format!("update_app_key?app_key={app_key}&num_activations={num_activations}");
        let raw = self.executor.post(&path, "", Some(access_key)).await?;
        let envelope = Envelope::parse(&raw)?;

        match self.update_contract {
            UpdateContract::StatusOnly => Ok(()),
            UpdateContract::LegacyMessage => {
                let message = envelope.str_field("message")?;
                if message == UPDATE_SUCCESS_MESSAGE {
                    Ok(())
                } else {
                    Err(ApiError::Rejected(message.to_string()))
                }
            }
        }
    }

    /// Sentinel wrapper: `true` iff the update succeeded under the
    /// configured contract.
    pub async fn update_app_key(
        &self,
        app_key: &str,
        num_activations: u32,
        access_key: &str,
    ) -> bool {
        match self
            .try_update_app_key(app_key, num_activations, access_key)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                debug!("app key update failed: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_names_parse() {
        assert_eq!(
            UpdateContract::from_config_name("legacy-message"),
            Some(UpdateContract::LegacyMessage)
        );
        assert_eq!(
            UpdateContract::from_config_name("status-only"),
            Some(UpdateContract::StatusOnly)
        );
        assert_eq!(UpdateContract::from_config_name("exact-match"), None);
        assert_eq!(UpdateContract::from_config_name(""), None);
    }

    #[test]
    fn legacy_contract_is_the_default() {
        assert_eq!(UpdateContract::default(), UpdateContract::LegacyMessage);
    }

    #[test]
    fn sentinel_is_negative() {
        // -1 must stay outside the valid (non-negative) activation range.
        assert!(ACTIVATIONS_UNKNOWN < 0);
    }
}
