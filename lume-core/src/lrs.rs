//! Delivery adapter: send finished xAPI statements to Learning Record Stores
//!
//! Delivery is best-effort and decoupled from generation: a store rejection
//! or transport failure is normalized and reported next to the statement,
//! never retried, and never invalidates the statement already returned to
//! the caller.

use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, error};

use crate::config::LrsConfig;
use crate::error::DeliveryError;
use crate::xapi::XapiStatement;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);
const XAPI_VERSION_HEADER: &str = "X-Experience-API-Version";
const XAPI_VERSION: &str = "1.0.1";

/// HTTP client for Learning Record Stores.
///
/// All instances share one underlying `reqwest::Client`, so the connection
/// pool is reused across delivering calls.
pub struct LrsClient {
    http: reqwest::Client,
}

fn shared_http() -> &'static reqwest::Client {
    static HTTP: OnceLock<reqwest::Client> = OnceLock::new();
    HTTP.get_or_init(reqwest::Client::new)
}

impl LrsClient {
    pub fn new() -> Self {
        Self {
            http: shared_http().clone(),
        }
    }

    /// Deliver a statement to every configured store.
    ///
    /// Returns the normalized failures; an empty vector means every store
    /// accepted the statement.
    pub async fn store_statement(
        &self,
        stores: &[LrsConfig],
        statement: &XapiStatement,
    ) -> Vec<DeliveryError> {
        let mut failures = Vec::new();
        for store in stores {
            match self.send_one(store, statement).await {
                Ok(()) => {
                    debug!(endpoint = %store.endpoint, statement_id = %statement.id, "statement stored");
                }
                Err(err) => {
                    error!(endpoint = %store.endpoint, error = %err, "failed to store statement");
                    failures.push(err);
                }
            }
        }
        failures
    }

    async fn send_one(
        &self,
        store: &LrsConfig,
        statement: &XapiStatement,
    ) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(statements_url(&store.endpoint))
            .timeout(DELIVERY_TIMEOUT)
            .basic_auth(&store.username, Some(&store.password))
            .header(XAPI_VERSION_HEADER, XAPI_VERSION)
            .json(statement)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                code: status.as_u16(),
                msg,
            });
        }
        Ok(())
    }
}

impl Default for LrsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The statements resource of an LRS endpoint
fn statements_url(endpoint: &str) -> String {
    if endpoint.ends_with('/') {
        format!("{}statements", endpoint)
    } else {
        format!("{}/statements", endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_url_joins_with_trailing_slash() {
        assert_eq!(
            statements_url("https://lrs.example.com/xAPI/"),
            "https://lrs.example.com/xAPI/statements"
        );
    }

    #[test]
    fn statements_url_joins_without_trailing_slash() {
        assert_eq!(
            statements_url("https://lrs.example.com/xAPI"),
            "https://lrs.example.com/xAPI/statements"
        );
    }
}
