//! Blocking HTTP client for the workflow automation endpoints
//!
//! All three endpoints take a JSON body via POST. Endpoint URLs are signed
//! trigger URLs and come from configuration only.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use rts_domain::model::{AuthReply, AuthRequest, GatewayReply, LinkOpenedNotice, SubmissionPayload};
use rts_domain::repository::WorkflowGateway;
use rts_types::{ConfigError, Error, Result};

/// Body text reported when an error response cannot be read
const UNKNOWN_ERROR_BODY: &str = "Unbekannter Fehler";

/// Trigger URLs of the workflow service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowEndpoints {
    pub auth_url: String,
    pub submit_url: String,
    pub link_opened_url: String,
}

/// [`WorkflowGateway`] over blocking reqwest
pub struct HttpWorkflowClient {
    endpoints: WorkflowEndpoints,
    http_client: Client,
}

impl HttpWorkflowClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(endpoints: WorkflowEndpoints, timeout: Duration) -> Result<Self> {
        let http_client = Self::client_builder(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self::with_client(endpoints, http_client))
    }

    /// reqwest builder with the connect and request timeout applied
    pub fn client_builder(timeout: Duration) -> ClientBuilder {
        Client::builder().connect_timeout(timeout).timeout(timeout)
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_client(endpoints: WorkflowEndpoints, http_client: Client) -> Self {
        Self {
            endpoints,
            http_client,
        }
    }

    fn post_json<T: Serialize>(
        &self,
        name: &'static str,
        url: &str,
        body: &T,
    ) -> Result<reqwest::blocking::Response> {
        if url.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint(name).into());
        }
        debug!("POST {}", name);
        self.http_client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| Error::Http(format!("{name}: {e}")))
    }

    fn post_for_reply<T: Serialize>(
        &self,
        name: &'static str,
        url: &str,
        body: &T,
    ) -> Result<GatewayReply> {
        let response = self.post_json(name, url, body)?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_else(|e| {
            warn!("{}: failed to read response body: {}", name, e);
            UNKNOWN_ERROR_BODY.to_string()
        });
        Ok(GatewayReply { status, body })
    }
}

impl WorkflowGateway for HttpWorkflowClient {
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthReply> {
        let response = self.post_json("auth_url", &self.endpoints.auth_url, request)?;
        let status = response.status().as_u16();
        let mut reply: AuthReply = response
            .json()
            .map_err(|e| Error::Http(format!("auth_url: invalid response body: {e}")))?;
        reply.status = status;
        Ok(reply)
    }

    fn submit_orders(&self, payload: &SubmissionPayload) -> Result<GatewayReply> {
        self.post_for_reply("submit_url", &self.endpoints.submit_url, payload)
    }

    fn notify_link_opened(&self, notice: &LinkOpenedNotice) -> Result<GatewayReply> {
        self.post_for_reply("link_opened_url", &self.endpoints.link_opened_url, notice)
    }
}
