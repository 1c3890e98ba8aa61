use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client};
use serde_json::Value;
use tracing::debug;

use super::{build_client, send_json, RequestError};

/// Read-only dashboard endpoints of the separate admin service.
/// Response shapes are ad hoc and passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEndpoint {
    SubadminStats,
    SubadminInfo,
    SubadminInstitute,
    SuperadminInfo,
}

impl AdminEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            AdminEndpoint::SubadminStats => "/auth/subadmin/stats",
            AdminEndpoint::SubadminInfo => "/auth/subadmin/info",
            AdminEndpoint::SubadminInstitute => "/auth/subadmin/institute",
            AdminEndpoint::SuperadminInfo => "/auth/superadmin/info",
        }
    }

    /// Maps the `/dashboard/subadmin/:section` segment.
    pub fn subadmin(section: &str) -> Option<Self> {
        match section {
            "stats" => Some(AdminEndpoint::SubadminStats),
            "info" => Some(AdminEndpoint::SubadminInfo),
            "institute" => Some(AdminEndpoint::SubadminInstitute),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AdminInfoClient {
    client: Client,
    base_url: String,
}

impl AdminInfoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: AdminEndpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// GETs an endpoint, forwarding the caller's `Authorization` header.
    pub async fn fetch(
        &self,
        endpoint: AdminEndpoint,
        authorization: Option<&str>,
    ) -> Result<Value, RequestError> {
        let mut request = self.client.get(self.url(endpoint));
        if let Some(auth) = authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        debug!("Fetching admin info {}", endpoint.path());
        send_json(request).await
    }
}
