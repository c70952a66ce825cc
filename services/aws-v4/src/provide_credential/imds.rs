// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use awsauth_core::time::parse_rfc3339;
use awsauth_core::{Context, Error, ProvideCredential, Result};
use bytes::Bytes;
use http::Method;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

/// IMDSCredentialProvider loads role credentials from the EC2 instance
/// metadata service.
///
/// The first role listed by the instance is used.
#[derive(Debug, Clone)]
pub struct IMDSCredentialProvider {
    endpoint: String,
    timeout: Duration,
}

impl Default for IMDSCredentialProvider {
    fn default() -> Self {
        Self {
            endpoint: EC2_METADATA_ENDPOINT.to_string(),
            timeout: EC2_METADATA_TIMEOUT,
        }
    }
}

impl IMDSCredentialProvider {
    /// Create a new `IMDSCredentialProvider` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint for the metadata service.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the timeout for every metadata request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// List the roles attached to this instance, in response order.
    ///
    /// Returns an empty list on any failure.
    pub async fn list_roles(&self, ctx: &Context) -> Vec<String> {
        match self.try_list_roles(ctx).await {
            Ok(roles) => roles,
            Err(err) => {
                warn!("failed to list roles from metadata service: {err:?}");
                Vec::new()
            }
        }
    }

    /// Fetch the credentials of the first role attached to this instance.
    ///
    /// Returns an empty credential on any failure, or if no role is attached.
    pub async fn fetch_role_credentials(&self, ctx: &Context) -> Credential {
        match self.try_fetch_role_credentials(ctx).await {
            Ok(Some(cred)) => cred,
            Ok(None) => Credential::default(),
            Err(err) => {
                warn!("failed to fetch role credentials from metadata service: {err:?}");
                Credential::default()
            }
        }
    }

    async fn try_list_roles(&self, ctx: &Context) -> Result<Vec<String>> {
        let url = format!(
            "{}{EC2_SECURITY_CREDENTIALS_PATH}",
            self.endpoint.trim_end_matches('/')
        );
        let content = self.get(ctx, &url).await?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(String::from)
            .collect())
    }

    async fn try_fetch_role_credentials(&self, ctx: &Context) -> Result<Option<Credential>> {
        let roles = self.try_list_roles(ctx).await?;
        let Some(role) = roles.first() else {
            debug!("no role attached to this instance");
            return Ok(None);
        };

        let url = format!(
            "{}{EC2_SECURITY_CREDENTIALS_PATH}{role}",
            self.endpoint.trim_end_matches('/')
        );
        let content = self.get(ctx, &url).await?;
        let resp: Ec2MetadataIamSecurityCredentials =
            serde_json::from_str(&content).map_err(|e| {
                Error::unexpected("failed to parse role credentials response")
                    .with_source(e)
                    .with_context(format!("role: {role}"))
                    .with_context(format!("response_length: {}", content.len()))
            })?;

        match resp.code.as_str() {
            "" | "Success" => {}
            "AssumeRoleUnauthorizedAccess" => {
                return Err(Error::credential_denied(format!(
                    "instance not authorized to assume role: {}",
                    resp.message
                ))
                .with_context(format!("error_code: {}", resp.code))
                .with_context(format!("role: {role}")));
            }
            code if code.contains("Expired") => {
                return Err(Error::credential_expired(format!(
                    "metadata service returned expired credentials: {}",
                    resp.message
                ))
                .with_context(format!("error_code: {code}"))
                .with_context(format!("role: {role}")));
            }
            code => {
                return Err(Error::credential_invalid(format!(
                    "metadata service returned error: {}",
                    resp.message
                ))
                .with_context(format!("error_code: {code}"))
                .with_context(format!("role: {role}")));
            }
        }

        let expires_in = if resp.expiration.is_empty() {
            None
        } else {
            Some(
                parse_rfc3339(&resp.expiration)
                    .map_err(|e| e.with_context(format!("role: {role}")))?,
            )
        };
        debug!("loaded credential of role {role} from metadata service");

        Ok(Some(Credential {
            access_key_id: resp.access_key_id,
            secret_access_key: resp.secret_access_key,
            session_token: Some(resp.token).filter(|t| !t.is_empty()),
            expires_in,
        }))
    }

    async fn get(&self, ctx: &Context, url: &str) -> Result<String> {
        let req = http::Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Bytes::new())
            .map_err(|e| {
                Error::request_invalid("failed to build metadata request")
                    .with_source(e)
                    .with_context(format!("url: {url}"))
            })?;

        let resp = tokio::time::timeout(self.timeout, ctx.http_send_as_string(req))
            .await
            .map_err(|_| {
                Error::unexpected("metadata request timed out")
                    .with_context(format!("url: {url}"))
                    .with_context(format!("timeout: {:?}", self.timeout))
            })?
            .map_err(|e| e.with_context(format!("url: {url}")))?;

        if resp.status() != http::StatusCode::OK {
            return Err(Error::unexpected(format!(
                "metadata service responded with {}",
                resp.status()
            ))
            .with_context(format!("url: {url}"))
            .with_context(format!("body: {}", resp.body())));
        }

        Ok(resp.into_body())
    }
}

#[async_trait]
impl ProvideCredential for IMDSCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.try_fetch_role_credentials(ctx).await
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Ec2MetadataIamSecurityCredentials {
    access_key_id: String,
    secret_access_key: String,
    token: String,
    expiration: String,

    code: String,
    message: String,
}
