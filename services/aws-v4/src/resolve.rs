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

use crate::provide_credential::{
    DetectInstance, EnvCredentialProvider, IMDSCredentialProvider, InstanceLocation,
    TcpDetectInstance,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use awsauth_core::{Context, ProvideCredential, Result, SigningCredential};
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Env,
    Metadata,
    /// Neither env nor the metadata service can ever provide a credential.
    Unavailable,
}

#[derive(Debug, Clone)]
struct Cached {
    cred: Credential,
    source: Source,
}

/// CredentialResolver resolves the credential used to sign requests.
///
/// Resolution order:
///
/// 1. An explicit credential passed to [`CredentialResolver::resolve`] is
///    returned as-is and never cached.
/// 2. On the first call, env values are read. A usable env credential is
///    cached for the lifetime of the resolver and never refreshed.
/// 3. Otherwise, if the process runs on EC2, role credentials are fetched from
///    the instance metadata service. They are refetched once they expire.
///
/// Clones share the same cache, build one resolver and hand out clones.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    config: Config,
    env: EnvCredentialProvider,
    imds: IMDSCredentialProvider,
    location: InstanceLocation,
    cache: Arc<Mutex<Option<Cached>>>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl CredentialResolver {
    /// Create a new resolver with config.
    pub fn new(config: Config) -> Self {
        let location = InstanceLocation::new(TcpDetectInstance::from_endpoint(
            &config.metadata_endpoint,
            config.probe_timeout,
        ));
        let imds = IMDSCredentialProvider::new()
            .with_endpoint(config.metadata_endpoint.clone())
            .with_timeout(config.metadata_timeout);

        Self {
            config,
            env: EnvCredentialProvider::new(),
            imds,
            location,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the EC2 instance detector.
    pub fn with_detect_instance(mut self, detector: impl DetectInstance) -> Self {
        self.location = InstanceLocation::new(detector);
        self
    }

    /// Whether the process runs on an EC2 instance.
    ///
    /// The detector runs on the first call only, later calls return the
    /// memoized answer.
    pub async fn is_running_in_cloud(&self) -> bool {
        self.location.is_ec2().await
    }

    /// Resolve the credential to sign with.
    ///
    /// Never fails: if nothing can be resolved, an empty credential is
    /// returned, check it with [`Credential::is_usable`].
    pub async fn resolve(&self, ctx: &Context, explicit: Option<Credential>) -> Credential {
        if let Some(cred) = explicit {
            debug!("use explicit credential, skip resolving");
            return cred;
        }

        // Held across the fetch so that only one caller refreshes.
        let mut cache = self.cache.lock().await;
        match cache.as_ref() {
            Some(Cached {
                source: Source::Env,
                cred,
            }) => return cred.clone(),
            Some(Cached {
                source: Source::Metadata,
                cred,
            }) if cred.is_valid() => return cred.clone(),
            Some(Cached {
                source: Source::Unavailable,
                ..
            }) => return Credential::default(),
            Some(_) => debug!("cached credential expired or unusable, refreshing"),
            None => {
                if let Some(cred) = self.env.load(ctx) {
                    *cache = Some(Cached {
                        cred: cred.clone(),
                        source: Source::Env,
                    });
                    return cred;
                }
            }
        }

        if self.config.ec2_metadata_disabled {
            debug!("metadata service is disabled, no credential resolved");
            *cache = Some(Cached {
                cred: Credential::default(),
                source: Source::Unavailable,
            });
            return Credential::default();
        }
        if !self.location.is_ec2().await {
            debug!("not running on EC2, no credential resolved");
            *cache = Some(Cached {
                cred: Credential::default(),
                source: Source::Unavailable,
            });
            return Credential::default();
        }

        let cred = self.imds.fetch_role_credentials(ctx).await;
        *cache = Some(Cached {
            cred: cred.clone(),
            source: Source::Metadata,
        });
        cred
    }
}

#[async_trait]
impl ProvideCredential for CredentialResolver {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let cred = self.resolve(ctx, None).await;
        Ok(cred.is_usable().then_some(cred))
    }
}
