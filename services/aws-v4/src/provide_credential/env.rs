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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use awsauth_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads AWS credentials from environment variables.
///
/// This provider looks for the following environment variables, first
/// non-empty value wins:
///
/// - access key: `AWS_ACCESS_KEY_ID`, then `AWS_ACCESS_KEY`
/// - secret key: `AWS_SECRET_ACCESS_KEY`, then `AWS_SECRET_KEY`
/// - token (optional): `AWS_SESSION_TOKEN`, then `AWS_SECURITY_TOKEN`
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }

    /// Read credentials from env, returns `None` unless both keys are set.
    pub fn load(&self, ctx: &Context) -> Option<Credential> {
        let access_key_id = ctx.env_var_any(&[AWS_ACCESS_KEY_ID, AWS_ACCESS_KEY]);
        let secret_access_key = ctx.env_var_any(&[AWS_SECRET_ACCESS_KEY, AWS_SECRET_KEY]);

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => {
                debug!("loaded credential from env");
                Some(Credential {
                    access_key_id: ak,
                    secret_access_key: sk,
                    session_token: ctx.env_var_any(&[AWS_SESSION_TOKEN, AWS_SECURITY_TOKEN]),
                    expires_in: None,
                })
            }
            _ => None,
        }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(self.load(ctx))
    }
}
