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
use awsauth_core::Context;
use log::debug;
use std::time::Duration;

/// Config for credential resolution.
#[derive(Clone, Debug)]
pub struct Config {
    /// `metadata_endpoint` will be loaded from:
    ///
    /// - env value: [`AWS_EC2_METADATA_SERVICE_ENDPOINT`]
    /// - default to: `http://169.254.169.254`
    ///
    /// The instance probe connects to the host and port of this endpoint.
    pub metadata_endpoint: String,
    /// `ec2_metadata_disabled` will be loaded from:
    ///
    /// - env value: [`AWS_EC2_METADATA_DISABLED`], `true` (any case) disables
    /// - default to: `false`
    pub ec2_metadata_disabled: bool,
    /// Upper bound for every request sent to the metadata service.
    ///
    /// Default to 1s.
    pub metadata_timeout: Duration,
    /// Upper bound for the TCP connect used to detect an EC2 instance.
    ///
    /// Default to 100ms.
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metadata_endpoint: EC2_METADATA_ENDPOINT.to_string(),
            ec2_metadata_disabled: false,
            metadata_timeout: EC2_METADATA_TIMEOUT,
            probe_timeout: EC2_METADATA_PROBE_TIMEOUT,
        }
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var_any(&[AWS_EC2_METADATA_SERVICE_ENDPOINT]) {
            debug!("metadata endpoint overridden by env: {v}");
            self.metadata_endpoint = v;
        }
        if let Some(v) = ctx.env_var(AWS_EC2_METADATA_DISABLED) {
            self.ec2_metadata_disabled = v.eq_ignore_ascii_case("true");
        }

        self
    }
}
