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
use async_trait::async_trait;
use log::debug;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::OnceCell;

/// DetectInstance answers whether the process runs on an EC2 instance.
#[async_trait]
pub trait DetectInstance: Debug + Send + Sync + 'static {
    /// Return `true` if the instance metadata service looks reachable.
    async fn detect(&self) -> bool;
}

/// TcpDetectInstance opens a TCP connection to the metadata service and closes
/// it right away.
#[derive(Debug, Clone)]
pub struct TcpDetectInstance {
    addr: String,
    timeout: Duration,
}

impl Default for TcpDetectInstance {
    fn default() -> Self {
        Self::new(
            format!("{EC2_METADATA_HOST}:{EC2_METADATA_PORT}"),
            EC2_METADATA_PROBE_TIMEOUT,
        )
    }
}

impl TcpDetectInstance {
    /// Create a detector for `addr` in `host:port` form.
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    /// Create a detector for the host and port of a metadata endpoint url.
    ///
    /// Without an explicit port, `https` urls use 443 and everything else 80.
    /// Falls back to `169.254.169.254:80` if the url carries no host.
    pub fn from_endpoint(endpoint: &str, timeout: Duration) -> Self {
        let addr = endpoint
            .parse::<http::Uri>()
            .ok()
            .and_then(|uri| {
                let host = uri.host()?;
                let default_port = match uri.scheme_str() {
                    Some("https") => 443,
                    _ => EC2_METADATA_PORT,
                };
                let port = uri.port_u16().unwrap_or(default_port);
                Some(format!("{host}:{port}"))
            })
            .unwrap_or_else(|| format!("{EC2_METADATA_HOST}:{EC2_METADATA_PORT}"));

        Self::new(addr, timeout)
    }

    /// Address this detector connects to.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl DetectInstance for TcpDetectInstance {
    async fn detect(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_stream)) => {
                debug!("metadata service reachable at {}", self.addr);
                true
            }
            Ok(Err(err)) => {
                debug!("metadata service not reachable at {}: {err}", self.addr);
                false
            }
            Err(_) => {
                debug!(
                    "connecting to metadata service at {} timed out after {:?}",
                    self.addr, self.timeout
                );
                false
            }
        }
    }
}

/// InstanceLocation memoizes the answer of a [`DetectInstance`].
///
/// The detector runs at most once, concurrent callers wait for the same answer.
#[derive(Debug, Clone)]
pub struct InstanceLocation {
    detector: Arc<dyn DetectInstance>,
    checked: Arc<OnceCell<bool>>,
}

impl InstanceLocation {
    /// Create a new InstanceLocation over `detector`.
    pub fn new(detector: impl DetectInstance) -> Self {
        Self {
            detector: Arc::new(detector),
            checked: Arc::new(OnceCell::new()),
        }
    }

    /// Whether the process runs on an EC2 instance.
    pub async fn is_ec2(&self) -> bool {
        *self
            .checked
            .get_or_init(|| async { self.detector.detect().await })
            .await
    }

    /// The memoized answer, `None` before the first [`Self::is_ec2`].
    pub fn checked(&self) -> Option<bool> {
        self.checked.get().copied()
    }
}
