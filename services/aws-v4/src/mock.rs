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

//! In-memory metadata service for unit tests.

use crate::constants::EC2_SECURITY_CREDENTIALS_PATH;
use async_trait::async_trait;
use awsauth_core::time::{format_rfc3339, DateTime};
use awsauth_core::{HttpSend, Result};
use bytes::Bytes;
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Serves role listings and role credentials, counting every call.
#[derive(Debug, Clone)]
pub struct MockMetadataService {
    status: Arc<Mutex<StatusCode>>,
    roles: Arc<Mutex<String>>,
    credentials: Arc<Mutex<String>>,
    paths: Arc<Mutex<Vec<String>>>,
    list_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockMetadataService {
    pub fn new(roles: &str, credentials: impl Into<String>) -> Self {
        Self {
            status: Arc::new(Mutex::new(StatusCode::OK)),
            roles: Arc::new(Mutex::new(roles.to_string())),
            credentials: Arc::new(Mutex::new(credentials.into())),
            paths: Arc::default(),
            list_calls: Arc::default(),
            fetch_calls: Arc::default(),
        }
    }

    pub fn set_status(&self, status: StatusCode) {
        *self.status.lock().expect("lock poisoned") = status;
    }

    pub fn set_credentials(&self, credentials: impl Into<String>) {
        *self.credentials.lock().expect("lock poisoned") = credentials.into();
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("lock poisoned").clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpSend for MockMetadataService {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let path = req.uri().path().to_string();
        self.paths.lock().expect("lock poisoned").push(path.clone());

        let body = if path == EC2_SECURITY_CREDENTIALS_PATH {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.roles.lock().expect("lock poisoned").clone()
        } else if path.starts_with(EC2_SECURITY_CREDENTIALS_PATH) {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.credentials.lock().expect("lock poisoned").clone()
        } else {
            return Ok(http::Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Bytes::new())?);
        };

        let status = *self.status.lock().expect("lock poisoned");
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))?)
    }
}

/// Render a role credentials document the way the metadata service does.
pub fn credentials_json(ak: &str, sk: &str, token: &str, expiration: DateTime) -> String {
    serde_json::json!({
        "Code": "Success",
        "LastUpdated": "2012-04-26T16:39:16Z",
        "Type": "AWS-HMAC",
        "AccessKeyId": ak,
        "SecretAccessKey": sk,
        "Token": token,
        "Expiration": format_rfc3339(expiration),
    })
    .to_string()
}
