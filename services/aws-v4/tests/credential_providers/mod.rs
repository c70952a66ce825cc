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

mod env;
mod imds;
mod resolver;

use awsauth_core::time::{format_rfc3339, DateTime};
use awsauth_core::{Context, OsEnv, StaticEnv};
use awsauth_http_send_reqwest::ReqwestHttpSend;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const SECURITY_CREDENTIALS_PATH: &str = "/latest/meta-data/iam/security-credentials/";

pub fn create_test_context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

pub fn create_static_context(envs: &[(&str, &str)]) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
}

pub fn credentials_json(ak: &str, sk: &str, token: &str, expiration: DateTime) -> String {
    serde_json::json!({
        "Code": "Success",
        "Type": "AWS-HMAC",
        "AccessKeyId": ak,
        "SecretAccessKey": sk,
        "Token": token,
        "Expiration": format_rfc3339(expiration),
    })
    .to_string()
}

/// A metadata service on a local port, one request per connection.
pub struct MetadataServer {
    pub endpoint: String,
    list_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MetadataServer {
    pub async fn start(roles: &str, credentials: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind must succeed");
        let endpoint = format!(
            "http://{}",
            listener.local_addr().expect("local addr must exist")
        );

        let server = Self {
            endpoint,
            list_calls: Arc::default(),
            fetch_calls: Arc::default(),
        };

        let roles = roles.to_string();
        let list_calls = server.list_calls.clone();
        let fetch_calls = server.fetch_calls.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let roles = roles.clone();
                let credentials = credentials.clone();
                let list_calls = list_calls.clone();
                let fetch_calls = fetch_calls.clone();
                tokio::spawn(async move {
                    let Some(path) = read_request_path(&mut stream).await else {
                        // Probe connections close without sending anything.
                        return;
                    };
                    let (status, body) = if path == SECURITY_CREDENTIALS_PATH {
                        list_calls.fetch_add(1, Ordering::SeqCst);
                        ("200 OK", roles)
                    } else if path.starts_with(SECURITY_CREDENTIALS_PATH) {
                        fetch_calls.fetch_add(1, Ordering::SeqCst);
                        ("200 OK", credentials)
                    } else {
                        ("404 Not Found", String::new())
                    };
                    write_response(stream, status, &body).await;
                });
            }
        });

        server
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

async fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .next()?
        .split_whitespace()
        .nth(1)
        .map(String::from)
}

async fn write_response(mut stream: TcpStream, status: &str, body: &str) {
    let resp = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(resp.as_bytes()).await;
    let _ = stream.shutdown().await;
}
