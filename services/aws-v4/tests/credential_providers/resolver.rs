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

use super::{create_static_context, credentials_json, MetadataServer};
use awsauth_aws_v4::{
    Config, Credential, CredentialResolver, AWS_ACCESS_KEY_ID, AWS_EC2_METADATA_SERVICE_ENDPOINT,
    AWS_SECRET_ACCESS_KEY,
};
use awsauth_core::time::now;
use chrono::TimeDelta;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_resolver_from_metadata_service() {
    let expiration = now() + TimeDelta::try_hours(6).expect("in bounds");
    let server = MetadataServer::start(
        "ec2-role",
        credentials_json("ASIAEXAMPLE", "secret", "token", expiration),
    )
    .await;
    let ctx = create_static_context(&[(
        AWS_EC2_METADATA_SERVICE_ENDPOINT,
        server.endpoint.as_str(),
    )]);
    let resolver = CredentialResolver::new(Config::default().from_env(&ctx));

    assert!(resolver.is_running_in_cloud().await);

    let cred = resolver.resolve(&ctx, None).await;
    assert_eq!(cred.access_key_id, "ASIAEXAMPLE");
    assert_eq!(cred.secret_access_key, "secret");

    let cached = resolver.resolve(&ctx, None).await;
    assert_eq!(cached, cred);
    assert_eq!(server.list_calls(), 1);
    assert_eq!(server.fetch_calls(), 1);
}

#[tokio::test]
async fn test_resolver_prefers_env() {
    let server = MetadataServer::start("ec2-role", String::new()).await;
    let ctx = create_static_context(&[
        (AWS_ACCESS_KEY_ID, "env_ak"),
        (AWS_SECRET_ACCESS_KEY, "env_sk"),
        (AWS_EC2_METADATA_SERVICE_ENDPOINT, server.endpoint.as_str()),
    ]);
    let resolver = CredentialResolver::new(Config::default().from_env(&ctx));

    let cred = resolver.resolve(&ctx, None).await;
    assert_eq!(cred.access_key_id, "env_ak");
    assert_eq!(server.list_calls(), 0);
}

#[tokio::test]
async fn test_resolver_outside_cloud() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind must succeed")
        .local_addr()
        .expect("local addr must exist");
    let ctx = create_static_context(&[]);
    let resolver = CredentialResolver::new(Config {
        metadata_endpoint: format!("http://{addr}"),
        probe_timeout: Duration::from_millis(100),
        ..Default::default()
    });

    assert_eq!(resolver.resolve(&ctx, None).await, Credential::default());
    assert!(!resolver.is_running_in_cloud().await);
}
