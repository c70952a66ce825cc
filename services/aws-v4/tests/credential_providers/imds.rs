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

use super::{create_static_context, create_test_context, credentials_json, MetadataServer};
use awsauth_aws_v4::IMDSCredentialProvider;
use awsauth_core::time::now;
use awsauth_core::ProvideCredential;
use chrono::TimeDelta;
use log::info;
use std::env;

#[tokio::test]
async fn test_imds_credential_provider() {
    if env::var("AWSAUTH_TEST_IMDS").unwrap_or_default() != "on" {
        info!("AWSAUTH_TEST_IMDS not set, skipping");
        return;
    }

    let ctx = create_test_context();
    let provider = IMDSCredentialProvider::new();

    let roles = provider.list_roles(&ctx).await;
    assert!(!roles.is_empty(), "instance must have a role attached");

    let cred = provider
        .provide_credential(&ctx)
        .await
        .expect("IMDSCredentialProvider should succeed on EC2")
        .expect("should load credentials from EC2 instance metadata");
    assert!(!cred.access_key_id.is_empty());
    assert!(!cred.secret_access_key.is_empty());
    assert!(
        cred.session_token.is_some(),
        "IMDS should return session token"
    );
    assert!(cred.expires_in.is_some());
}

#[tokio::test]
async fn test_imds_credential_provider_over_http() {
    let expiration = now() + TimeDelta::try_hours(6).expect("in bounds");
    let server = MetadataServer::start(
        "ec2-role\nother-role\n",
        credentials_json("ASIAEXAMPLE", "secret", "token", expiration),
    )
    .await;
    let ctx = create_static_context(&[]);
    let provider = IMDSCredentialProvider::new().with_endpoint(&server.endpoint);

    assert_eq!(
        provider.list_roles(&ctx).await,
        vec!["ec2-role".to_string(), "other-role".to_string()]
    );

    let cred = provider.fetch_role_credentials(&ctx).await;
    assert_eq!(cred.access_key_id, "ASIAEXAMPLE");
    assert_eq!(cred.session_token.as_deref(), Some("token"));
    assert_eq!(server.list_calls(), 2);
    assert_eq!(server.fetch_calls(), 1);
}
