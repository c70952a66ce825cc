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

//! Credential resolution and canonicalization primitives for AWS SigV4.
//!
//! ## Example
//!
//! ```no_run
//! use awsauth_aws_v4::{Config, CredentialResolver};
//! use awsauth_core::{Context, OsEnv};
//! use awsauth_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!     let resolver = CredentialResolver::new(Config::default().from_env(&ctx));
//!
//!     let cred = resolver.resolve(&ctx, None).await;
//!     if !cred.is_usable() {
//!         eprintln!("no credential resolved");
//!     }
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod canonical;
pub use canonical::{capture_body, merge_query_into_request, normalize_path, normalize_query};

mod provide_credential;
pub use provide_credential::*;

mod region;
pub use region::service_and_region;

mod resolve;
pub use resolve::CredentialResolver;

mod signing_key;
pub use signing_key::generate_signing_key;

mod constants;
pub use constants::{
    AWS_ACCESS_KEY, AWS_ACCESS_KEY_ID, AWS_EC2_METADATA_DISABLED,
    AWS_EC2_METADATA_SERVICE_ENDPOINT, AWS_SECRET_ACCESS_KEY, AWS_SECRET_KEY,
    AWS_SECURITY_TOKEN, AWS_SESSION_TOKEN, AWS_URI_ENCODE_SET,
};

#[cfg(test)]
mod mock;

pub use awsauth_core::hash::{base64_md5, hex_sha256, hmac_sha1, hmac_sha256};
