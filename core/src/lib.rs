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

//! Core components for authenticating requests against AWS-compatible services.
//!
//! This crate holds the pieces every service crate in the workspace shares:
//!
//! - **Context**: a container for the I/O a credential provider needs (HTTP
//!   sending and environment access), so that tests can swap in fakes.
//! - **Traits**: [`ProvideCredential`] for credential sources and
//!   [`SigningCredential`] for credential validity checks.
//! - **Primitives**: digests and keyed hashes in [`hash`], timestamps in
//!   [`time`] and secret redaction in [`utils`].
//!
//! ## Example
//!
//! ```
//! use awsauth_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("AWS_ACCESS_KEY_ID".to_string(), "ak".to_string())]),
//! });
//!
//! assert_eq!(ctx.env_var("AWS_ACCESS_KEY_ID").as_deref(), Some("ak"));
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};
