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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use std::time::Duration;

// Env values used to resolve credentials.
/// Env name of the access key id.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Legacy env name of the access key id.
pub const AWS_ACCESS_KEY: &str = "AWS_ACCESS_KEY";
/// Env name of the secret access key.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Legacy env name of the secret access key.
pub const AWS_SECRET_KEY: &str = "AWS_SECRET_KEY";
/// Env name of the session token.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
/// Legacy env name of the session token.
pub const AWS_SECURITY_TOKEN: &str = "AWS_SECURITY_TOKEN";
/// Set to `true` to never talk to the instance metadata service.
pub const AWS_EC2_METADATA_DISABLED: &str = "AWS_EC2_METADATA_DISABLED";
/// Overrides the instance metadata service endpoint.
pub const AWS_EC2_METADATA_SERVICE_ENDPOINT: &str = "AWS_EC2_METADATA_SERVICE_ENDPOINT";

// EC2 instance metadata service.
pub const EC2_METADATA_ENDPOINT: &str = "http://169.254.169.254";
pub const EC2_METADATA_HOST: &str = "169.254.169.254";
pub const EC2_METADATA_PORT: u16 = 80;
pub const EC2_SECURITY_CREDENTIALS_PATH: &str = "/latest/meta-data/iam/security-credentials/";
pub const EC2_METADATA_PROBE_TIMEOUT: Duration = Duration::from_millis(100);
pub const EC2_METADATA_TIMEOUT: Duration = Duration::from_secs(1);

// Fallbacks when a hostname says nothing about where it points.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SERVICE: &str = "s3";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
