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

//! Signing key derivation for [AWS SigV4](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#derive-signing-key).

use awsauth_core::hash::hmac_sha256;
use awsauth_core::time::{format_date, DateTime};

/// Derive the SigV4 signing key for `secret` scoped to `time`'s date,
/// `region` and `service`.
///
/// ```
/// use awsauth_aws_v4::generate_signing_key;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2012, 2, 15, 0, 0, 0).unwrap();
/// let key = generate_signing_key(
///     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
///     time,
///     "us-east-1",
///     "iam",
/// );
/// assert_eq!(key.len(), 32);
/// ```
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    let date = format_date(time);
    let seed = format!("AWS4{secret}").into_bytes();

    [date.as_str(), region, service, "aws4_request"]
        .iter()
        .fold(seed, |key, scope| hmac_sha256(&key, scope.as_bytes()))
}
