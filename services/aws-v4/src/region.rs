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

use crate::constants::{DEFAULT_REGION, DEFAULT_SERVICE};

/// Guess the service and region a request targets from its hostname.
///
/// Falls back to `s3` in `us-east-1` when the hostname doesn't tell.
///
/// ```
/// use awsauth_aws_v4::service_and_region;
///
/// assert_eq!(
///     service_and_region("sqs.eu-west-1.amazonaws.com"),
///     ("sqs".to_string(), "eu-west-1".to_string())
/// );
/// ```
pub fn service_and_region(host: &str) -> (String, String) {
    let mut service = DEFAULT_SERVICE;
    let mut region = DEFAULT_REGION;

    let labels: Vec<&str> = host.split('.').collect();
    match labels.as_slice() {
        // service.region.amazonaws.com or virtual-host.region.amazonaws.com
        [first, second, _, _] => {
            if *second == "s3" {
                service = "s3";
            } else if let Some(r) = second.strip_prefix("s3-") {
                region = r;
            } else {
                service = *first;
                region = *second;
            }
        }
        [_, second, third, _, _] => {
            service = *third;
            region = *second;
        }
        // service.amazonaws.com or s3-region.amazonaws.com
        [first, ..] => {
            if let Some(r) = first.strip_prefix("s3-") {
                region = r;
            } else {
                service = *first;
            }
        }
        [] => {}
    }

    if region == "external-1" {
        region = DEFAULT_REGION;
    }

    (service.to_string(), region.to_string())
}
