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

//! Canonical forms of request components.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request)

use crate::constants::AWS_URI_ENCODE_SET;
use awsauth_core::Result;
use bytes::Bytes;
use http::uri::PathAndQuery;
use http::Uri;
use http_body::Body;
use http_body_util::BodyExt;
use log::warn;
use percent_encoding::{percent_decode_str, percent_encode};
use std::borrow::Cow;
use std::fmt::Display;
use std::mem;
use std::str::FromStr;

/// Normalize a uri path into its canonical form.
///
/// The path is split on `/` and every segment is encoded on its own, so
/// separators are never escaped. Each segment is percent-decoded first, which
/// keeps already canonical input stable:
///
/// ```
/// use awsauth_aws_v4::normalize_path;
///
/// assert_eq!(normalize_path("/a b/c"), "/a%20b/c");
/// assert_eq!(normalize_path("/a%20b/c"), "/a%20b/c");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let raw: Cow<[u8]> = percent_decode_str(segment).into();
            percent_encode(&raw, &AWS_URI_ENCODE_SET).to_string()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Encode query parameters into the canonical query string.
///
/// Parameters are sorted by key. The sort is stable, so repeated keys keep the
/// order they were given in. Keys and values are encoded with the unreserved
/// set: a space becomes `%20` and a literal `+` becomes `%2B`.
///
/// ```
/// use awsauth_aws_v4::normalize_query;
///
/// assert_eq!(
///     normalize_query([("b", "x+y"), ("a", "x y")]),
///     "a=x%20y&b=x%2By"
/// );
/// ```
pub fn normalize_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params: Vec<(K, V)> = params.into_iter().collect();
    params.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                percent_encode(k.as_ref().as_bytes(), &AWS_URI_ENCODE_SET),
                percent_encode(v.as_ref().as_bytes(), &AWS_URI_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Merge `params` into the query string of `req`.
///
/// Parameters already present on the request url are kept unless `params`
/// carries the same key, in which case every value of that key comes from
/// `params`. The merged set is written back through [`normalize_query`].
///
/// This lets a presigner inject `X-Amz-*` parameters without dropping the
/// ones the caller already set.
pub fn merge_query_into_request<B, I, K, V>(req: &mut http::Request<B>, params: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let supplied: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let mut merged: Vec<(String, String)> = req
        .uri()
        .query()
        .map(|query| {
            form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .filter(|(k, _)| !supplied.iter().any(|(key, _)| key == k))
                .collect()
        })
        .unwrap_or_default();
    merged.extend(supplied);

    let query = normalize_query(merged);
    let mut parts = req.uri().clone().into_parts();
    let path = parts
        .path_and_query
        .as_ref()
        .map(|paq| paq.path())
        .unwrap_or("/");
    let paq = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);

    *req.uri_mut() = Uri::from_parts(parts)?;
    Ok(())
}

/// Read the whole body of `req` and put a replayable copy back.
///
/// The returned bytes are what the request will transmit when it is sent
/// later. Capturing again returns the same bytes. A body that fails to read is
/// treated as empty.
pub async fn capture_body<B>(req: &mut http::Request<B>) -> Bytes
where
    B: Body + From<Bytes>,
    B::Error: Display,
{
    let body = mem::replace(req.body_mut(), B::from(Bytes::new()));
    let payload = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            warn!("failed to read request body, treat it as empty: {err}");
            Bytes::new()
        }
    };

    *req.body_mut() = B::from(payload.clone());
    payload
}
