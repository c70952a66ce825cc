//! Example resolving a credential and preparing a request for signing.
//!
//! Run with `RUST_LOG=debug` to follow the resolution path.

use awsauth_aws_v4::{
    capture_body, hex_sha256, normalize_path, service_and_region, Config, CredentialResolver,
};
use awsauth_core::{Context, OsEnv};
use awsauth_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use http_body_util::Full;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let resolver = CredentialResolver::new(Config::default().from_env(&ctx));

    let cred = resolver.resolve(&ctx, None).await;
    if cred.is_usable() {
        println!("Resolved credential: {cred:?}");
    } else {
        let in_cloud = resolver.is_running_in_cloud().await;
        println!("No credential resolved, running in cloud: {in_cloud}");
    }

    let mut req = http::Request::put("https://my-bucket.s3-eu-west-1.amazonaws.com/photos/a+b.jpg")
        .body(Full::new(Bytes::from_static(b"not really a photo")))?;
    let host = req.uri().host().unwrap_or_default().to_string();
    let (service, region) = service_and_region(&host);
    let payload = capture_body(&mut req).await;

    println!("service: {service}, region: {region}");
    println!("canonical path: {}", normalize_path(req.uri().path()));
    println!("payload hash: {}", hex_sha256(&payload));

    Ok(())
}
