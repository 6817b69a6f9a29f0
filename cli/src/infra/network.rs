//! Network infrastructure — implements `AddressResolver` using `spawn_blocking`.

use std::net::IpAddr;

use anyhow::Result;

use crate::application::ports::AddressResolver;

/// Production resolver that performs a real DNS lookup through the system
/// resolver.
pub struct TokioAddressResolver;

impl AddressResolver for TokioAddressResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr> {
        // Workers are claimed over SSH once reachable, so probe port 22.
        let addr = format!("{hostname}:22");
        let host = hostname.to_string();
        tokio::task::spawn_blocking(move || {
            use std::net::ToSocketAddrs;
            addr.to_socket_addrs()
                .map_err(|e| anyhow::anyhow!("cannot resolve {host}: {e}"))?
                .next()
                .map(|sa| sa.ip())
                .ok_or_else(|| anyhow::anyhow!("no addresses for {host}"))
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}
