use std::net::Ipv4Addr;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Network: Send + Sync {
    async fn resolve(&self, target: &str) -> Result<Ipv4Addr>;

    async fn open(&self) -> Result<Box<dyn Socket>>;
}

/// `recv` yields ICMP frames with the IP header stripped.
#[async_trait]
pub trait Socket: Send {
    async fn send_to(&mut self, pkt: &[u8], addr: Ipv4Addr) -> Result<usize>;

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;
}
