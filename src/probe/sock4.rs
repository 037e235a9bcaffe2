use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use etherparse::{IpTrafficClass, Ipv4Header};
use log::{debug, warn};
use raw_socket::{Domain, Type, Protocol};
use raw_socket::tokio::RawSocket;
use tokio::net::lookup_host;
use crate::Bind;
use super::net::{Network, Socket};

/// Host resolver and raw ICMPv4 sockets bound to a local address.
#[derive(Clone, Debug, Default)]
pub struct RawNetwork {
    bind: Bind,
}

struct Sock4 {
    sock: RawSocket,
    pkt:  [u8; 2048],
}

impl RawNetwork {
    pub fn new(bind: &Bind) -> Self {
        Self { bind: bind.clone() }
    }
}

#[async_trait]
impl Network for RawNetwork {
    async fn resolve(&self, target: &str) -> Result<Ipv4Addr> {
        if let Ok(addr) = target.parse() {
            return Ok(addr);
        }

        let addr = format!("{}:0", target);
        let ip = lookup_host(&addr).await?.find_map(|sa| match sa.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_)  => None,
        }).ok_or_else(|| anyhow!("no IPv4 address for {}", target));
        ip
    }

    async fn open(&self) -> Result<Box<dyn Socket>> {
        let raw   = Type::raw();
        let icmp4 = Protocol::icmpv4();

        let sock = RawSocket::new(Domain::ipv4(), raw, Some(icmp4)).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied && !privileged() {
                warn!("raw ICMP sockets require root");
            }
            e
        })?;
        sock.bind(self.bind.sa4()).await?;

        debug!("opened raw socket on {}", self.bind.sa4());

        Ok(Box::new(Sock4 { sock, pkt: [0u8; 2048] }))
    }
}

#[async_trait]
impl Socket for Sock4 {
    async fn send_to(&mut self, pkt: &[u8], addr: Ipv4Addr) -> Result<usize> {
        let addr = SocketAddr::new(IpAddr::V4(addr), 0);
        Ok(self.sock.send_to(pkt, &addr).await?)
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            let (n, _) = self.sock.recv_from(&mut self.pkt).await?;

            if let (Ipv4Header { protocol: ICMP4, .. }, tail) = Ipv4Header::read_from_slice(&self.pkt[..n])? {
                let n = tail.len().min(buf.len());
                buf[..n].copy_from_slice(&tail[..n]);
                return Ok(n);
            }
        }
    }
}

/// True when the effective user can open raw sockets without capabilities.
pub fn privileged() -> bool {
    unsafe { libc::geteuid() == 0 }
}

const ICMP4: u8 = IpTrafficClass::Icmp as u8;
