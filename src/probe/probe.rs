use std::convert::TryFrom;
use std::net::Ipv4Addr;
use anyhow::Result;
use log::{debug, warn};
use tokio::time::{timeout_at, Instant};
use crate::Failure;
use crate::icmp::icmp4::{self, ECHO_REPLY};
use super::net::{Network, Socket};
use super::result::{Outcome, ProbeResult};
use super::settings::Settings;

/// Runs one echo round trip at a time over sockets opened from `net`.
pub struct Prober<N> {
    net:      N,
    settings: Settings,
    pkt:      Vec<u8>,
}

impl<N: Network> Prober<N> {
    pub fn new(net: N, settings: Settings) -> Result<Self> {
        let Settings { ident, seq, size, ref filler, .. } = settings;
        let pkt = icmp4::encode_echo_request(ident, seq, size, filler)?;
        Ok(Self { net, settings, pkt })
    }

    /// Probe `target` once. Every failure is folded into the result.
    pub async fn run(&self, target: &str) -> ProbeResult {
        let outcome = match self.probe(target).await {
            Ok(rtt) => {
                debug!("{} replied in {} ns", target, rtt);
                Outcome::Success(rtt)
            }
            Err(f) => {
                debug!("{} probe failed: {}", target, f);
                Outcome::Failure(f)
            }
        };
        ProbeResult::new(target, outcome)
    }

    async fn probe(&self, target: &str) -> Result<u64, Failure> {
        let addr = self.net.resolve(target).await.map_err(|e| {
            warn!("resolve {} failed: {}", target, e);
            Failure::Resolution
        })?;

        let mut sock = self.net.open().await.map_err(|e| {
            warn!("raw socket open failed: {}", e);
            Failure::Socket
        })?;

        let sent = self.send(sock.as_mut(), addr).await?;
        self.recv(sock.as_mut(), addr, sent).await
    }

    async fn send(&self, sock: &mut dyn Socket, addr: Ipv4Addr) -> Result<Instant, Failure> {
        let sent = Instant::now();
        match sock.send_to(&self.pkt, addr).await {
            Ok(n) if n == self.pkt.len() => Ok(sent),
            Ok(n) => {
                warn!("short write to {}: {} of {} bytes", addr, n, self.pkt.len());
                Err(Failure::Send)
            }
            Err(e) => {
                warn!("send to {} failed: {}", addr, e);
                Err(Failure::Send)
            }
        }
    }

    async fn recv(&self, sock: &mut dyn Socket, addr: Ipv4Addr, sent: Instant) -> Result<u64, Failure> {
        let Settings { ident, seq, expiry, .. } = self.settings;
        let deadline = sent + expiry;
        let mut pkt = [0u8; 1024];

        loop {
            let n = match timeout_at(deadline, sock.recv(&mut pkt)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    debug!("recv from {} failed: {}", addr, e);
                    return Err(Failure::Timeout);
                }
                Err(_) => {
                    debug!("no reply from {} within {:?}", addr, expiry);
                    return Err(Failure::Timeout);
                }
            };

            if n > 0 && pkt[0] != ECHO_REPLY {
                continue;
            }

            let (_, echo) = icmp4::decode_echo_reply(&pkt[..n]).map_err(|f| {
                warn!("{} byte reply from {}: {}", n, addr, f);
                f
            })?;

            let rtt = sent.elapsed();

            if echo.key() != (ident, seq) {
                let (id, sq) = echo.key();
                warn!("reply saw id,seq={:#x},{:#x} (expected {:#x},{:#x})", id, sq, ident, seq);
                return Err(Failure::ProtocolMismatch);
            }

            return Ok(u64::try_from(rtt.as_nanos()).unwrap_or(u64::MAX));
        }
    }
}
