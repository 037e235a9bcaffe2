#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::sleep;
use echoprobe::{Network, Socket};
use echoprobe::icmp::icmp4::{checksum, ECHO_REPLY};

/// Maps an outgoing request to the frames the fake peer answers with,
/// each delivered after its delay.
pub type Responder = dyn Fn(Ipv4Addr, &[u8]) -> Vec<(Duration, Vec<u8>)> + Send + Sync;

#[derive(Default)]
pub struct Stats {
    pub resolved: Vec<String>,
    pub opens:    usize,
    pub live:     usize,
    pub max_live: usize,
    pub sent:     Vec<(Ipv4Addr, Vec<u8>)>,
}

#[derive(Clone)]
pub struct FakeNetwork {
    hosts:      HashMap<String, Ipv4Addr>,
    responder:  Arc<Responder>,
    deny_open:  bool,
    short_send: bool,
    send_err:   bool,
    recv_err:   bool,
    stats:      Arc<Mutex<Stats>>,
}

struct FakeSocket {
    responder:  Arc<Responder>,
    short_send: bool,
    send_err:   bool,
    recv_err:   bool,
    inbound:    VecDeque<(Duration, Vec<u8>)>,
    stats:      Arc<Mutex<Stats>>,
}

impl FakeNetwork {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(Ipv4Addr, &[u8]) -> Vec<(Duration, Vec<u8>)> + Send + Sync + 'static,
    {
        Self {
            hosts:      HashMap::new(),
            responder:  Arc::new(responder),
            deny_open:  false,
            short_send: false,
            send_err:   false,
            recv_err:   false,
            stats:      Default::default(),
        }
    }

    pub fn silent() -> Self {
        Self::new(|_, _| Vec::new())
    }

    pub fn echo(delay: Duration) -> Self {
        Self::new(move |_, pkt| vec![(delay, reply_to(pkt))])
    }

    pub fn host(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.hosts.insert(name.to_owned(), addr);
        self
    }

    pub fn deny_open(mut self) -> Self {
        self.deny_open = true;
        self
    }

    pub fn short_send(mut self) -> Self {
        self.short_send = true;
        self
    }

    pub fn send_err(mut self) -> Self {
        self.send_err = true;
        self
    }

    pub fn recv_err(mut self) -> Self {
        self.recv_err = true;
        self
    }

    pub fn stats(&self) -> Arc<Mutex<Stats>> {
        self.stats.clone()
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn resolve(&self, target: &str) -> Result<Ipv4Addr> {
        self.stats.lock().resolved.push(target.to_owned());
        match target.parse() {
            Ok(addr) => Ok(addr),
            Err(_)   => self.hosts.get(target).copied().ok_or_else(|| anyhow!("unknown host {}", target)),
        }
    }

    async fn open(&self) -> Result<Box<dyn Socket>> {
        if self.deny_open {
            return Err(anyhow!("operation not permitted"));
        }

        {
            let mut stats = self.stats.lock();
            stats.opens += 1;
            stats.live  += 1;
            stats.max_live = stats.max_live.max(stats.live);
        }

        Ok(Box::new(FakeSocket {
            responder:  self.responder.clone(),
            short_send: self.short_send,
            send_err:   self.send_err,
            recv_err:   self.recv_err,
            inbound:    VecDeque::new(),
            stats:      self.stats.clone(),
        }))
    }
}

#[async_trait]
impl Socket for FakeSocket {
    async fn send_to(&mut self, pkt: &[u8], addr: Ipv4Addr) -> Result<usize> {
        if self.send_err {
            return Err(anyhow!("network is unreachable"));
        }
        self.stats.lock().sent.push((addr, pkt.to_vec()));
        self.inbound.extend((self.responder)(addr, pkt));
        match self.short_send {
            true  => Ok(pkt.len() - 1),
            false => Ok(pkt.len()),
        }
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.recv_err {
            return Err(anyhow!("connection refused"));
        }
        match self.inbound.pop_front() {
            Some((delay, frame)) => {
                sleep(delay).await;
                let n = frame.len().min(buf.len());
                buf[..n].copy_from_slice(&frame[..n]);
                Ok(n)
            }
            None => futures::future::pending().await,
        }
    }
}

impl Drop for FakeSocket {
    fn drop(&mut self) {
        self.stats.lock().live -= 1;
    }
}

/// The reply a well behaved peer sends for `request`.
pub fn reply_to(request: &[u8]) -> Vec<u8> {
    let mut pkt = request.to_vec();
    pkt[0] = ECHO_REPLY;
    reseal(&mut pkt);
    pkt
}

/// A reply carrying different correlation fields than `request`.
pub fn reply_with(request: &[u8], id: u16, seq: u16) -> Vec<u8> {
    let mut pkt = reply_to(request);
    pkt[4..6].copy_from_slice(&id.to_be_bytes());
    pkt[6..8].copy_from_slice(&seq.to_be_bytes());
    reseal(&mut pkt);
    pkt
}

fn reseal(pkt: &mut [u8]) {
    pkt[2] = 0;
    pkt[3] = 0;
    let cksum = checksum(pkt);
    pkt[2] = cksum as u8;
    pkt[3] = (cksum >> 8) as u8;
}
