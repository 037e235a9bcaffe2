use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use anyhow::{anyhow, Result};
use futures::ready;
use log::{debug, info};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot::{channel, error::RecvError, Receiver, Sender};
use super::net::Network;
use super::probe::Prober;
use super::result::ProbeResult;
use super::settings::Settings;

#[derive(Debug)]
pub struct ProbeRequest {
    pub target: String,
    sink:       Sender<ProbeResult>,
}

#[derive(Debug)]
pub struct Pending {
    target: String,
    rx:     Receiver<ProbeResult>,
}

/// Cloneable handle to the single worker that runs probes in arrival
/// order. Throughput is bounded by probe duration.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: UnboundedSender<ProbeRequest>,
}

impl ProbeRequest {
    pub fn new(target: &str) -> (Self, Pending) {
        let (tx, rx) = channel();
        let target  = target.to_owned();
        let request = Self { target: target.clone(), sink: tx };
        (request, Pending { target, rx })
    }
}

impl Pending {
    pub fn target(&self) -> &str {
        &self.target
    }

    // must not be called from within the runtime
    pub fn wait(self) -> Result<ProbeResult, RecvError> {
        self.rx.blocking_recv()
    }
}

impl Future for Pending {
    type Output = Result<ProbeResult, RecvError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.rx).poll(cx)) {
            Ok(result) => Poll::Ready(Ok(result)),
            Err(e)     => Poll::Ready(Err(e)),
        }
    }
}

impl Dispatcher {
    pub fn new<N: Network + 'static>(net: N, settings: Settings) -> Result<Self> {
        let prober = Prober::new(net, settings)?;
        let (tx, rx) = unbounded_channel();

        tokio::spawn(async move {
            serve(prober, rx).await;
            debug!("dispatcher finished");
        });

        Ok(Self { tx })
    }

    pub fn submit(&self, request: ProbeRequest) -> Result<()> {
        self.tx.send(request).map_err(|e| {
            anyhow!("dispatcher stopped before {} was queued", e.0.target)
        })
    }

    pub async fn probe(&self, target: &str) -> Result<ProbeResult> {
        let (request, pending) = ProbeRequest::new(target);
        self.submit(request)?;
        Ok(pending.await?)
    }

    pub fn blocking_probe(&self, target: &str) -> Result<ProbeResult> {
        let (request, pending) = ProbeRequest::new(target);
        self.submit(request)?;
        Ok(pending.wait()?)
    }
}

async fn serve<N: Network>(prober: Prober<N>, mut rx: UnboundedReceiver<ProbeRequest>) {
    while let Some(ProbeRequest { target, sink }) = rx.recv().await {
        info!("received request for {}", target);

        let result = prober.run(&target).await;

        if let Err(result) = sink.send(result) {
            debug!("caller for {} went away, dropping result", result.target);
        }
    }
}
