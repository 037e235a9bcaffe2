use std::net::Ipv4Addr;
use std::time::Duration;
use anyhow::Result;
use gumdrop::Options;
use echoprobe::{Bind, Dispatcher, Outcome, ProbeRequest, RawNetwork, Settings};

#[derive(Debug, Options)]
pub struct Args {
    #[options()]                help:   bool,
    #[options(default = "100")] expiry: u64,
    #[options()]                bind:   Option<Ipv4Addr>,
    #[options(free, required)]  hosts:  Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args_default_or_exit();
    let Args { expiry, bind, hosts, .. } = args;

    env_logger::init();

    let mut src = Bind::default();
    if let Some(addr) = bind {
        src.set(addr);
    }

    let settings = Settings {
        expiry: Duration::from_millis(expiry),
        ..Default::default()
    };

    let dispatcher = Dispatcher::new(RawNetwork::new(&src), settings)?;

    let mut pending = Vec::new();
    for host in &hosts {
        let (request, rx) = ProbeRequest::new(host);
        dispatcher.submit(request)?;
        pending.push(rx);
    }

    for rx in pending {
        let target = rx.target().to_owned();
        match rx.await?.outcome {
            Outcome::Success(n) => println!("{} RTT {:0.2?}", target, Duration::from_nanos(n)),
            Outcome::Failure(f) => println!("{} {}", target, f),
        }
    }

    Ok(())
}
