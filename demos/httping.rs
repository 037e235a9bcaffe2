use std::net::SocketAddr;
use anyhow::{anyhow, Result};
use gumdrop::Options;
use log::{error, info};
use warp::Filter;
use warp::path::Tail;
use echoprobe::{Bind, Dispatcher, RawNetwork, Settings};
use echoprobe::probe::privileged;

#[derive(Debug, Options)]
pub struct Args {
    #[options()]                         help:   bool,
    #[options(default = "0.0.0.0:8081")] listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args_default_or_exit();
    let Args { listen, .. } = args;

    env_logger::init();

    if !privileged() {
        return Err(anyhow!("must be root to open raw sockets"));
    }

    let bind       = Bind::default();
    let dispatcher = Dispatcher::new(RawNetwork::new(&bind), Settings::default())?;

    let route = warp::get().and(warp::path::tail()).then(move |tail: Tail| {
        let dispatcher = dispatcher.clone();
        async move {
            let target = tail.as_str().to_owned();
            match dispatcher.probe(&target).await {
                Ok(result) => {
                    if let Some(f) = result.failure() {
                        info!("{}: {}", target, f);
                    }
                    format!("{}\n", result)
                }
                Err(e) => {
                    error!("{}: {}", target, e);
                    "response took -1 nanoseconds.\n".to_owned()
                }
            }
        }
    });

    info!("listening on {}", listen);
    warp::serve(route).run(listen).await;

    Ok(())
}
