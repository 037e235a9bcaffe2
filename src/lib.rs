#![allow(clippy::module_inception, clippy::redundant_field_names)]

pub use bind::Bind;
pub use error::Failure;

pub use probe::Dispatcher;
pub use probe::Network;
pub use probe::Outcome;
pub use probe::Pending;
pub use probe::ProbeRequest;
pub use probe::ProbeResult;
pub use probe::Prober;
pub use probe::RawNetwork;
pub use probe::Settings;
pub use probe::Socket;

pub mod icmp;
pub mod probe;

mod bind;
mod error;
