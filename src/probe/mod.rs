pub use dispatch::{Dispatcher, Pending, ProbeRequest};
pub use net::{Network, Socket};
pub use probe::Prober;
pub use result::{Outcome, ProbeResult};
pub use settings::Settings;
pub use sock4::{privileged, RawNetwork};

mod dispatch;
mod net;
mod probe;
mod result;
mod settings;
mod sock4;
