pub use echo::Echo;

pub mod echo;
pub mod icmp4;
