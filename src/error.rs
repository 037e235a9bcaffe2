use std::error::Error;
use std::fmt;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Failure {
    Resolution,
    Socket,
    Send,
    Timeout,
    ProtocolMismatch,
    MalformedPacket,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Failure::Resolution       => "resolution failed",
            Failure::Socket           => "raw socket unavailable",
            Failure::Send             => "send failed",
            Failure::Timeout          => "timed out",
            Failure::ProtocolMismatch => "reply correlation mismatch",
            Failure::MalformedPacket  => "malformed packet",
        };
        f.write_str(s)
    }
}

impl Error for Failure {}
