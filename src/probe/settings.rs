use std::process;
use std::time::Duration;

pub const SEQUENCE: u16       = 61455;
pub const FRAME_SIZE: usize   = 128;
pub const FILLER: &[u8]       = b"Go Go Gadget Ping!!!";
pub const EXPIRY: Duration    = Duration::from_millis(100);

// ident and seq are shared by every probe, safe only while probes are serialized
#[derive(Clone, Debug)]
pub struct Settings {
    pub ident:  u16,
    pub seq:    u16,
    pub size:   usize,
    pub filler: Vec<u8>,
    pub expiry: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ident:  process::id() as u16,
            seq:    SEQUENCE,
            size:   FRAME_SIZE,
            filler: FILLER.to_vec(),
            expiry: EXPIRY,
        }
    }
}
