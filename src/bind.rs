use std::net::*;

/// Local address raw sockets are bound to; the wildcard address unless set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bind {
    sa4: Option<SocketAddrV4>,
}

impl Bind {
    pub fn sa4(&self) -> SocketAddr {
        SocketAddr::V4(self.sa4.unwrap_or_else(|| {
            let addr = Ipv4Addr::UNSPECIFIED;
            let port = 0;
            SocketAddrV4::new(addr, port)
        }))
    }

    pub fn set(&mut self, addr: Ipv4Addr) {
        self.sa4 = Some(SocketAddrV4::new(addr, 0));
    }
}
