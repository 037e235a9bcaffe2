use std::convert::TryFrom;
use crate::error::Failure;

#[derive(Debug)]
pub struct Echo<'a> {
    pub id:   u16,
    pub seq:  u16,
    pub data: &'a [u8]
}

impl Echo<'_> {
    pub fn key(&self) -> (u16, u16) {
        (self.id, self.seq)
    }
}

impl<'a> TryFrom<&'a [u8]> for Echo<'a> {
    type Error = Failure;

    fn try_from(slice: &'a [u8]) -> Result<Self, Self::Error> {
        match slice {
            [i0, i1, s0, s1, data @ ..] => Ok(Self {
                id:   u16::from_be_bytes([*i0, *i1]),
                seq:  u16::from_be_bytes([*s0, *s1]),
                data: data,
            }),
            _ => Err(Failure::MalformedPacket),
        }
    }
}
