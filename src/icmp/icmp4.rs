use std::convert::TryFrom;
use anyhow::{anyhow, Result};
use crate::error::Failure;
use super::echo::Echo;

pub const HEADER_SIZE: usize = 8;

pub const ECHO_REPLY:   u8 = 0;
pub const ECHO_REQUEST: u8 = 8;

/// Build an Echo-Request frame of exactly `len` bytes with the payload
/// filled by repeating `filler`.
pub fn encode_echo_request(id: u16, seq: u16, len: usize, filler: &[u8]) -> Result<Vec<u8>> {
    if len < HEADER_SIZE {
        return Err(anyhow!("frame length {} shorter than header", len));
    }

    if filler.is_empty() {
        return Err(anyhow!("empty payload filler"));
    }

    let mut pkt = vec![0u8; len];

    pkt[0..2].copy_from_slice(&[ECHO_REQUEST, 0]);
    pkt[2..4].copy_from_slice(&0u16.to_be_bytes());
    pkt[4..6].copy_from_slice(&id.to_be_bytes());
    pkt[6..8].copy_from_slice(&seq.to_be_bytes());

    for (b, f) in pkt[HEADER_SIZE..].iter_mut().zip(filler.iter().cycle()) {
        *b = *f;
    }

    // xor rather than assign so stale checksum bytes cancel out
    let cksum = checksum(&pkt);
    pkt[2] ^= cksum as u8;
    pkt[3] ^= (cksum >> 8) as u8;

    Ok(pkt)
}

pub fn decode_echo_reply(pkt: &[u8]) -> Result<(u8, Echo<'_>), Failure> {
    if pkt.len() < HEADER_SIZE {
        return Err(Failure::MalformedPacket);
    }
    Ok((pkt[0], Echo::try_from(&pkt[4..])?))
}

// words are paired low byte first; zero for a frame with a valid checksum
pub fn checksum(pkt: &[u8]) -> u16 {
    let mut sum = 0u32;

    for chunk in pkt.chunks(2) {
        let word = match chunk {
            [x, y] => u16::from_le_bytes([*x, *y]),
            [x]    => u16::from_le_bytes([*x, 0]),
            _      => unreachable!(),
        } as u32;
        sum = sum.wrapping_add(word);
    }

    sum = (sum >> 16) + (sum & 0xffff);
    sum += sum >> 16;

    !sum as u16
}
