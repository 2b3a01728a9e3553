//! X.25 checksum used by MAVLink (CRC-16/MCRF4XX).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X25 {
    crc: u16,
}

impl Default for X25 {
    fn default() -> Self {
        Self { crc: 0xffff }
    }
}

impl X25 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            let mut tmp = byte ^ (self.crc & 0xff) as u8;
            tmp ^= tmp << 4;
            let tmp = tmp as u16;
            self.crc = (self.crc >> 8) ^ (tmp << 8) ^ (tmp << 3) ^ (tmp >> 4);
        }
        self
    }

    pub fn value(&self) -> u16 {
        self.crc
    }

    /// Both halves of the checksum folded into one byte.
    pub fn fold(&self) -> u8 {
        ((self.crc & 0xff) ^ (self.crc >> 8)) as u8
    }
}
