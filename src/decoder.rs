use std::io::{self, ErrorKind, Read};

use crate::predictor::Predictor;

/// A bitwise arithmetic decoder. Mirrors the Encoder's range splits,
/// deciding each bit by which half of the range contains the sliding
/// 4 byte window of compressed input.
pub struct Decoder<R: Read> {
    high:       u32,
    low:        u32,
    x:          u32,       // 4 byte sliding window of compressed data
    predictor:  Predictor,
    archive:    R,
}
impl<R: Read> Decoder<R> {
    /// Create a new Decoder, priming the window with the first 4
    /// archive bytes.
    pub fn new(archive: R) -> io::Result<Decoder<R>> {
        let mut dec = Decoder {
            high:       0xFFFFFFFF,
            low:        0,
            x:          0,
            predictor:  Predictor::new(),
            archive,
        };
        for _ in 0..4 {
            dec.x = (dec.x << 8) + dec.next_byte()? as u32;
        }
        Ok(dec)
    }

    /// Decompress one bit.
    pub fn decompress_bit(&mut self) -> io::Result<i32> {
        let mut p = self.predictor.p() as u32;
        if p < 2048 {
            p += 1;
        }

        let range = self.high - self.low;
        let mid: u32 = self.low + (range >> 12) * p
                       + (((range & 0x0FFF) * p) >> 12);

        let mut bit: i32 = 0;
        if self.x <= mid {
            bit = 1;
            self.high = mid;
        }
        else {
            self.low = mid + 1;
        }
        self.predictor.update(bit);

        while ((self.high ^ self.low) & 0xFF000000) == 0 {
            self.high = (self.high << 8) + 255;
            self.low <<= 8;
            self.x = (self.x << 8) + self.next_byte()? as u32;
        }
        Ok(bit)
    }

    /// Decompress one byte.
    pub fn decompress(&mut self) -> io::Result<u8> {
        let mut byte: u32 = 1;
        while byte < 256 {
            byte = (byte << 1) + self.decompress_bit()? as u32;
        }
        Ok((byte - 256) as u8)
    }

    /// Decompress a 32 bit word, most significant byte first.
    pub fn decompress_u32(&mut self) -> io::Result<u32> {
        let mut num: u32 = 0;
        for _ in 0..4 {
            num = (num << 8) + self.decompress()? as u32;
        }
        Ok(num)
    }

    /// Return the next archive byte, or 0 past end of input. The coded
    /// stream carries its own length, so reads past the flush byte are
    /// legitimate.
    fn next_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.archive.read(&mut byte) {
                Ok(0) => return Ok(0),
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
