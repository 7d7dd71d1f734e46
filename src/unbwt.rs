use crate::error::CodecError;

// Cumulative counts: t[c] = number of bytes < c in the transformed
// block, t[256] = n.
fn counts(block: &[u8]) -> Vec<u32> {
    let mut t = vec![0u32; 257];
    for &byte in block.iter() {
        t[byte as usize + 1] += 1;
    }
    for i in 1..257 {
        t[i] += t[i - 1];
    }
    t
}

/// Inverse transform by linked list traversal. Builds a next-pointer
/// array up front, so each emitted byte costs one lookup. Needs about
/// 5n memory.
pub struct FastWalk<'a> {
    block:      &'a [u8], // Transformed block
    nxt:        Vec<u32>, // Rank -> position of matching byte in block
    q:          usize,    // Current rank
    remaining:  usize,
}
impl<'a> FastWalk<'a> {
    pub fn new(block: &'a [u8], primary: usize) -> Result<FastWalk<'a>, CodecError> {
        let n = block.len();
        assert!(n >= 1 && primary < n);

        let mut t = counts(block);
        let mut nxt: Vec<u32> = Vec::new();
        nxt.try_reserve_exact(n).map_err(|_| CodecError::OutOfMemory)?;
        nxt.resize(n, 0);

        for (i, &byte) in block.iter().enumerate() {
            let c = byte as usize;
            nxt[t[c] as usize] = i as u32;
            t[c] += 1;
        }

        Ok(FastWalk {
            block,
            nxt,
            q: primary,
            remaining: n,
        })
    }
}
impl Iterator for FastWalk<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.q = self.nxt[self.q] as usize;
        Some(self.block[self.q])
    }
}

/// Inverse transform by rank search. Keeps only the position of every
/// 16th occurrence of each byte value and scans forward from there, so
/// memory stays around 1.25n at the cost of a short linear scan per
/// emitted byte.
pub struct LowWalk<'a> {
    block:      &'a [u8],
    t:          Vec<u32>, // Cumulative counts
    index:      Vec<u32>, // Packed rows: every 16th occurrence of c
    q:          usize,
    remaining:  usize,
}
impl<'a> LowWalk<'a> {
    pub fn new(block: &'a [u8], primary: usize) -> Result<LowWalk<'a>, CodecError> {
        let n = block.len();
        assert!(n >= 1 && primary < n);

        let t = counts(block);

        // Row c starts at (t[c] >> 4) + c and holds the position of the
        // 0th, 16th, 32nd... occurrence of c. Rows never collide.
        let mut index: Vec<u32> = Vec::new();
        index.try_reserve_exact(n / 16 + 257).map_err(|_| CodecError::OutOfMemory)?;
        index.resize(n / 16 + 257, 0);

        let mut count = [0u32; 256];
        for (i, &byte) in block.iter().enumerate() {
            let c = byte as usize;
            if count[c] & 15 == 0 {
                index[(t[c] as usize >> 4) + c + (count[c] as usize >> 4)] = i as u32;
            }
            count[c] += 1;
        }

        Ok(LowWalk {
            block,
            t,
            index,
            q: primary,
            remaining: n,
        })
    }
}
impl Iterator for LowWalk<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // The byte at rank q in sorted order: the largest c with
        // t[c] <= q.
        let q = self.q;
        let c = self.t.partition_point(|&x| x as usize <= q) - 1;
        let byte = c as u8;

        // q holds the j'th occurrence of c; jump to the nearest indexed
        // occurrence, then scan forward for the rest.
        let j = q - self.t[c] as usize;
        let mut pos = self.index[(self.t[c] as usize >> 4) + c + (j >> 4)] as usize;
        for _ in 0..(j & 15) {
            pos += 1;
            while self.block[pos] != byte {
                pos += 1;
            }
        }

        self.q = pos;
        Some(byte)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::bwt::{forward_fast, write_pad, PAD};

    fn bwt(data: &[u8]) -> (Vec<u8>, u32) {
        let mut block = data.to_vec();
        block.resize(data.len() + PAD, 0);
        write_pad(&mut block, data.len());
        let (ptr, primary) = forward_fast(&block, data.len()).unwrap();
        let out = ptr.iter().map(|&i| block[i as usize]).collect();
        (out, primary)
    }

    #[test]
    fn banana_fast() {
        let walk = FastWalk::new(b"nnbaaa", 3).unwrap();
        assert_eq!(walk.collect::<Vec<u8>>(), b"banana");
    }

    #[test]
    fn banana_low() {
        let walk = LowWalk::new(b"nnbaaa", 3).unwrap();
        assert_eq!(walk.collect::<Vec<u8>>(), b"banana");
    }

    #[test]
    fn abracadabra() {
        let walk = FastWalk::new(b"rdarcaaaabb", 2).unwrap();
        assert_eq!(walk.collect::<Vec<u8>>(), b"abracadabra");
        let walk = LowWalk::new(b"rdarcaaaabb", 2).unwrap();
        assert_eq!(walk.collect::<Vec<u8>>(), b"abracadabra");
    }

    #[test]
    fn uniform_block_any_primary() {
        for p in 0..6 {
            let walk = FastWalk::new(b"aaaaaa", p).unwrap();
            assert_eq!(walk.collect::<Vec<u8>>(), b"aaaaaa");
            let walk = LowWalk::new(b"aaaaaa", p).unwrap();
            assert_eq!(walk.collect::<Vec<u8>>(), b"aaaaaa");
        }
    }

    #[test]
    fn all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let (l, primary) = bwt(&data);
        let walk = FastWalk::new(&l, primary as usize).unwrap();
        assert_eq!(walk.collect::<Vec<u8>>(), data);
    }

    #[test]
    fn cumulative_counts_invariant() {
        fastrand::seed(5);
        let data: Vec<u8> = (0..4096).map(|_| fastrand::u8(..)).collect();
        let t = counts(&data);
        assert_eq!(t[0], 0);
        assert_eq!(t[256], data.len() as u32);
        for c in 0..256 {
            assert!(t[c] <= t[c + 1]);
            let occurrences = data.iter().filter(|&&b| b == c as u8).count();
            assert_eq!((t[c + 1] - t[c]) as usize, occurrences);
        }
    }

    #[test]
    fn roundtrip_random_both_modes() {
        fastrand::seed(6);
        for len in [1usize, 2, 15, 16, 17, 255, 4096] {
            let data: Vec<u8> = (0..len).map(|_| fastrand::u8(0..16)).collect();
            let (l, primary) = bwt(&data);
            let fast = FastWalk::new(&l, primary as usize).unwrap();
            assert_eq!(fast.collect::<Vec<u8>>(), data, "fast len={}", len);
            let low = LowWalk::new(&l, primary as usize).unwrap();
            assert_eq!(low.collect::<Vec<u8>>(), data, "low len={}", len);
        }
    }

    #[test]
    fn roundtrip_long_runs() {
        let mut data = vec![b'a'; 3000];
        data.extend_from_slice(&vec![b'b'; 3000]);
        data.extend_from_slice(b"trailer");
        let (l, primary) = bwt(&data);
        let fast = FastWalk::new(&l, primary as usize).unwrap();
        assert_eq!(fast.collect::<Vec<u8>>(), data);
        let low = LowWalk::new(&l, primary as usize).unwrap();
        assert_eq!(low.collect::<Vec<u8>>(), data);
    }
}
