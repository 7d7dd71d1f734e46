use std::{
    cmp::{min, Ordering},
    fs::File,
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
};

use crate::error::CodecError;

/// Extra bytes appended to a block, a copy of its beginning, so that
/// fixed width comparisons near the end of the block need not wrap.
pub const PAD: usize = 72;

/// Extend block[..n] with PAD bytes of its own prefix. The copy runs
/// left to right, so blocks shorter than PAD are continued cyclically.
pub fn write_pad(block: &mut [u8], n: usize) {
    for i in 0..PAD {
        block[n + i] = block[i];
    }
}

/// Orders block positions by their right context, with wrap around.
/// Index a sorts by the cyclic byte sequence starting at a+1, so the
/// byte at a is the one emitted for that rotation.
pub struct Rotations<'a> {
    block:  &'a [u8], // n + PAD bytes, the tail a copy of the head
    n:      usize,
}
impl<'a> Rotations<'a> {
    pub fn new(block: &'a [u8], n: usize) -> Rotations<'a> {
        assert!(n >= 1 && block.len() >= n + PAD);
        Rotations {
            block,
            n,
        }
    }

    pub fn byte(&self, i: usize) -> u8 {
        self.block[i]
    }

    /// True if the rotation starting at a+1 sorts before the rotation
    /// starting at b+1.
    pub fn lessthan(&self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let t = self.block;
        let n = self.n;

        // The pad makes the first 65 positions safe to compare without
        // wrapping.
        match t[a + 1..a + 66].cmp(&t[b + 1..b + 66]) {
            Ordering::Less    => return true,
            Ordering::Greater => return false,
            Ordering::Equal   => {}
        }

        // Full cyclic comparison in three segments: until the later
        // suffix reaches the end of the block, until the earlier one
        // does, then the remaining prefix window.
        if a < b {
            let r = t[a + 1..a + n - b].cmp(&t[b + 1..n]);
            if r != Ordering::Equal {
                return r == Ordering::Less;
            }
            let r = t[a + n - b..n].cmp(&t[..b - a]);
            if r != Ordering::Equal {
                return r == Ordering::Less;
            }
            t[..a].cmp(&t[b - a..b]) == Ordering::Less
        }
        else {
            let r = t[a + 1..n].cmp(&t[b + 1..b + n - a]);
            if r != Ordering::Equal {
                return r == Ordering::Less;
            }
            let r = t[..a - b].cmp(&t[b + n - a..n]);
            if r != Ordering::Equal {
                return r == Ordering::Less;
            }
            t[a - b..a].cmp(&t[..b]) == Ordering::Less
        }
    }

    fn order(&self, a: usize, b: usize) -> Ordering {
        if self.lessthan(a, b) {
            Ordering::Less
        }
        else if self.lessthan(b, a) {
            Ordering::Greater
        }
        else {
            Ordering::Equal
        }
    }
}

/// Sort all rotations of block[..n] at once. Returns the sorted
/// position array (ptr[i] is the block index whose byte is emitted at
/// rank i) and the primary index, the rank of the rotation starting at
/// byte 0. Needs about 5n memory.
pub fn forward_fast(block: &[u8], n: usize) -> Result<(Vec<u32>, u32), CodecError> {
    let rot = Rotations::new(block, n);

    let mut ptr: Vec<u32> = Vec::new();
    ptr.try_reserve_exact(n).map_err(|_| CodecError::OutOfMemory)?;
    ptr.extend(0..n as u32);

    // Stable, so equal rotations keep index order.
    ptr.sort_by(|&a, &b| rot.order(a as usize, b as usize));

    let mut primary = 0u32;
    for (i, &p) in ptr.iter().enumerate() {
        if p as usize == n - 1 {
            primary = i as u32;
            break;
        }
    }
    Ok((ptr, primary))
}

/// The rank of the rotation starting at byte 0, computed without
/// sorting by counting the rotations that precede it.
pub fn primary_index(block: &[u8], n: usize) -> u32 {
    let rot = Rotations::new(block, n);
    let mut p = 0u32;
    for a in 0..n - 1 {
        if rot.lessthan(a, n - 1) {
            p += 1;
        }
    }
    p
}

// One sorted subrange, spilled to an anonymous scratch file. The file
// is removed by the OS when the handle drops, on every exit path.
struct Spill {
    file:       BufReader<File>,
    remaining:  usize,
}
impl Spill {
    fn next(&mut self) -> io::Result<Option<u32>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let mut bytes = [0u8; 4];
        self.file.read_exact(&mut bytes)?;
        self.remaining -= 1;
        Ok(Some(u32::from_le_bytes(bytes)))
    }
}

/// Sort rotations in 16 subranges, spill each sorted subrange to a
/// scratch file, then merge. Needs about 1.25n memory plus up to 4n of
/// scratch storage, against 5n for the all-at-once sort.
pub struct LowMemSort<'a> {
    rot:     Rotations<'a>,
    spills:  Vec<Spill>,
    heads:   Vec<Option<u32>>,
}
impl<'a> LowMemSort<'a> {
    pub fn new(block: &'a [u8], n: usize) -> Result<LowMemSort<'a>, CodecError> {
        let rot = Rotations::new(block, n);
        let sub = (n - 1) / 16 + 1; // Max size of one subrange

        let mut ptr: Vec<u32> = Vec::new();
        ptr.try_reserve_exact(sub).map_err(|_| CodecError::OutOfMemory)?;

        let mut spills = Vec::with_capacity(16);
        let mut start = 0;
        while start < n {
            let end = min(start + sub, n);
            log::debug!("sorting rotations {}..{}", start, end);

            ptr.clear();
            ptr.extend(start as u32..end as u32);
            ptr.sort_by(|&a, &b| rot.order(a as usize, b as usize));

            let mut file = BufWriter::new(tempfile::tempfile()?);
            for &i in ptr.iter() {
                file.write_all(&i.to_le_bytes())?;
            }
            let mut file = file.into_inner().map_err(|e| e.into_error())?;
            file.seek(SeekFrom::Start(0))?;

            spills.push(Spill {
                file:       BufReader::new(file),
                remaining:  end - start,
            });
            start = end;
        }

        let mut heads = Vec::with_capacity(spills.len());
        for spill in spills.iter_mut() {
            heads.push(spill.next()?);
        }
        log::debug!("merging {} sorted subranges", spills.len());

        Ok(LowMemSort {
            rot,
            spills,
            heads,
        })
    }

    /// Emit the next byte of the transformed block by selecting the
    /// least rotation among the stream heads and advancing its stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut best: Option<(usize, u32)> = None;
        for (i, head) in self.heads.iter().enumerate() {
            if let Some(h) = *head {
                best = match best {
                    Some((_, bh)) if !self.rot.lessthan(h as usize, bh as usize) => best,
                    _ => Some((i, h)),
                };
            }
        }
        match best {
            Some((j, idx)) => {
                self.heads[j] = self.spills[j].next()?;
                Ok(Some(self.rot.byte(idx as usize)))
            }
            None => Ok(None),
        }
    }
}
