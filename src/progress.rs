use std::time::Instant;

use crate::config::{Config, Mode};

/// Tracks and reports per-block progress through the log facade.
pub struct Progress {
    blks:        u64,
    total_blks:  u64, // 0 when unknown (decompression)
    sizei:       u64,
    time:        Instant,
    mode:        Mode,
}
impl Progress {
    pub fn new(cfg: &Config) -> Progress {
        Progress {
            blks:        0,
            total_blks:  0,
            sizei:       0,
            time:        Instant::now(),
            mode:        cfg.mode,
        }
    }

    /// Compute the expected block count from the input size.
    pub fn expect_input(&mut self, in_size: u64, blk_sz: u64) {
        self.total_blks = (in_size as f64 / blk_sz as f64).ceil() as u64;
    }

    /// Report one finished block.
    pub fn update(&mut self, size: u64) {
        self.blks += 1;
        self.sizei += size;
        let verb = match self.mode {
            Mode::Compress   => "compressed",
            Mode::Decompress => "decompressed",
        };
        if self.total_blks > 0 {
            log::info!("{} block {} of {} ({} bytes in) ({:.2?})",
                verb, self.blks, self.total_blks, self.sizei,
                self.time.elapsed());
        }
        else {
            log::info!("{} block {} ({} bytes out) ({:.2?})",
                verb, self.blks, self.sizei, self.time.elapsed());
        }
    }

    /// Report final file statistics.
    pub fn finish(&self, out_size: u64) {
        log::info!("{} bytes -> {} bytes in {:.2?}",
            self.sizei, out_size, self.time.elapsed());
    }
}
