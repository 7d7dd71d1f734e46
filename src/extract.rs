use crate::{
    buffered_io::{new_input_file, new_output_file},
    config::{Config, Memory},
    constant::{MAGIC, MAX_BLOCK_SIZE},
    decoder::Decoder,
    error::CodecError,
    formatting::fmt_output,
    progress::Progress,
    unbwt::{FastWalk, LowWalk},
};

use std::io::{Read, Write};

/// Decompresses a bwx archive back into the original file. The block
/// size is taken from the first block; each block's checksum is
/// verified after the inverse transform.
pub struct Extractor {
    cfg:  Config,
    prg:  Progress,
}
impl Extractor {
    /// Create a new Extractor.
    pub fn new(cfg: Config) -> Extractor {
        let prg = Progress::new(&cfg);
        Extractor {
            cfg,
            prg,
        }
    }

    /// Decompress the configured input file. Returns the output size in
    /// bytes.
    pub fn decompress(mut self) -> Result<u64, CodecError> {
        let out_path = fmt_output(self.cfg.mode, &self.cfg.input, &self.cfg.user_out);
        log::info!("decompressing {} to {} ({} mode)",
            self.cfg.input.display(), out_path.display(),
            match self.cfg.mem {
                Memory::Fast => "fast",
                Memory::Low  => "low memory",
            });

        let mut file_in = new_input_file(&self.cfg.input)?;
        let mut magic = [0u8; 4];
        file_in.read_exact(&mut magic)
            .map_err(|_| CodecError::InvalidMagicNumber)?;
        if u32::from_be_bytes(magic) != MAGIC {
            return Err(CodecError::InvalidMagicNumber);
        }
        let mut dec = Decoder::new(file_in)?;

        let mut file_out = new_output_file(&out_path, self.cfg.clobber)?;

        let mut blk_sz = 0usize;
        let mut block: Vec<u8> = Vec::new();
        let mut id = 0u32;
        let mut out_size = 0u64;

        loop {
            let n = dec.decompress_u32()? as usize;
            if n == 0 {
                break;
            }
            if blk_sz == 0 { // First block sets the buffer size
                if n > MAX_BLOCK_SIZE {
                    return Err(CodecError::BlockTooLarge {
                        size:  n,
                        max:   MAX_BLOCK_SIZE,
                    });
                }
                log::info!("block size = {}", n);
                blk_sz = n;
                block.try_reserve_exact(blk_sz).map_err(|_| CodecError::OutOfMemory)?;
                block.resize(blk_sz, 0);
            }
            else if n > blk_sz {
                return Err(CodecError::BlockTooLarge {
                    size:  n,
                    max:   blk_sz,
                });
            }

            let primary = dec.decompress_u32()? as usize;
            if primary >= n {
                return Err(CodecError::PrimaryIndexOutOfRange {
                    primary,
                    size: n,
                });
            }
            let chksum = dec.decompress_u32()?;

            for i in 0..n {
                block[i] = dec.decompress()?;
            }

            let mut hasher = crc32fast::Hasher::new();
            match self.cfg.mem {
                Memory::Fast => {
                    let walk = FastWalk::new(&block[..n], primary)?;
                    for byte in walk {
                        hasher.update(&[byte]);
                        file_out.write_all(&[byte])?;
                    }
                }
                Memory::Low => {
                    let walk = LowWalk::new(&block[..n], primary)?;
                    for byte in walk {
                        hasher.update(&[byte]);
                        file_out.write_all(&[byte])?;
                    }
                }
            }
            if hasher.finalize() != chksum {
                return Err(CodecError::ChecksumMismatch(id));
            }

            out_size += n as u64;
            id += 1;
            self.prg.update(n as u64);
        }

        file_out.flush()?;
        self.prg.finish(out_size);
        Ok(out_size)
    }
}
