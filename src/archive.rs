use crate::{
    buffered_io::{new_input_file, new_output_file, read_block},
    bwt::{forward_fast, primary_index, write_pad, LowMemSort, PAD},
    config::{Config, Memory},
    constant::MAGIC,
    encoder::Encoder,
    error::CodecError,
    formatting::fmt_output,
    progress::Progress,
};

use std::io::Write;

/// Compresses one file into a bwx archive: a raw signature, then for
/// each block the block size, primary index, checksum, and transformed
/// bytes, all through the coder, ending with an empty block.
pub struct Archiver {
    cfg:  Config,
    prg:  Progress,
}
impl Archiver {
    /// Create a new Archiver.
    pub fn new(cfg: Config) -> Archiver {
        let prg = Progress::new(&cfg);
        Archiver {
            cfg,
            prg,
        }
    }

    /// Compress the configured input file. Returns the archive size in
    /// bytes.
    pub fn compress(mut self) -> Result<u64, CodecError> {
        let out_path = fmt_output(self.cfg.mode, &self.cfg.input, &self.cfg.user_out);
        log::info!("compressing {} to {} ({} mode, {} byte blocks)",
            self.cfg.input.display(), out_path.display(),
            match self.cfg.mem {
                Memory::Fast => "fast",
                Memory::Low  => "low memory",
            },
            self.cfg.blk_sz);

        let mut file_in = new_input_file(&self.cfg.input)?;
        self.prg.expect_input(
            self.cfg.input.metadata()?.len(),
            self.cfg.blk_sz as u64
        );

        let mut file_out = new_output_file(&out_path, self.cfg.clobber)?;
        file_out.write_all(&MAGIC.to_be_bytes())?;
        let mut enc = Encoder::new(file_out);

        let blk_sz = self.cfg.blk_sz;
        let mut block: Vec<u8> = Vec::new();
        block.try_reserve_exact(blk_sz + PAD).map_err(|_| CodecError::OutOfMemory)?;
        block.resize(blk_sz + PAD, 0);

        loop {
            let n = read_block(&mut file_in, &mut block[..blk_sz])?;
            if n == 0 {
                break;
            }
            write_pad(&mut block, n);
            let chksum = crc32fast::hash(&block[..n]);

            enc.compress_u32(n as u32)?;
            match self.cfg.mem {
                Memory::Fast => {
                    log::debug!("sorting {} rotations", n);
                    let (ptr, primary) = forward_fast(&block, n)?;
                    enc.compress_u32(primary)?;
                    enc.compress_u32(chksum)?;
                    for &i in ptr.iter() {
                        enc.compress(block[i as usize])?;
                    }
                }
                Memory::Low => {
                    enc.compress_u32(primary_index(&block, n))?;
                    enc.compress_u32(chksum)?;
                    let mut sort = LowMemSort::new(&block, n)?;
                    while let Some(byte) = sort.next_byte()? {
                        enc.compress(byte)?;
                    }
                }
            }
            self.prg.update(n as u64);
        }

        enc.compress_u32(0)?; // Mark end of archive
        let file_out = enc.flush()?;

        let out_size = file_out.get_ref().metadata()?.len();
        self.prg.finish(out_size);
        Ok(out_size)
    }
}
