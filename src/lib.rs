//! bwx is a block oriented lossless file compressor. Each block of
//! input is permuted by the Burrows-Wheeler Transform, and the
//! transformed bytes are coded with an adaptive order-0 model driving a
//! bitwise arithmetic coder. Both stages offer a fast mode (about 5x
//! block size in memory) and a low memory mode (about 1.25x).

mod apm;
mod archive;
mod buffered_io;
mod bwt;
mod constant;
mod decoder;
mod encoder;
mod extract;
mod formatting;
mod logistic;
mod predictor;
mod progress;
mod statemap;
mod tables;
mod unbwt;
pub mod config;
pub mod error;

use std::path::PathBuf;

use crate::{
    archive::Archiver,
    config::{Config, Memory, Mode},
    constant::MAX_BLOCK_SIZE,
    error::{CodecError, ConfigError},
    extract::Extractor,
};

/// Bwx API. Compresses or decompresses one file, configured by method
/// chaining or by supplying an existing Config.
#[derive(Clone, Default)]
pub struct Bwx {
    cfg: Config,
}
impl Bwx {
    /// Create a Bwx compressor or extractor with an existing Config.
    pub fn new(cfg: Config) -> Bwx {
        Bwx {
            cfg
        }
    }

    /// Suppress output other than errors.
    pub fn quiet(mut self) -> Self {
        self.cfg.quiet = true;
        self
    }

    /// Allow file clobbering.
    pub fn clobber(mut self) -> Self {
        self.cfg.clobber = true;
        self
    }

    /// Use fast mode: about 5x block size in memory rather than 1.25x.
    pub fn fast(mut self) -> Self {
        self.cfg.mem = Memory::Fast;
        self
    }

    /// Choose block size in bytes (1 up to 1 GiB).
    pub fn block_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if size < 1 || size > MAX_BLOCK_SIZE {
            return Err(ConfigError::OutOfRangeBlockSize(size));
        }
        self.cfg.blk_sz = size;
        Ok(self)
    }

    /// Choose the input file.
    pub fn input(mut self, path: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(ConfigError::InvalidInput(path));
        }
        self.cfg.input = path;
        Ok(self)
    }

    /// Choose an output path.
    pub fn output(mut self, path: &str) -> Self {
        self.cfg.user_out = path.to_string();
        self
    }

    /// Compress the input file. Returns the archive size in bytes.
    pub fn compress(mut self) -> Result<u64, CodecError> {
        self.cfg.mode = Mode::Compress;
        Archiver::new(self.cfg).compress()
    }

    /// Decompress the input file. Returns the output size in bytes.
    pub fn decompress(mut self) -> Result<u64, CodecError> {
        self.cfg.mode = Mode::Decompress;
        Extractor::new(self.cfg).decompress()
    }
}
