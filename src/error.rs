use std::{
    io,
    path::PathBuf,
};

use thiserror::Error;

/// Errors from command line or builder configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no input file specified")]
    NoInput,

    #[error("{} is not a valid input", .0.display())]
    InvalidInput(PathBuf),

    #[error("couldn't parse block size '{0}'")]
    InvalidBlockSize(String),

    #[error("block size {0} is outside the valid range of 1 to 1 GiB")]
    OutOfRangeBlockSize(usize),

    #[error("unrecognized argument '{0}'")]
    UnrecognizedArgument(String),
}

/// Errors from compressing or decompressing an archive.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("out of memory")]
    OutOfMemory,

    #[error("not a bwx archive")]
    InvalidMagicNumber,

    #[error("file corrupted: block size {size} exceeds maximum {max}")]
    BlockTooLarge {
        size:  usize,
        max:   usize,
    },

    #[error("file corrupted: primary index {primary} out of range for block size {size}")]
    PrimaryIndexOutOfRange {
        primary:  usize,
        size:     usize,
    },

    #[error("file corrupted: checksum mismatch in block {0}")]
    ChecksumMismatch(u32),

    #[error("a file at location {} already exists (pass -clb to overwrite)", .0.display())]
    FileAlreadyExists(PathBuf),
}
