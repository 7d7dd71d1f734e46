use std::path::PathBuf;

use crate::{
    constant::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE},
    error::ConfigError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Memory strategy for the block sort and its inverse. Fast needs about
/// 5x block size, Low about 1.25x (plus scratch files while sorting).
/// Either side of an archive may use either mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Memory {
    Low,
    Fast,
}

/// An enum containing each possible parsing state.
enum Parse {
    None,
    Input,
    DirOut,
    BlkSz,
}

/// A list of all user defined configuration settings.
#[derive(Clone, Debug)]
pub struct Config {
    pub mode:      Mode,
    pub mem:       Memory,
    pub blk_sz:    usize,       // Block size in bytes
    pub quiet:     bool,        // Suppresses output other than errors
    pub clobber:   bool,        // Allow overwriting output files
    pub input:     PathBuf,
    pub user_out:  String,      // User specified output path (optional)
}
impl Default for Config {
    fn default() -> Config {
        Config {
            mode:      Mode::Compress,
            mem:       Memory::Low,
            blk_sz:    DEFAULT_BLOCK_SIZE,
            quiet:     false,
            clobber:   false,
            input:     PathBuf::new(),
            user_out:  String::new(),
        }
    }
}
impl Config {
    /// Create a new Config from command line arguments.
    pub fn new(args: &[String]) -> Result<Config, ConfigError> {
        let mut cfg = Config::default();
        let mut parser = Parse::None;

        for arg in args.iter() {
            match arg.as_str() {
                "-i" | "-input" => {
                    parser = Parse::Input;
                    continue;
                }
                "-out" | "-output-path" => {
                    parser = Parse::DirOut;
                    continue;
                }
                "-blk" | "-block-size" => {
                    parser = Parse::BlkSz;
                    continue;
                }
                "c" | "compress" => {
                    cfg.mode = Mode::Compress;
                    continue;
                }
                "d" | "decompress" => {
                    cfg.mode = Mode::Decompress;
                    continue;
                }
                "-fast" => {
                    cfg.mem = Memory::Fast;
                    continue;
                }
                "-q" | "-quiet" => {
                    cfg.quiet = true;
                    continue;
                }
                "-clb" | "-clobber" => {
                    cfg.clobber = true;
                    continue;
                }
                _ => {}
            }
            match parser {
                Parse::Input => {
                    cfg.input = PathBuf::from(arg);
                }
                Parse::DirOut => {
                    cfg.user_out = arg.to_string();
                }
                Parse::BlkSz => {
                    cfg.blk_sz = parse_block_size(arg)?;
                }
                Parse::None => {
                    return Err(ConfigError::UnrecognizedArgument(arg.to_string()));
                }
            }
            parser = Parse::None;
        }

        if cfg.input.as_os_str().is_empty() {
            return Err(ConfigError::NoInput);
        }
        if !cfg.input.is_file() {
            return Err(ConfigError::InvalidInput(cfg.input));
        }
        Ok(cfg)
    }
}

/// Parse a block size given in bytes, KiB, or MiB, e.g. "65536",
/// "512K", "4M".
fn parse_block_size(size: &str) -> Result<usize, ConfigError> {
    let size = size.trim();
    let (digits, shift) = match size.as_bytes().last().copied() {
        Some(b'B' | b'b') => (&size[..size.len() - 1], 0),
        Some(b'K' | b'k') => (&size[..size.len() - 1], 10),
        Some(b'M' | b'm') => (&size[..size.len() - 1], 20),
        _ => (size, 0),
    };
    let blk_sz = digits.parse::<usize>()
        .map_err(|_| ConfigError::InvalidBlockSize(size.to_string()))?
        .checked_shl(shift)
        .ok_or_else(|| ConfigError::InvalidBlockSize(size.to_string()))?;
    if blk_sz < 1 || blk_sz > MAX_BLOCK_SIZE {
        return Err(ConfigError::OutOfRangeBlockSize(blk_sz));
    }
    Ok(blk_sz)
}
