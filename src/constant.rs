// Magic number, "bwx" plus the container format version.
pub const MAGIC: u32 = 0x6277_7801;

// Block size bounds. Bigger blocks generally compress better,
// especially for text.
pub const DEFAULT_BLOCK_SIZE: usize = 4 << 20;
pub const MAX_BLOCK_SIZE: usize = 1 << 30;
