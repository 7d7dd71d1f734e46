use std::{
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Read},
    path::Path,
};

use crate::error::CodecError;

/// Takes a file path and returns an input file wrapped in a BufReader.
pub fn new_input_file(path: &Path) -> Result<BufReader<File>, CodecError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Takes a file path and returns an output file wrapped in a BufWriter.
/// Refuses to truncate an existing, non-empty file unless clobbering
/// was requested.
pub fn new_output_file(path: &Path, clobber: bool) -> Result<BufWriter<File>, CodecError> {
    if !clobber && path.exists() && path.metadata()?.len() > 0 {
        return Err(CodecError::FileAlreadyExists(path.to_path_buf()));
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Fill buf from the reader, short only at end of input. Returns the
/// number of bytes read.
pub fn read_block(file: &mut BufReader<File>, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match file.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(len) => total += len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
