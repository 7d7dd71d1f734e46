use std::path::{Path, PathBuf};

use crate::config::Mode;

/// Derive an output path when the user didn't choose one: append .bwx
/// when compressing, strip it when extracting.
pub fn fmt_output(mode: Mode, input: &Path, user_out: &str) -> PathBuf {
    if !user_out.is_empty() {
        return PathBuf::from(user_out);
    }
    match mode {
        Mode::Compress => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".bwx");
            PathBuf::from(name)
        }
        Mode::Decompress => {
            match input.to_str() {
                Some(s) if s.ends_with(".bwx") => {
                    PathBuf::from(&s[..s.len() - 4])
                }
                _ => {
                    let mut name = input.as_os_str().to_os_string();
                    name.push(".out");
                    PathBuf::from(name)
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_archive_name() {
        let out = fmt_output(Mode::Compress, Path::new("foo.txt"), "");
        assert_eq!(out, PathBuf::from("foo.txt.bwx"));
    }

    #[test]
    fn strips_archive_extension() {
        let out = fmt_output(Mode::Decompress, Path::new("foo.txt.bwx"), "");
        assert_eq!(out, PathBuf::from("foo.txt"));
    }

    #[test]
    fn falls_back_when_no_extension() {
        let out = fmt_output(Mode::Decompress, Path::new("foo"), "");
        assert_eq!(out, PathBuf::from("foo.out"));
    }

    #[test]
    fn user_output_wins() {
        let out = fmt_output(Mode::Compress, Path::new("foo.txt"), "bar");
        assert_eq!(out, PathBuf::from("bar"));
    }
}
