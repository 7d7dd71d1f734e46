use std::{
    env,
    process::ExitCode,
};

use bwx::{
    config::{Config, Mode},
    Bwx,
};

fn print_program_info() {
    println!();
    println!("  bwx, Burrows-Wheeler block compressor");
    println!();
    println!("  USAGE: bwx [c|d] -i FILE [OPTIONS|FLAGS]");
    println!();
    println!("  REQUIRED:");
    println!("     c,    compress      Compress (default)");
    println!("     d,    decompress    Decompress");
    println!("    -i,   -input         Specify input file");
    println!();
    println!("  OPTIONS:");
    println!("    -out, -output-path   Specify output path");
    println!("    -blk, -block-size    Block size in bytes/KiB/MiB,");
    println!("                         e.g. 65536, 512K, 4M (Default - 4M)");
    println!();
    println!("  FLAGS:");
    println!("    -fast                Fast mode: uses 5x block size memory");
    println!("                         rather than 1.25x");
    println!("    -q,   -quiet         Suppresses output other than errors");
    println!("    -clb, -clobber       Allows clobbering files");
    println!();
    println!("  Options '-block-size' and '-fast' have no effect on decompression;");
    println!("  the block size is read from the archive, and either memory mode");
    println!("  can decompress any archive.");
    println!();
    println!("  EXAMPLES:");
    println!();
    println!("      Compress file [foo.txt] to [foo.txt.bwx] with 10 MiB blocks:");
    println!();
    println!("          bwx c -i foo.txt -blk 10M");
    println!();
    println!("      Decompress it:");
    println!();
    println!("          bwx d -i foo.txt.bwx");
}

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<String>>();
    if args.is_empty() || args[0] == "help" {
        print_program_info();
        return ExitCode::SUCCESS;
    }

    let cfg = match Config::new(&args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("bwx: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let level = if cfg.quiet {
        log::LevelFilter::Error
    }
    else {
        log::LevelFilter::Info
    };
    if let Err(err) = simple_logger::SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init() {
        eprintln!("bwx: {}", err);
        return ExitCode::FAILURE;
    }

    let result = match cfg.mode {
        Mode::Compress   => Bwx::new(cfg).compress(),
        Mode::Decompress => Bwx::new(cfg).decompress(),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
