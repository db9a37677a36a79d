//! Test ROM builder entry point.
//!
//! Writes one of the built-in fixture programs (or caller-supplied bytes) into an NROM image.
//! Usage: nesforge [--fixture log] [--program "A9 42 4C 00 80"] [-o test.nes]

use std::path::{Path, PathBuf};

use ansi_term::Colour::{Green, Red};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use nesforge::{
    RomConfig, RomImage,
    cartridge::mapper::Mirroring,
    program::{self, Fixture},
};
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

#[derive(Clone, Copy, ValueEnum)]
enum FixtureArg {
    Basic,
    Log,
}

impl From<FixtureArg> for Fixture {
    fn from(arg: FixtureArg) -> Self {
        match arg {
            FixtureArg::Basic => Fixture::Basic,
            FixtureArg::Log => Fixture::Log,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Built-in program to embed
    #[arg(long, value_enum, default_value_t = FixtureArg::Basic)]
    fixture: FixtureArg,

    /// Program bytes as hex, e.g. "A9 42 4C 00 80"
    #[arg(long, conflicts_with = "program_file")]
    program: Option<String>,

    /// Pre-assembled program file
    #[arg(long)]
    program_file: Option<PathBuf>,

    /// Output path (defaults to the fixture's file name, or test.nes for a custom program)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PRG ROM size in 16 KiB banks
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..))]
    prg_banks: u8,

    /// CHR ROM size in 8 KiB banks
    #[arg(long, default_value_t = 1)]
    chr_banks: u8,

    /// Reset vector address in hex
    #[arg(long, default_value = "8000", value_parser = parse_address)]
    reset_vector: u16,

    /// iNES mapper number
    #[arg(long, default_value_t = 0)]
    mapper: u8,

    /// Vertical nametable mirroring
    #[arg(long)]
    vertical: bool,

    /// Let the reset vector overwrite a program that runs into it
    #[arg(long)]
    allow_overlap: bool,

    /// Print the header of an existing image instead of building one
    #[arg(long, exclusive = true)]
    inspect: Option<PathBuf>,

    /// Log layout details
    #[arg(short, long)]
    verbose: bool,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {s:?}: {e}"))
}

impl Options {
    fn rom_config(&self) -> nesforge::Result<RomConfig> {
        let fixture = Fixture::from(self.fixture);
        let (program, default_output) = match (&self.program, &self.program_file) {
            (Some(hex), _) => (program::parse_hex(hex)?, RomConfig::default().output_path),
            (None, Some(path)) => (program::read_binary(path)?, RomConfig::default().output_path),
            (None, None) => (
                fixture.program().to_vec(),
                PathBuf::from(fixture.default_output()),
            ),
        };
        let output_path = self.output.clone().unwrap_or(default_output);

        Ok(RomConfig {
            prg_bank_count: self.prg_banks,
            chr_bank_count: self.chr_banks,
            mirroring: if self.vertical {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
            mapper: self.mapper,
            program,
            reset_vector: self.reset_vector,
            output_path,
            allow_overlap: self.allow_overlap,
        })
    }
}

fn main() {
    let options = Options::parse();

    let level = if options.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(e) = run(&options) {
        eprintln!("{} {e:#}", Red.bold().paint("ERROR"));
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    if let Some(path) = &options.inspect {
        let image = RomImage::load(path)?;
        print_summary(path, &image, None);
        return Ok(());
    }

    let config = options.rom_config()?;
    let image = config.write()?;
    println!(
        "{} Created {} ROM file",
        Green.bold().paint("INFO"),
        config.output_path.display()
    );
    print_summary(&config.output_path, &image, Some(config.program.as_slice()));
    Ok(())
}

fn print_summary(path: &Path, image: &RomImage, program: Option<&[u8]>) {
    let header = image.header();
    println!("File: {} ({} bytes)", path.display(), image.len());
    println!("Header: {}", hex(image.header_bytes(), ""));
    println!(
        "Mapper: {}, mirroring: {:?}",
        header.mapper, header.mirroring
    );
    println!("PRG ROM size: {} bytes", image.prg().len());
    println!("CHR ROM size: {} bytes", image.chr().len());
    println!("Reset vector: ${:04X}", image.reset_vector());
    if let Some(program) = program {
        println!("Program: [{}]", hex(program, ", "));
    }
}

fn hex(bytes: &[u8], separator: &str) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("nesforge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_build_the_basic_fixture() {
        let config = options(&[]).rom_config().unwrap();
        assert_eq!(config.program, Fixture::Basic.program());
        assert_eq!(config.output_path, PathBuf::from("test.nes"));
        assert_eq!(config.reset_vector, 0x8000);
        assert_eq!(config.prg_bank_count, 1);
        assert_eq!(config.chr_bank_count, 1);
        assert_eq!(config.mirroring, Mirroring::Horizontal);
        assert!(!config.allow_overlap);
    }

    #[test]
    fn log_fixture_uses_its_own_file_name() {
        let config = options(&["--fixture", "log"]).rom_config().unwrap();
        assert_eq!(config.program, Fixture::Log.program());
        assert_eq!(config.output_path, PathBuf::from("test_log.nes"));
    }

    #[test]
    fn program_overrides_fixture() {
        let config = options(&["--fixture", "log", "--program", "EA 4C 00 80"])
            .rom_config()
            .unwrap();
        assert_eq!(config.program, [0xEA, 0x4C, 0x00, 0x80]);
        assert_eq!(config.output_path, PathBuf::from("test.nes"));
    }

    #[test]
    fn program_file_is_read_verbatim() {
        let path = std::env::temp_dir().join(format!("nesforge-cli-{}.bin", std::process::id()));
        std::fs::write(&path, [0xA9, 0x01, 0x00]).unwrap();

        let config = options(&["--program-file", path.to_str().unwrap(), "-o", "out.nes"])
            .rom_config()
            .unwrap();
        assert_eq!(config.program, [0xA9, 0x01, 0x00]);
        assert_eq!(config.output_path, PathBuf::from("out.nes"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn bad_hex_program_is_an_error() {
        let result = options(&["--program", "A9 ZZ"]).rom_config();
        assert!(matches!(
            result,
            Err(nesforge::Error::InvalidHexByte { token }) if token == "ZZ"
        ));
    }

    #[test]
    fn header_options_map_onto_config() {
        let config = options(&[
            "--vertical",
            "--mapper",
            "3",
            "--prg-banks",
            "2",
            "--chr-banks",
            "0",
            "--reset-vector",
            "$C000",
            "--allow-overlap",
        ])
        .rom_config()
        .unwrap();
        assert_eq!(config.mirroring, Mirroring::Vertical);
        assert_eq!(config.mapper, 3);
        assert_eq!(config.prg_bank_count, 2);
        assert_eq!(config.chr_bank_count, 0);
        assert_eq!(config.reset_vector, 0xC000);
        assert!(config.allow_overlap);
    }

    #[test]
    fn zero_prg_banks_rejected_by_parser() {
        assert!(Options::try_parse_from(["nesforge", "--prg-banks", "0"]).is_err());
    }

    #[test]
    fn program_and_program_file_conflict() {
        let args = ["nesforge", "--program", "EA", "--program-file", "a.bin"];
        assert!(Options::try_parse_from(args).is_err());
    }

    #[test]
    fn inspect_stands_alone() {
        assert!(Options::try_parse_from(["nesforge", "--inspect", "a.nes", "--vertical"]).is_err());
        assert!(options(&["--inspect", "a.nes"]).inspect.is_some());
    }

    #[test]
    fn addresses_accept_common_prefixes() {
        for input in ["8000", "0x8000", "0X8000", "$8000"] {
            assert_eq!(parse_address(input), Ok(0x8000), "{input}");
        }
        assert_eq!(parse_address("fffc"), Ok(0xFFFC));
    }

    #[test]
    fn addresses_reject_bad_input() {
        for input in ["", "$", "10000", "80G0", "-1"] {
            assert!(parse_address(input).is_err(), "{input}");
        }
        assert!(Options::try_parse_from(["nesforge", "--reset-vector", "zz"]).is_err());
    }
}
