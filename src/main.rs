mod apply;
mod decode;
mod error;
mod header;
mod ips_format;
mod session;
mod util;

use anyhow::{bail, Context};
use clap::{Args, Parser};
use std::path::PathBuf;

use crate::error::Error;
use crate::header::HeaderState;
use crate::session::PatchSession;

#[derive(Parser)]
#[command(name = "rompatch", about = "IPS patcher and SMC copier-header tool for ROM images")]
struct Cli {
    /// ROM image to operate on (.sfc/.smc)
    #[arg(short = 'f', long = "rom")]
    rom: PathBuf,

    /// IPS patch(es) to apply, in order
    #[arg(short = 'p', long = "patch")]
    patches: Vec<PathBuf>,

    #[command(flatten)]
    mode: Mode,
}

#[derive(Args)]
#[group(multiple = false)]
struct Mode {
    /// Report whether the ROM carries a copier header
    #[arg(short, long)]
    check: bool,

    /// Write a copy of the ROM with a copier header prepended
    #[arg(short, long)]
    add: bool,

    /// Write a copy of the ROM with its copier header stripped
    #[arg(short, long)]
    remove: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.mode.check && !cli.mode.add && !cli.mode.remove && cli.patches.is_empty() {
        bail!("nothing to do: pass --check, --add, --remove, or --patch");
    }

    let rom_name = cli
        .rom
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.rom.display().to_string());
    let mut rom = util::read_file(&cli.rom)?;

    if cli.mode.check {
        match header::classify(&rom) {
            HeaderState::Headered => println!("ROM '{}' is headered.", rom_name),
            HeaderState::Unheadered => println!("ROM '{}' is not headered.", rom_name),
            HeaderState::Ambiguous => {
                println!("ROM '{}' has an ambiguous layout ({} bytes).", rom_name, rom.len())
            }
        }
    } else if cli.mode.add {
        rom = header::add_header(&rom)
            .with_context(|| format!("Cannot add header to '{}'", rom_name))?;
        let out = util::prefixed_name(&cli.rom, "[Headered] ");
        util::write_file(&out, &rom)?;
        println!("Added header: {}", out.display());
    } else if cli.mode.remove {
        rom = header::remove_header(&rom)
            .with_context(|| format!("Cannot remove header from '{}'", rom_name))?;
        let out = util::prefixed_name(&cli.rom, "[Unheadered] ");
        util::write_file(&out, &rom)?;
        println!("Removed header: {}", out.display());
    }

    if !cli.patches.is_empty() {
        // Patches apply to the buffer as the header operation left it.
        let mut session = PatchSession::new(rom)
            .with_context(|| format!("Cannot patch '{}'", rom_name))?;

        let mut maps = Vec::with_capacity(cli.patches.len());
        for path in &cli.patches {
            let raw = util::mmap_file(path)?;
            println!("{} patchsize: {}", path.display(), raw.len());
            maps.push(raw);
        }

        let summary = session
            .apply_streams(maps.iter().map(|m| &m[..]))
            .map_err(|err| match err {
                // An unrecognized stream aborts the run; later patches would
                // build on a base the user did not intend.
                Error::BadMagic => anyhow::anyhow!("not an IPS patch (bad magic)"),
                other => anyhow::Error::from(other),
            })?;

        // Streams cut short mid-record keep their partial writes; report and
        // carry on, as the session already did.
        for (index, err) in &summary.stream_failures {
            eprintln!(
                "{}: {} (records before the error remain applied)",
                cli.patches[*index].display(),
                err
            );
        }

        println!(
            "Applied {} of {} patch stream(s)",
            summary.streams_applied,
            cli.patches.len()
        );

        let out = util::prefixed_name(&cli.rom, "[Patched] ");
        util::write_file(&out, &session.into_rom())?;
        println!("Patched ROM written: {}", out.display());
    }

    Ok(())
}
