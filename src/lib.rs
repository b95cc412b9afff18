//! A calm, terminal-based daily quote card.
use crate::palette::{HexPalette, Palette, TimeOfDay};
use crate::quote::{Quote, QuoteStore};
use crate::selection::Selection;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::Write;
use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod palette;
pub mod quote;
pub mod selection;
pub mod ui;

#[derive(Debug, Clone, clap::Parser)]
#[clap(version, about)]
pub struct Options {
    /// Hour of day (0-23) used to pick the palette.
    ///
    /// By default, the local clock is read once at startup.
    #[clap(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: Option<u32>,

    /// Print one quote to stdout and exit instead of opening the card.
    #[clap(long)]
    pub print: bool,

    /// Print as JSON (quote, palette and time of day).
    #[clap(long, requires = "print")]
    pub json: bool,

    /// Seed for quote selection.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Write debug logs to this file.
    #[clap(long)]
    pub logfile: Option<PathBuf>,
}

impl Options {
    pub fn time_of_day(&self) -> TimeOfDay {
        self.hour.map_or_else(TimeOfDay::now, TimeOfDay::from_hour)
    }

    pub fn rng(&self) -> StdRng {
        if let Some(seed) = self.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        }
    }

    pub fn selection(&self) -> Selection<StdRng> {
        Selection::new(QuoteStore::builtin(), self.rng())
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub quote: Quote,
    pub palette: HexPalette,
    pub time_of_day: TimeOfDay,
}

impl Snapshot {
    pub fn new(quote: Quote, time_of_day: TimeOfDay) -> Self {
        Self {
            quote,
            palette: Palette::for_time_of_day(time_of_day).to_hex(),
            time_of_day,
        }
    }
}

pub fn create_logfile(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))
}

/// Picks one quote the way the card does on startup and writes it out.
pub fn print_once<W: Write>(options: &Options, mut out: W) -> anyhow::Result<()> {
    let mut selection = options.selection();
    let snapshot = Snapshot::new(*selection.mount(), options.time_of_day());
    if options.json {
        serde_json::to_writer_pretty(&mut out, &snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", snapshot.quote)?;
    }
    Ok(())
}
