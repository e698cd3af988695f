use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use image::{ImageError, RgbaImage};
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pairlink::{Canonicalizer, Geometry, GroupRule, HintSelector, HintView, Recognizer};

#[derive(Parser, Debug)]
#[command(name = "hinter", about = "Print a legal move for a captured lianliankan board", version)]
struct Cli {
    /// Screenshot of the game window, re-read on every refresh
    #[arg(short = 'i', long = "image")]
    image: PathBuf,

    /// JSON file describing where the board sits in the window (defaults to the classic 9 x 16 layout)
    #[arg(short = 'g', long = "geometry")]
    geometry: Option<PathBuf>,

    /// Tiles of each type on a fresh board
    #[arg(long = "group-size", default_value_t = 4)]
    group_size: usize,

    /// Which tile counts are believable: `exact` (the group size) or `even-at-most` (any even count up to it, for boards already partly cleared)
    #[arg(short = 'r', long = "rule", default_value_t = GroupRule::Exact)]
    rule: GroupRule,

    /// Seed for the hint shuffle
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// How many refreshes to run
    #[arg(short = 'n', long = "repeat", default_value_t = 1)]
    repeat: usize,

    /// Milliseconds to wait between refreshes
    #[arg(long = "interval", default_value_t = 1000)]
    interval: u64,
}

/// Reads the screenshot from disk on every capture, so an external tool can keep overwriting it.
struct FileCapture {
    path: PathBuf,
}

impl pairlink::raster::Capture for FileCapture {
    type Frame = RgbaImage;
    type Error = ImageError;

    fn capture(&mut self) -> Result<RgbaImage, ImageError> {
        Ok(image::open(&self.path)?.to_rgba8())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let geometry = match &cli.geometry {
        Some(path) => Geometry::from_json(&fs::read_to_string(path)?)?,
        None => Geometry::default(),
    };
    let canonicalizer = Canonicalizer {
        group_size: cli.group_size,
        rule: cli.rule,
    };
    info!(rule = %canonicalizer.rule, group_size = canonicalizer.group_size, "starting");
    let recognizer = Recognizer::new(geometry, canonicalizer)?;
    let mut selector = HintSelector::seeded(cli.seed.unwrap_or_else(|| rand::rng().random()));
    let mut source = FileCapture { path: cli.image };

    for refresh in 0..cli.repeat {
        if refresh > 0 {
            thread::sleep(Duration::from_millis(cli.interval));
        }

        let canonical = recognizer.refresh(&mut source)?;
        for group in &canonical.rejected {
            warn!(fingerprint = %group.fingerprint, count = group.count, "dropped unmatched tiles");
        }

        let board = &canonical.board;
        println!("{} tile types, {} tiles", board.type_count(), board.tiles_remaining());
        match selector.next_hint(board) {
            Some(hint) => {
                print!("{}", board.with_path(&hint.path));
                let clicks = [hint.path.start(), hint.path.end()]
                    .map(|location| recognizer.geometry().click_target(location));
                info!(tile = hint.tile, turns = hint.path.turns(), "hint");
                if let [Some((y1, x1)), Some((y2, x2))] = clicks {
                    println!("click ({x1}, {y1}) then ({x2}, {y2})");
                }
            }
            None => {
                print!("{}", HintView::from(board));
                println!("no hint available");
            }
        }
    }

    Ok(())
}
