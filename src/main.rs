use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use chordia::{ChordiaError, RawVoicingConfig, VoicedInterval, VoicingConfig};

/// Voice a chord timeline into MIDI pitch sets with smooth voice leading
#[derive(Parser)]
#[command(name = "chordia")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Timeline file: `start end label` or `timestamp label` lines
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file; its keys override the timeline's frontmatter
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log skipped and clamped chords
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Voiced chords and note events as JSON
    Json,
    /// One row per chord with note names
    Table,
    /// One line per note: `1.50s: C4`
    Sheet,
    /// Note sheet with guitar string and fret
    Tab,
}

fn render(
    format: Format,
    voiced: &[VoicedInterval],
    config: &VoicingConfig,
) -> Result<String, ChordiaError> {
    Ok(match format {
        Format::Json => chordia::to_json(voiced, config.velocity)?,
        Format::Table => chordia::chord_table(voiced),
        Format::Sheet => chordia::note_sheet(&chordia::to_note_events(voiced, config.velocity)),
        Format::Tab => chordia::tab_sheet(&chordia::to_note_events(voiced, config.velocity)),
    })
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    // Read input file
    let source = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let overrides = match &cli.config {
        Some(path) => match RawVoicingConfig::load(path) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => RawVoicingConfig::default(),
    };

    let (voiced, config) = match chordia::voice_timeline_with(&source, overrides) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Voicing error: {}", e);
            process::exit(1);
        }
    };
    log::info!("voiced {} chords from {}", voiced.len(), cli.input.display());

    let text = match render(cli.format, &voiced, &config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {} chords to {}", voiced.len(), path.display());
        }
        None => {
            print!("{}", text);
        }
    }
}
