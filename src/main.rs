// src/main.rs
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info, Level};

use gram::config::Config;
use gram::editor::{Action, Document, Syntax};
use gram::terminal::{self, ByteReader, RawMode, Screen};

const HELP: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find | Ctrl-Z = undo | Ctrl-Y = redo";

#[derive(Parser, Debug)]
#[command(name = "gram", version, about = "A small terminal text editor")]
struct Cli {
    /// File to edit, created if it does not exist
    file: PathBuf,

    /// Append logs to this file
    #[arg(long, env = "GRAM_LOG")]
    log: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the editor, so logs only ever go to a file.
    let Some(path) = &cli.log else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(doc: &mut Document, screen: &mut Screen, reader: &mut ByteReader) -> gram::Result<()> {
    loop {
        doc.resize(terminal::window_size()?);
        screen.refresh(doc)?;
        match doc.process(reader.read_byte()?) {
            Action::Continue => {}
            Action::Save => {
                if let Err(e) = doc.save() {
                    error!(error = %e, "save failed");
                    doc.set_status(format!("Can't save! {}", e));
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = Config::load()?;
    let name = cli.file.to_string_lossy();
    let syntax = Syntax::new(config.language_for(&name), config.colour_scheme());
    info!(file = %cli.file.display(), language = ?syntax.language().extensions, "starting");

    let mut doc = Document::open(&cli.file, syntax, terminal::window_size()?)?;
    doc.set_status(HELP);

    let mut reader = ByteReader::new(terminal::READ_TIMEOUT)?;
    let mut screen = Screen::stdout();
    let raw = RawMode::enable()?;
    let result = run(&mut doc, &mut screen, &mut reader);
    let cleared = screen.clear();
    drop(raw);

    result?;
    cleared?;
    info!("exiting");
    Ok(())
}
