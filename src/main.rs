use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use notes_term::core::config::{self, CliOverrides};
use notes_term::core::paths;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "notes-term", about = "Terminal browser for your notes")]
struct Args {
    /// Show the last-key panel and log at debug level
    #[arg(long)]
    debug: bool,

    /// Base URL of the note service
    #[arg(long)]
    url: Option<String>,

    /// Use the legacy flat-file index instead of the note service
    #[arg(long)]
    local: bool,

    /// Root directory of the legacy flat-file index
    #[arg(long)]
    notes_root: Option<PathBuf>,

    /// Editor used to open notes
    #[arg(long)]
    editor: Option<String>,

    /// Talk to the note service without logging in
    #[arg(long)]
    no_auth: bool,
}

impl From<&Args> for CliOverrides {
    fn from(args: &Args) -> Self {
        Self {
            url: args.url.clone(),
            editor: args.editor.clone(),
            notes_root: args.notes_root.clone(),
            debug: args.debug,
            local: args.local,
            no_auth: args.no_auth,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ~/.notes-term/notes-term.log
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = paths::ensure_cache_dir()
        .and_then(|_| paths::log_path())
        .and_then(File::create)
    {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, &CliOverrides::from(&args));
    log::info!(
        "notes-term starting up ({:?} backend, editor {})",
        resolved.backend,
        resolved.editor
    );

    match notes_term::tui::run(&resolved) {
        Ok(()) => {
            log::info!("Exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Fatal: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
