use clap::{Parser, Subcommand};
use codecat::discover::SelectionRequest;
use codecat::logger::initialize_logger;
use codecat::output;
use codecat::runner::{Outcome, Runner};
use codecat::settings::{normalize_extension, Settings};
use codecat::Event;
use std::path::PathBuf;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Discover, filter, and concatenate files under the given paths
    Run(RunArgs),
    /// Show or initialize the settings file
    Settings(SettingsArgs),
}

#[derive(Parser, Debug, Clone)]
struct RunArgs {
    /// Files or directories to include, in order
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Extensions to include (e.g. .py); defaults come from settings
    #[arg(short = 'e', long = "ext")]
    extensions: Vec<String>,
    /// Directory names to skip entirely (exact match)
    #[arg(long = "ignore-dir")]
    ignore_dirs: Vec<String>,
    /// Filename glob patterns to skip (e.g. '*.test.js')
    #[arg(long = "ignore-file")]
    ignore_files: Vec<String>,
    /// Only include files tracked by git
    #[arg(short = 't', long)]
    tracked_only: bool,
    /// Output file path
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,
    /// Copy the output to the clipboard
    #[arg(short = 'c', long)]
    clipboard: bool,
    /// Settings file to read defaults from
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
struct SettingsArgs {
    #[arg(default_value = "codecat.json")]
    path: PathBuf,
    /// Write the default settings to the file
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let code = match cli_args.cmd {
        SubCommands::Run(args) => run(args).await,
        SubCommands::Settings(args) => settings_command(args),
    };
    if code != 0 {
        std::process::exit(code);
    }
}

async fn run(args: RunArgs) -> i32 {
    let settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                error!("{}", e);
                return 2;
            }
        },
        None => Settings::default(),
    };

    let raw_extensions = if args.extensions.is_empty() {
        &settings.extensions
    } else {
        &args.extensions
    };
    let extensions: Vec<String> = raw_extensions
        .iter()
        .map(|e| normalize_extension(e))
        .collect();
    let ignore_dirs = if args.ignore_dirs.is_empty() {
        settings.ignore_dirs.clone()
    } else {
        args.ignore_dirs.clone()
    };
    let ignore_files = if args.ignore_files.is_empty() {
        settings.ignore_files.clone()
    } else {
        args.ignore_files.clone()
    };

    let request = match SelectionRequest::new(
        args.paths.clone(),
        args.tracked_only,
        ignore_dirs,
        ignore_files,
        extensions,
    ) {
        Ok(request) => request,
        Err(e) => {
            error!("{}", e);
            return 2;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = Runner::new(tx);
    let cancel = runner.cancel_flag();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested");
            cancel.cancel();
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                Event::Progress { percent, file } => info!("[{:>3}%] {}", percent, file),
                Event::Status(message) => info!("{}", message),
            }
        }
    });

    let outcome = runner.run(request).await;
    drop(runner);
    let _ = printer.await;

    match outcome {
        Outcome::Success {
            report,
            files,
            errors,
        } => {
            info!("Concatenated {} files", files.len());
            for err in &errors {
                warn!("{}", err);
            }
            if args.clipboard {
                if let Err(e) = output::copy_to_clipboard(&report) {
                    error!("{}", e);
                    return 1;
                }
            }
            if args.out.is_some() || !args.clipboard {
                let path = args
                    .out
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("concatenated_output.txt"));
                if let Err(e) = output::write_to_file(&report, &path).await {
                    error!("{}", e);
                    return 1;
                }
            }
            output::print_summary(&report);
            0
        }
        Outcome::NoFilesFound => {
            error!("No files found based on the selected preferences");
            1
        }
        Outcome::Cancelled => {
            warn!("Run cancelled");
            130
        }
        Outcome::Fatal(message) => {
            error!("{}", message);
            1
        }
    }
}

fn settings_command(args: SettingsArgs) -> i32 {
    if args.init {
        let settings = Settings::default();
        match settings.save(&args.path) {
            Ok(()) => {
                info!("Wrote default settings to {}", args.path.display());
                0
            }
            Err(e) => {
                error!("{}", e);
                2
            }
        }
    } else {
        match Settings::load(&args.path) {
            Ok(settings) => {
                match serde_json::to_string_pretty(&settings) {
                    Ok(raw) => println!("{}", raw),
                    Err(e) => {
                        error!("{}", e);
                        return 2;
                    }
                }
                0
            }
            Err(e) => {
                error!("{}", e);
                2
            }
        }
    }
}
