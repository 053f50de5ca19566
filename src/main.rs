use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use lsx::{LsError, StdSink};

/// List information about the FILEs (the current directory by default).
#[derive(Parser, Debug)]
#[command(name = "lsx", version, disable_help_flag = true)]
struct Cli {
    /// use a long listing format
    #[arg(short = 'l', long = "long")]
    long: bool,

    /// do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    show_all: bool,

    /// list subdirectories recursively as a tree
    #[arg(short = 't', long = "tree")]
    tree: bool,

    /// with -l, print sizes like 1.5KB
    #[arg(short = 'h', long = "human-readable")]
    human_readable: bool,

    /// prefix names with a file-type icon
    #[arg(short = 'i', long = "icons")]
    icons: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LSX_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Lstat, so a dangling symlink still counts as an existing target
    if let Some(missing) = cli.paths.iter().find(|p| fs::symlink_metadata(p).is_err()) {
        eprintln!(
            "Error: Invalid value for '[PATHS]...': Path '{}' does not exist.",
            missing.display()
        );
        return ExitCode::from(2);
    }

    let mut sink = StdSink::stdio();
    let result = lsx::listing()
        .paths(cli.paths)
        .long(cli.long)
        .show_all(cli.show_all)
        .tree(cli.tree)
        .human_readable(cli.human_readable)
        .icons(cli.icons)
        .run(&mut sink);

    match result {
        Ok(results) if results.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(LsError::Output(e)) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            ExitCode::from(2)
        }
    }
}
