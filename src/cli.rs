use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info, warn};

use crate::classify::Classifier;
use crate::config::{APP_NAME, DEFAULT_REPORT_NAME, EXCLUDED_PATTERNS};
use crate::report::Report;
use crate::ui::display::{show_entries, show_plan, show_report_written};
use crate::ui::progress::Spinner;
use crate::walker::Walker;

#[derive(Parser)]
#[command(name = "tidydir", version, about = "Walk a directory, suggest where its files belong, and report on what could be cleaned up.")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parses arguments and installs the log subscriber.
    pub fn init() -> Result<Self> {
        let cli = Self::parse();

        let subscriber = tracing_subscriber::fmt().with_max_level(log_level(cli.verbose)).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(cli)
    }

    pub fn execute(self) -> Result<()> {
        info!(app = APP_NAME, "starting");
        self.command.run()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every entry under a directory.
    Scan {
        /// Directory to walk.
        directory: PathBuf,

        /// Maximum depth below the directory (1 = direct children only).
        #[arg(short, long)]
        depth: Option<usize>,

        /// Glob pattern to skip; may be repeated.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Do not skip the built-in patterns (.git, node_modules, ...).
        #[arg(short, long)]
        all: bool,

        /// Descend into symlinked directories.
        #[arg(long)]
        follow_links: bool,
    },

    /// Show which folder each file directly under a directory belongs in.
    Plan {
        /// Directory whose files are classified.
        directory: PathBuf,

        /// Classify by extension only, ignoring name patterns.
        #[arg(long)]
        extension_only: bool,
    },

    /// Write a report of the directory tree and its deletion candidates.
    Report {
        /// Directory to analyze; the report is written inside it.
        directory: PathBuf,

        /// Report file name.
        #[arg(short, long, default_value = DEFAULT_REPORT_NAME)]
        output: String,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Scan { directory, depth, exclude, all, follow_links } => scan(&expand_home(&directory), depth, exclude, all, follow_links),
            Self::Plan { directory, extension_only } => plan(&expand_home(&directory), !extension_only),
            Self::Report { directory, output } => report(&expand_home(&directory), &output),
        }
    }
}

fn scan(root: &Path, depth: Option<usize>, exclude: Vec<String>, all: bool, follow_links: bool) -> Result<()> {
    let mut walker = Walker::new(root).sorted(true).follow_links(follow_links).exclude(exclude);
    if !all {
        walker = walker.exclude(EXCLUDED_PATTERNS.iter().copied());
    }
    if let Some(depth) = depth {
        walker = walker.max_depth(depth);
    }

    let mut entries = Vec::new();
    let mut errors = 0usize;
    for item in walker.walk().with_context(|| format!("cannot scan {}", root.display()))? {
        match item {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!("{err}");
                errors += 1;
            }
        }
    }

    show_entries(root, &entries, errors);
    Ok(())
}

fn plan(root: &Path, by_name: bool) -> Result<()> {
    let placements = Classifier::new(by_name).plan(root)?;
    show_plan(root, &placements);
    Ok(())
}

fn report(root: &Path, output: &str) -> Result<()> {
    let report_name = Path::new(output).file_name().map_or_else(|| output.to_owned(), |n| n.to_string_lossy().into_owned());

    let spinner = Spinner::new("Collecting files");
    let report = Report::collect_with(root, &report_name, SystemTime::now(), |_| spinner.inc())?;
    spinner.finish();

    let path = root.join(output);
    report.write_to(&path)?;

    show_report_written(&path);
    Ok(())
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
