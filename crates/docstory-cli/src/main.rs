use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use docstory::config::CONFIG_FILE_NAME;
use docstory::{Story, StoryConfig, compile};
use docstory_git::GixRepo;
use tracing::debug;

mod telemetry;

/// Per-field edit history for JSON and YAML documents tracked in git
///
/// Walks every commit that touched PATH (following renames), parses each
/// version, and prints a tree mirroring the document in which every field
/// carries its timeline of changes: added, modified, deleted, expanded,
/// reduced, and moved.
///
/// CONFIGURATION:
///
///   docstory.toml at the repository root is read if present:
///
///     [history]
///     limit = 100
///
///     [parse]
///     yaml_extensions = ["yml", "yaml"]
///
///   Command-line flags override it.
#[derive(Parser)]
#[command(name = "docstory")]
#[command(version, about)]
struct Cli {
    /// Document path, relative to the repository root
    path: String,

    /// Repository to read (discovered upwards from this directory)
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Maximum number of commits to walk
    #[arg(long)]
    limit: Option<usize>,

    /// Config file [default: <repo root>/docstory.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "DOCSTORY_LOG_JSON")]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let story = run(&cli)?;
    if !story.errors.is_empty() {
        report_failures(&story);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<Story> {
    let repo = GixRepo::open(&cli.repo)
        .with_context(|| format!("could not open a git repository at {}", cli.repo.display()))?;

    let config_path = cli.config.clone().unwrap_or_else(|| {
        repo.workdir()
            .unwrap_or_else(|| Path::new(&cli.repo))
            .join(CONFIG_FILE_NAME)
    });
    debug!(config = %config_path.display(), "loading config");
    let config = StoryConfig::load(&config_path)?;

    let mut options = config.compile_options();
    if let Some(limit) = cli.limit {
        options = options.with_limit(limit);
    }

    let story = compile(&repo, &cli.path, &options)
        .with_context(|| format!("could not compile the story of {}", cli.path))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&story)
    } else {
        serde_json::to_string(&story)
    }
    .context("failed to serialize story")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write story")?;
    Ok(story)
}

fn report_failures(story: &Story) {
    let count = story.errors.len();
    eprintln!(
        "warning: {count} commit{} of {} could not be parsed",
        if count == 1 { "" } else { "s" },
        story.path
    );
    for failure in &story.errors {
        let sha = story
            .commit(failure.commit)
            .map_or("?", |commit| commit.sha.as_str());
        let short = sha.get(..12).unwrap_or(sha);
        eprintln!("  {short}  {}: {}", failure.code, failure.cause);
    }
}
