use anyhow::{Context, Result};
use clap::Parser;
use index_stamp::config::{FileConfig, Settings};
use index_stamp::patch::{self, Options, Patch};
use index_stamp::version::VersionLabel;
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;

/// Stamps a version label into the footer of an HTML file and adds meta tags to its head.
#[derive(Parser)]
#[command(author, version = env!("GIT_VERSION"), about, long_about = None)]
struct Cli {
    /// HTML file to patch in place
    #[clap(index = 1)]
    file: PathBuf,

    /// fail if </footer> or </head> is missing
    #[arg(long)]
    strict: bool,

    /// skip insertions a previous run already made
    #[arg(long)]
    once: bool,

    /// print the patched document instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// yaml or json file with head tag values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "SITE_VERIFICATION")]
    site_verification: Option<String>,

    #[arg(long, env = "PAYMENT_POINTER")]
    payment_pointer: Option<String>,

    /// directory to run git in
    #[arg(long)]
    repo: Option<PathBuf>,
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let file_config = cli
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()
        .context("loading config")?;
    let settings = Settings::resolve(file_config, cli.site_verification, cli.payment_pointer);

    let label = VersionLabel::current(cli.repo.as_deref()).context("reading git commit")?;
    debug!("version label: {}", label);

    let options = Options {
        strict: cli.strict,
        once: cli.once,
        dry_run: cli.dry_run,
    };
    let applied = patch::patch_file(&cli.file, &Patch::new(label, settings), &options)
        .with_context(|| format!("patching {}", cli.file.display()))?;

    if cli.dry_run {
        write!(out, "{}", applied.contents)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli, &mut io::stdout().lock())
}
