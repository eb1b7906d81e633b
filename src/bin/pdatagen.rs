//! Generate wrapper bindings from `.pdata` schema files.
//!
//! Usage:
//!   pdatagen [OPTIONS] --out-dir DIR SCHEMA.pdata ...
//!
//! All schemas are parsed and validated together before anything is written, so a
//! broken schema leaves the output directory untouched.
//!
//! Options:
//!   --check      Compare against the files in DIR instead of writing; exit 1 on drift
//!   -v           Debug logging (PDATAGEN_LOG overrides)
//!   -q           Errors only

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use pdatagen::{parse, GenerateOptions, GeneratedFile, Generator};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pdatagen", version, about = "Generate pdata wrapper bindings")]
struct Cli {
    /// Schema files to generate from.
    #[arg(required = true)]
    schemas: Vec<PathBuf>,

    /// Directory the generated files are written to.
    #[arg(long, short = 'o')]
    out_dir: PathBuf,

    /// Check that DIR is up to date instead of writing.
    #[arg(long)]
    check: bool,

    /// Command named in the generated file headers.
    #[arg(long)]
    regenerate_command: Option<String>,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("PDATAGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(paths: &[PathBuf]) -> anyhow::Result<Vec<pdatagen::FileSpec>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let file = parse(&src).with_context(|| format!("parsing {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

/// Returns the output files whose on-disk content differs from `file`.
fn stale_outputs(dir: &Path, file: &GeneratedFile) -> Vec<PathBuf> {
    [
        (&file.wrapper_file_name, &file.wrapper),
        (&file.test_file_name, &file.tests),
    ]
    .into_iter()
    .filter_map(|(name, content)| {
        let path = dir.join(name);
        match std::fs::read_to_string(&path) {
            Ok(existing) if existing == *content => None,
            _ => Some(path),
        }
    })
    .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let files = load(&cli.schemas)?;
    let mut options = GenerateOptions::default();
    if let Some(cmd) = &cli.regenerate_command {
        options.regenerate_command = cmd.clone();
    }
    let generated = Generator::new(options)
        .generate_all(&files)
        .context("invalid schema")?;

    if cli.check {
        let stale: Vec<PathBuf> = generated
            .iter()
            .flat_map(|g| stale_outputs(&cli.out_dir, g))
            .collect();
        for path in &stale {
            eprintln!("{}: out of date", path.display());
        }
        if !stale.is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    for g in &generated {
        for (name, content) in [(&g.wrapper_file_name, &g.wrapper), (&g.test_file_name, &g.tests)] {
            let path = cli.out_dir.join(name);
            std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote");
        }
    }
    Ok(())
}
