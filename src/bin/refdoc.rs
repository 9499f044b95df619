//! refdoc CLI - Generate mkdocstrings reference pages for Python packages.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use refdoc::config::{load_file_config, GeneratorConfig};
use refdoc::errors::{exit_code, RefDocError};
use refdoc::generator::{self, GenerateReport};
use refdoc::sink::{FsSink, MemorySink};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refdoc")]
#[command(about = "Generate mkdocstrings reference pages for Python packages")]
#[command(version)]
struct Cli {
    /// Log each module decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Package source directory (the directory holding the root __init__.py)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Package name used in directive identifiers (defaults to the directory name)
    #[arg(long)]
    package: Option<String>,

    /// Config file (defaults to ./refdoc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory under the docs root that pages are written to
    #[arg(long)]
    output_prefix: Option<String>,

    /// Mark a document path or glob as hand-written
    #[arg(long = "override")]
    overrides: Vec<String>,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Skip source files matched by .gitignore and .ignore files
    #[arg(long)]
    respect_gitignore: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate reference pages and the navigation manifest
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Docs root to write into
        #[arg(long, default_value = "docs")]
        out: PathBuf,

        /// Root that edit paths are relative to (defaults to the source directory's parent)
        #[arg(long)]
        repo_root: Option<PathBuf>,

        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how each module would be handled
    Plan {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the navigation manifest
    Nav {
        #[command(flatten)]
        source: SourceArgs,

        /// Render as a tree outline instead of literate-nav Markdown
        #[arg(long)]
        outline: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_output = json_flag(&cli.command);

    let result = match cli.command {
        Commands::Generate {
            source,
            out,
            repo_root,
            dry_run,
            json,
        } => run_generate(source, out, repo_root, dry_run, json),
        Commands::Plan { source, json } => run_plan(source, json),
        Commands::Nav { source, outline } => run_nav(source, outline),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "refdoc", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if json_output {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }

            let payload = ErrorOutput {
                error: e.to_string(),
            };

            let json = serde_json::to_string(&payload)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            eprintln!("{json}");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "refdoc=debug" } else { "refdoc=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn json_flag(cmd: &Commands) -> bool {
    match cmd {
        Commands::Generate { json, .. } => *json,
        Commands::Plan { json, .. } => *json,
        Commands::Nav { .. } => false,
        Commands::Completions { .. } => false,
    }
}

/// Layer config file values and CLI flags over the defaults.
fn resolve_config(args: &SourceArgs) -> Result<GeneratorConfig, RefDocError> {
    let file = load_file_config(args.config.as_deref())?;
    let mut config = GeneratorConfig::from_file(file)?;

    if let Some(package) = &args.package {
        config.package = Some(package.clone());
    }
    if let Some(prefix) = &args.output_prefix {
        config.output_prefix = prefix.trim_matches('/').to_string();
    }
    for pattern in &args.overrides {
        config.add_manual_override(pattern)?;
    }
    if args.include_hidden {
        config.walk.include_hidden = true;
    }
    if args.respect_gitignore {
        config.walk.respect_gitignore = true;
    }

    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), RefDocError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| RefDocError::Io(std::io::Error::other(e.to_string())))?;
    println!("{json}");
    Ok(())
}

// --- Generate command ---

fn run_generate(
    source: SourceArgs,
    out: PathBuf,
    repo_root: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<(), RefDocError> {
    let mut config = resolve_config(&source)?;
    if repo_root.is_some() {
        config.repo_root = repo_root;
    }

    let report = if dry_run {
        let mut sink = MemorySink::new();
        generator::generate(&source.path, &config, &mut sink)?
    } else {
        let mut sink = FsSink::new(&out);
        let report = generator::generate(&source.path, &config, &mut sink)?;
        sink.finish()?;
        report
    };

    if json {
        return print_json(&report);
    }

    let stdout = std::io::stdout();
    let mut out_writer = BufWriter::new(stdout.lock());
    let verb = if dry_run { "Would generate" } else { "Generated" };
    writeln!(
        out_writer,
        "{} {} pages for `{}` ({} skipped, {} hand-written)",
        verb,
        report.pages.len(),
        report.package,
        report.skipped.len(),
        report.overridden.len()
    )
    .ok();
    writeln!(
        out_writer,
        "Navigation: {}",
        out.join(&report.nav_path).display()
    )
    .ok();

    Ok(())
}

// --- Plan command ---

fn run_plan(source: SourceArgs, json: bool) -> Result<(), RefDocError> {
    let config = resolve_config(&source)?;
    let report = generator::plan(&source.path, &config)?;

    if json {
        return print_json(&report);
    }

    print!("{}", format_plan(&report));
    Ok(())
}

fn format_plan(report: &GenerateReport) -> String {
    let mut lines = Vec::with_capacity(report.pages.len() + report.skipped.len());

    for page in &report.pages {
        lines.push(format!("page  {:40} {}", page.output_path, page.identifier));
    }
    for module in &report.overridden {
        lines.push(format!("keep  {:40} (hand-written)", module.doc_path));
    }
    for module in &report.skipped {
        lines.push(format!("skip  {:40} ({})", module.source, module.reason));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

// --- Nav command ---

fn run_nav(source: SourceArgs, outline: bool) -> Result<(), RefDocError> {
    let config = resolve_config(&source)?;
    let report = generator::plan(&source.path, &config)?;

    if outline {
        print!("{}", report.nav.render_outline(&report.package));
    } else {
        print!("{}", report.manifest());
    }
    Ok(())
}
