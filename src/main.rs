use clap::{Parser, Subcommand};
use std::path::PathBuf;
use suixiang::{config, frontmatter, generate, markup, output, scan};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "suixiang")]
#[command(about = "Static blog generator for Markdown posts with frontmatter")]
#[command(long_about = "\
Static blog generator for Markdown posts with frontmatter

Every .md file directly inside the source directory is a post. A post starts
with a frontmatter block:

  ---
  title: 春日随笔          # required
  date: 2024-03-01         # required, YYYY-MM-DD
  category: 人生感悟       # optional, defaults to posts.default_category
  excerpt: 一句话摘要      # optional, derived from the body otherwise
  pinned: true             # optional, pinned posts are listed first
  ---

Output:

  index.html               # Home page with the newest posts
  posts.html               # Every post, pinned first, then newest first
  posts/<file-name>.html   # One page per post

Run 'suixiang gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing the Markdown posts and config.toml
    #[arg(long, default_value = "markdown", global = true)]
    source: PathBuf,

    /// Site root the pages are written to
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the posts and write the site
    Build,
    /// Scan the posts and report problems without writing anything
    Check {
        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the HTML fragment rendered from one Markdown file
    Render {
        /// Markdown file, frontmatter is stripped
        file: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;

            println!("==> Scanning {}", cli.source.display());
            let result = scan::scan(&cli.source, &site_config)?;
            output::print_scan_output(&result, &cli.source);

            println!("==> Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&result.posts, &cli.output, &site_config)?;
            output::print_generate_output(&summary, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { json } => {
            if !cli.source.is_dir() {
                return Err(format!("source directory not found: {}", cli.source.display()).into());
            }
            let site_config = config::load_config(&cli.source)?;
            let result = scan::scan(&cli.source, &site_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_scan_output(&result, &cli.source);
                if result.skipped.is_empty() {
                    println!("==> Content is valid");
                }
            }
        }
        Command::Render { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let doc = frontmatter::parse(&raw);
            println!("{}", markup::render(&doc.body));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
