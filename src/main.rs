use book2blog::{config, convert, output};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "book2blog")]
#[command(about = "Convert a GitBook-style book into dated blog posts")]
#[command(long_about = "\
Convert a GitBook-style book into dated blog posts

The book outline (SUMMARY.md) drives the conversion. Every linked document
becomes a post named after its creation date and outline title; the nesting
of the outline becomes the post categories.

Book structure:

  book/
  ├── book2blog.toml            # Optional settings (see gen-config)
  ├── SUMMARY.md                # Outline
  │     * [Introduction](README.md)      → categories: [Introduction]
  │     * [Guide]()                      (category only, no post)
  │       * [Install](guide/install.md)  → categories: [Guide]
  ├── README.md
  ├── guide/install.md          # '# Heading' becomes the post title
  └── assets/                   # Copied next to the posts directory;
                                # ../assets/ links become /assets/

Run 'book2blog gen-config' to print a documented book2blog.toml.")]
#[command(version)]
struct Cli {
    /// Book root (contains the outline)
    #[arg(long, short = 's', default_value = ".", global = true)]
    source: PathBuf,

    /// Posts directory (overrides posts.dir)
    #[arg(long, short = 'd', global = true)]
    dest: Option<PathBuf>,

    /// Resource directory name in the book root (overrides posts.resource_dir)
    #[arg(long, short = 'r', global = true)]
    resources: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the book into posts and copy its resources
    Convert,
    /// Show what convert would write, without touching the filesystem
    Check {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock book2blog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Command::Convert => {
            let pipeline_config = resolve_config(&cli)?;
            println!(
                "==> Converting {} → {}",
                pipeline_config.outline_path().display(),
                pipeline_config.post_dir.display()
            );
            let report = convert::convert(&pipeline_config)?;
            output::print_convert_output(&report);
        }
        Command::Check { json } => {
            let pipeline_config = resolve_config(&cli)?;
            let plan = convert::plan(&pipeline_config)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("==> Checking {}", pipeline_config.outline_path().display());
                output::print_check_output(&plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `book2blog.toml` from the book root and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<convert::PipelineConfig, config::ConfigError> {
    let book_config = config::load_config(&cli.source)?
        .with_overrides(cli.dest.as_deref(), cli.resources.as_deref())?;
    Ok(convert::PipelineConfig::from_book_config(
        &cli.source,
        &book_config,
    ))
}

/// Logs go to stderr so `check --json` output stays parseable.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "book2blog=info",
        1 => "book2blog=debug",
        _ => "book2blog=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
