use clap::{Parser, Subcommand};
use gb::{collection, config, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gb")]
#[command(about = "Load and inspect a directory of blog posts")]
#[command(long_about = "\
Load and inspect a directory of blog posts

Every subdirectory of the posts directory is one post. Folder names decide
the order: the last folder is the newest post.

Content structure:

  posts/
  ├── config.toml                  # Optional settings (see gen-config)
  ├── 001-hello/
  │   ├── meta.json                # {\"title\", \"visible\", \"path\", \"id\"}
  │   └── hello.md                 # Body file named by \"path\"
  ├── 002-draft/                   # \"visible\": false → not loaded
  └── 003-second/
      ├── meta.json
      └── second.md

Folders without a readable descriptor or body are skipped; 'gb check' lists
them with the reason.")]
#[command(version)]
struct Cli {
    /// Posts directory
    #[arg(long, default_value = "posts", global = true)]
    source: PathBuf,

    /// Descriptor file name inside each post folder (overrides config.toml)
    #[arg(long, global = true)]
    meta_file: Option<String>,

    /// Show oldest posts first (overrides config.toml)
    #[arg(long, global = true)]
    oldest_first: bool,

    /// Increase log output (-v info, -vv debug); GB_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load all posts and list them in display order
    Scan,
    /// Print one post, with its body
    Show {
        /// Post id
        id: i64,
    },
    /// Load all posts and report skipped folders; fails if any folder had an error
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Command::Scan => {
            let (site_config, posts) = load_posts(&cli)?;
            output::print_scan_output(&posts, site_config.order);
        }
        Command::Show { id } => {
            let (_, posts) = load_posts(&cli)?;
            match posts.get(*id) {
                Some(post) => output::print_post_output(&posts, post),
                None => {
                    eprintln!("No post with id {id}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Check => {
            let (_, posts) = load_posts(&cli)?;
            output::print_check_output(&posts, &cli.source);
            if posts.skipped().iter().any(|s| s.is_error()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve config (`config.toml` plus CLI overrides) and load the posts directory.
fn load_posts(
    cli: &Cli,
) -> Result<(config::SiteConfig, collection::Collection), Box<dyn std::error::Error>> {
    let overrides = config::ConfigOverrides {
        meta_file: cli.meta_file.clone(),
        order: cli.oldest_first.then_some(config::DisplayOrder::OldestFirst),
    };
    let site_config = config::load_config(&cli.source)?.with_overrides(overrides)?;
    let posts = collection::load(&cli.source, &site_config)?;
    Ok((site_config, posts))
}
