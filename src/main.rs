use clap::{Parser, Subcommand};
use simple_docs::content::{self, ContentSource};
use simple_docs::render::{self, RenderedPage};
use simple_docs::search::SearchIndex;
use simple_docs::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-docs")]
#[command(about = "Static generator for single-page reference sites")]
#[command(long_about = "\
Static generator for single-page reference sites

A JSON content document of sections and topic cards becomes one
self-contained page with search, a scrollspy table of contents, a
light/dark theme and copy-to-clipboard code blocks.

Source structure:

  site/
  ├── config.toml      # Site config (optional)
  └── content.json     # Content document (or set content_url in config)

Content document:

  {
    \"sections\": [
      {
        \"id\": \"basics\",
        \"title\": \"Basics\",
        \"topics\": [
          {
            \"id\": \"variables\",
            \"title\": \"Variables\",
            \"icon\": \"<svg>...</svg>\",
            \"content\": {
              \"description\": \"Bindings are immutable by default.\",
              \"code\": \"let x = 5;<br>let mut y = 6;\"
            }
          }
        ]
      }
    ]
  }

Run 'simple-docs gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory holding config.toml and content.json
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log pipeline steps at info level (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the content document and write the site
    Build,
    /// Validate config and content without writing anything
    Check,
    /// Run a query against the content's search index
    Search {
        /// Text to look for in titles, descriptions and code
        query: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let source = ContentSource::from_config(&cli.source, &site_config);
            tracing::info!(%source, "loading content");

            let page = load_page(&source, &site_config);
            let summary = generate::generate(&page, &site_config, &cli.output)?;
            output::print_generate_output(&summary);
            tracing::info!(output = %cli.output.display(), "build complete");
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            let source = ContentSource::from_config(&cli.source, &site_config);
            let doc = content::load(&source)?;
            output::print_load_output(&doc, &source);
            println!();

            let issues = content::validate(&doc);
            output::print_check_output(&issues);
            let errors = issues.iter().filter(|i| i.is_error()).count();
            if errors > 0 {
                return Err(format!("content has {} error(s)", errors).into());
            }
        }
        Command::Search { query } => {
            let site_config = config::load_config(&cli.source)?;
            let source = ContentSource::from_config(&cli.source, &site_config);
            let doc = content::load(&source)?;
            let page = render::render_content(&doc, &site_config.copy.label);
            let index = SearchIndex::build(&page);
            tracing::debug!(records = index.len(), "search index built");
            let outcome = index.search(&query, &site_config.search);
            output::print_search_output(&query, &outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load and render the content; a load failure becomes the error page.
fn load_page(source: &ContentSource, site_config: &config::SiteConfig) -> RenderedPage {
    match content::load(source) {
        Ok(doc) => {
            for issue in content::validate(&doc) {
                if issue.is_error() {
                    tracing::warn!("{}", issue);
                } else {
                    tracing::debug!("{}", issue);
                }
            }
            render::render_content(&doc, &site_config.copy.label)
        }
        Err(err) => {
            tracing::error!(%source, error = %err, "failed to load page content");
            render::render_error(&err)
        }
    }
}
