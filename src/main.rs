use clap::{Parser, Subcommand};
use homepress::client::CmsClient;
use homepress::queries::NODE_TYPE;
use homepress::{config, output, sitegen};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "homepress")]
#[command(about = "Static site generator for headless-CMS real estate sites")]
#[command(long_about = "\
Static site generator for headless-CMS real estate sites

Content lives in a headless CMS exposing a GraphQL endpoint; homepress
pulls it route by route and writes a plain static site:

  dist/
  ├── index.html                   # Home: hero, featured listings, about, contact
  ├── listings/
  │   ├── index.html               # All current listings
  │   └── oak-ridge-drive/
  │       └── index.html           # One page per listing slug
  ├── about/
  │   └── index.html               # Extra URIs resolved by node type
  └── .routes-manifest.json        # Regeneration bookkeeping

Each generated route stays fresh for a configurable window (60s by
default); rebuilding within the window skips it. Pass --force to
regenerate everything.

The GraphQL endpoint comes from the environment:
  HOMEPRESS_GRAPHQL_ENDPOINT  full endpoint URL (wins when both are set)
  HOMEPRESS_CMS_URL           CMS base URL; \"/graphql\" is appended

Run 'homepress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site from the CMS
    Build {
        /// Regenerate every route, ignoring the revalidation window
        #[arg(long)]
        force: bool,
    },
    /// Validate config and CMS connectivity without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { force } => {
            let site_config = config::SiteConfig::load(&cli.config)?;
            let endpoint = config::resolve_endpoint();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let summary = runtime.block_on(async {
                let client = CmsClient::new(endpoint);
                sitegen::build(&client, &site_config, &cli.output, force).await
            })?;
            output::print_build_output(&summary);
            if summary.failed() > 0 {
                return Err(format!("{} route(s) failed", summary.failed()).into());
            }
        }
        Command::Check => {
            let site_config = config::SiteConfig::load(&cli.config)?;
            site_config.validate()?;
            println!("Config OK: {}", cli.config.display());

            let Some(endpoint) = config::resolve_endpoint() else {
                return Err(format!(
                    "no GraphQL endpoint configured: set {} or {}",
                    config::ENDPOINT_VAR,
                    config::CMS_URL_VAR
                )
                .into());
            };
            println!("Endpoint: {}", endpoint);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let client = CmsClient::new(Some(endpoint));
                client
                    .query(&NODE_TYPE, serde_json::json!({ "uri": "/" }))
                    .await
            })?;
            println!("Connectivity OK");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
