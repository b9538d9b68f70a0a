//! Taginfo CLI - call the OpenStreetMap taginfo API from the command line

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use serde::Serialize;
use taginfo::api::{
    KeyCombinationsParams, KeyParams, KeyProjectsParams, PopularTagsParams,
    PrevalentValuesParams, RelationProjectsParams, SimilarKeysParams, TagProjectsParams,
};
use taginfo::catalog::CATALOG;
use taginfo::params::WireEnum;
use taginfo::{Choice, PngResponse, Response, Session, TaginfoClient};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "taginfo", version)]
#[command(about = "Query the OpenStreetMap taginfo API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs (and the endpoint listing) as JSON
    #[arg(long, global = true)]
    json: bool,

    /// API base URL [default: the public instance]
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<Url>,

    /// User agent sent with every request
    #[arg(long, global = true, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available endpoints
    Endpoints,

    /// Call a single endpoint and print its result
    Call {
        /// Endpoint id, as listed by `taginfo endpoints`
        #[arg(value_name = "ENDPOINT_ID")]
        endpoint: String,

        #[command(flatten)]
        args: CallArgs,

        /// Maximum number of list items to print
        #[arg(long, value_name = "N", default_value_t = 10)]
        max_items: usize,

        /// Write PNG results to this file instead of summarizing them
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Call every endpoint once over a shared session and log the results
    Sweep {
        /// Maximum number of list items to log per endpoint
        #[arg(long, value_name = "N", default_value_t = 10)]
        max_items: usize,
    },
}

/// Endpoint parameters. Each endpoint reads the ones it accepts.
#[derive(Args, Clone, Debug, Default)]
struct CallArgs {
    /// Tag key
    #[arg(long)]
    key: Option<String>,

    /// Tag value
    #[arg(long)]
    value: Option<String>,

    /// Relation type
    #[arg(long)]
    rtype: Option<String>,

    /// Substring filter on the results
    #[arg(long)]
    query: Option<String>,

    /// Field to sort by
    #[arg(long)]
    sortname: Option<String>,

    /// Sort order (asc, desc)
    #[arg(long)]
    sortorder: Option<String>,

    /// Object type filter (all, nodes, ways, relations)
    #[arg(long)]
    filter: Option<String>,

    /// Minimum fraction of prevalent values
    #[arg(long)]
    min_fraction: Option<f64>,

    /// Page number, starting at 1
    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,

    /// Results per page
    #[arg(long, allow_negative_numbers = true)]
    rp: Option<i64>,
}

impl CallArgs {
    /// Required string arguments left out are sent as empty, so the
    /// library reports them as invalid parameters.
    fn key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn choice<E: WireEnum>(&self, token: &Option<String>, slot: &mut Choice<E>) {
        if let Some(token) = token {
            *slot = Choice::token(token.as_str());
        }
    }

    fn pagination(&self, page: &mut i64, rp: &mut i64) {
        if let Some(p) = self.page {
            *page = p;
        }
        if let Some(r) = self.rp {
            *rp = r;
        }
    }
}

/// Result of one endpoint call, ready for printing.
enum Output {
    Json(serde_json::Value),
    Png(PngResponse),
}

fn listing<T: Serialize + Clone>(
    response: Response<Vec<T>>,
    max_items: usize,
) -> color_eyre::Result<Output> {
    Ok(Output::Json(serde_json::to_value(
        response.truncated(max_items),
    )?))
}

fn object<T: Serialize>(value: T) -> color_eyre::Result<Output> {
    Ok(Output::Json(serde_json::to_value(value)?))
}

async fn invoke(
    client: &TaginfoClient,
    endpoint: &str,
    args: &CallArgs,
    max_items: usize,
) -> color_eyre::Result<Output> {
    match endpoint {
        "key_chronology" => listing(client.key_chronology(&KeyParams::new(args.key())).await?, max_items),
        "key_combinations" => {
            let mut params = KeyCombinationsParams::new(args.key());
            params.query = args.query.clone();
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.choice(&args.filter, &mut params.filter);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.key_combinations(&params).await?, max_items)
        }
        "key_distribution_nodes" => Ok(Output::Png(
            client.key_distribution_nodes(&KeyParams::new(args.key())).await?,
        )),
        "key_distribution_ways" => Ok(Output::Png(
            client.key_distribution_ways(&KeyParams::new(args.key())).await?,
        )),
        "key_overview" => object(client.key_overview(&KeyParams::new(args.key())).await?),
        "key_prevalent_values" => {
            let mut params = PrevalentValuesParams::new(args.key());
            if let Some(min_fraction) = args.min_fraction {
                params.min_fraction = min_fraction;
            }
            args.choice(&args.filter, &mut params.filter);
            listing(client.key_prevalent_values(&params).await?, max_items)
        }
        "key_projects" => {
            let mut params = KeyProjectsParams::new(args.key());
            params.query = args.query.clone();
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.choice(&args.filter, &mut params.filter);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.key_projects(&params).await?, max_items)
        }
        "key_similar" => {
            let mut params = SimilarKeysParams::new(args.key());
            params.query = args.query.clone();
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.key_similar(&params).await?, max_items)
        }
        "key_stats" => listing(client.key_stats(&KeyParams::new(args.key())).await?, max_items),
        "relation_projects" => {
            let mut params = RelationProjectsParams::new(args.rtype.clone().unwrap_or_default());
            params.query = args.query.clone();
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.relation_projects(&params).await?, max_items)
        }
        "site_config_geodistribution" => object(client.site_config_geodistribution().await?),
        "tag_projects" => {
            let mut params =
                TagProjectsParams::new(args.key(), args.value.clone().unwrap_or_default());
            params.query = args.query.clone();
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.choice(&args.filter, &mut params.filter);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.tag_projects(&params).await?, max_items)
        }
        "tags_popular" => {
            let mut params = PopularTagsParams {
                query: args.query.clone(),
                ..Default::default()
            };
            args.choice(&args.sortname, &mut params.sortname);
            args.choice(&args.sortorder, &mut params.sortorder);
            args.pagination(&mut params.page, &mut params.rp);
            listing(client.tags_popular(&params).await?, max_items)
        }
        other => bail!("Unknown endpoint '{other}'. Run 'taginfo endpoints' to see available endpoints."),
    }
}

/// Representative arguments for every endpoint, used by `sweep`.
fn sweep_calls() -> Vec<(&'static str, CallArgs)> {
    let key = |key: &str| CallArgs {
        key: Some(key.to_string()),
        ..Default::default()
    };

    vec![
        ("key_chronology", key("highway")),
        ("key_combinations", key("highway")),
        ("key_distribution_nodes", key("amenity")),
        ("key_distribution_ways", key("highway")),
        ("key_overview", key("amenity")),
        (
            "key_prevalent_values",
            CallArgs {
                min_fraction: Some(0.01),
                filter: Some("ways".to_string()),
                ..key("highway")
            },
        ),
        ("key_projects", key("highway")),
        (
            "key_similar",
            CallArgs {
                sortname: Some("similarity".to_string()),
                sortorder: Some("desc".to_string()),
                page: Some(2),
                rp: Some(10),
                ..key("highway")
            },
        ),
        ("key_stats", key("amenity")),
        (
            "relation_projects",
            CallArgs {
                rtype: Some("route".to_string()),
                ..Default::default()
            },
        ),
        ("site_config_geodistribution", CallArgs::default()),
        (
            "tag_projects",
            CallArgs {
                value: Some("residential".to_string()),
                ..key("highway")
            },
        ),
        (
            "tags_popular",
            CallArgs {
                query: Some("addr".to_string()),
                sortname: Some("tag".to_string()),
                sortorder: Some("asc".to_string()),
                page: Some(2),
                rp: Some(10),
                ..Default::default()
            },
        ),
    ]
}

fn build_client(cli: &Cli, session: Option<Session>) -> TaginfoClient {
    let mut builder = TaginfoClient::builder().timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(user_agent) = &cli.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    if let Some(session) = session {
        builder = builder.session(session);
    }
    builder.build()
}

fn print_endpoints(json: bool) -> color_eyre::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(CATALOG)?);
        return Ok(());
    }

    for info in CATALOG {
        let pages = if info.paginated { "paged" } else { "" };
        println!(
            "{:<28} {:<16} {:<5}  {}",
            info.id, info.content_type, pages, info.description
        );
    }
    Ok(())
}

fn print_output(output: Output, destination: Option<PathBuf>) -> color_eyre::Result<()> {
    match output {
        Output::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Output::Png(png) => match destination {
            Some(path) => {
                std::fs::write(&path, png.data())
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                println!("Wrote {} bytes to {}", png.data().len(), path.display());
            }
            None => println!("PNG image, {} bytes (use --output to save it)", png.data().len()),
        },
    }
    Ok(())
}

async fn sweep(cli: &Cli, max_items: usize) -> color_eyre::Result<()> {
    let mut builder = Session::builder().timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(user_agent) = &cli.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    let client = build_client(cli, Some(builder.build()?));

    for (endpoint, args) in sweep_calls() {
        let output = invoke(&client, endpoint, &args, max_items)
            .await
            .wrap_err_with(|| format!("{endpoint} failed"))?;

        match output {
            Output::Json(value) => {
                for line in serde_json::to_string_pretty(&value)?.lines() {
                    info!(endpoint, "{line}");
                }
            }
            Output::Png(png) => info!(endpoint, bytes = png.data().len(), "PNG image"),
        }
    }
    Ok(())
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v flags
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn,taginfo=info".to_string(),
            1 => "info,taginfo=debug".to_string(),
            _ => "debug,taginfo=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(verbose >= 1)
                    .with_level(true)
                    .with_file(verbose >= 2)
                    .with_line_number(verbose >= 2)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    match &cli.command {
        Commands::Endpoints => print_endpoints(cli.json),
        Commands::Call {
            endpoint,
            args,
            max_items,
            output,
        } => {
            let client = build_client(&cli, None);
            let result = invoke(&client, endpoint, args, *max_items).await?;
            print_output(result, output.clone())
        }
        Commands::Sweep { max_items } => sweep(&cli, *max_items).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sweep_covers_catalog() {
        let swept: Vec<_> = sweep_calls().into_iter().map(|(id, _)| id).collect();
        let listed: Vec<_> = CATALOG.iter().map(|info| info.id).collect();
        assert_eq!(swept, listed);
    }

    #[test]
    fn test_negative_page_parses() {
        let cli = Cli::try_parse_from(["taginfo", "call", "tags_popular", "--page", "-1"]).unwrap();
        match cli.command {
            Commands::Call { args, .. } => assert_eq!(args.page, Some(-1)),
            _ => panic!("expected call"),
        }
    }
}
