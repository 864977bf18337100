use clap::{Args, Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use serde::Serialize;
use tracing::{info, instrument, level_filters::LevelFilter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopify::{
    AccessToken, Client, Transport,
    carrier::{CarrierResource, CarrierServices},
    client::DEFAULT_API_VERSION,
};

/// Manage the carrier services registered with a shop.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Config {
    /// Shop domain, e.g. `fooshop.myshopify.com`.
    #[arg(long, env = "SHOPIFY_SHOP")]
    shop: String,

    /// Admin API access token.
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: AccessToken,

    /// Admin API version.
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List carrier services.
    List,

    /// Show a carrier service.
    Get {
        /// Carrier service ID.
        id: i64,
    },

    /// Register a new carrier service.
    Create(CreateOptions),

    /// Change fields of an existing carrier service.
    Update(UpdateOptions),

    /// Delete a carrier service.
    Delete {
        /// Carrier service ID.
        id: i64,
    },
}

#[derive(Args, Debug)]
struct CreateOptions {
    /// Name shown to merchants and customers.
    #[arg(long)]
    name: String,

    /// Public URL the platform calls for rates.
    #[arg(long)]
    callback_url: String,

    /// Format of the callback response (`json` or `xml`).
    #[arg(long, default_value = "json")]
    format: String,

    /// Whether the service is active.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    active: bool,

    /// Allow merchants to request example rates from the admin.
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    service_discovery: bool,
}

#[derive(Args, Debug)]
struct UpdateOptions {
    /// Carrier service ID.
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    callback_url: Option<String>,

    #[arg(long)]
    format: Option<String>,

    #[arg(long)]
    active: Option<bool>,

    #[arg(long)]
    service_discovery: Option<bool>,
}

impl UpdateOptions {
    fn apply(self, carrier: &mut CarrierResource) {
        if let Some(name) = self.name {
            carrier.name = name;
        }
        if let Some(callback_url) = self.callback_url {
            carrier.callback_url = callback_url;
        }
        if let Some(format) = self.format {
            carrier.format = format;
        }
        if let Some(active) = self.active {
            carrier.active = active;
        }
        if let Some(service_discovery) = self.service_discovery {
            carrier.service_discovery = service_discovery;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            tracing_tree::HierarchicalLayer::default()
                .with_indent_lines(true)
                .with_indent_amount(2)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_verbose_exit(false)
                .with_verbose_entry(false)
                .with_deferred_spans(true)
                .with_bracketed_fields(true)
                .with_span_retrace(true)
                .with_targets(false),
        )
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let client = Client::with_api_version(&config.shop, &config.api_version, config.access_token)?;
    info!(base = %client.base_url(), "using shop");
    exec(client.carrier_services(), config.command).await
}

#[instrument(skip(carriers))]
async fn exec<T: Transport>(carriers: CarrierServices<T>, command: Command) -> Result<()> {
    match command {
        Command::List => print_json(&carriers.list().await?),
        Command::Get { id } => print_json(&carriers.get(id).await?),
        Command::Create(options) => {
            let carrier = CarrierResource::builder()
                .name(options.name)
                .callback_url(options.callback_url)
                .format(options.format)
                .active(options.active)
                .service_discovery(options.service_discovery)
                .build();
            let created = carriers.create(carrier).await?;
            info!(id = created.id, "created carrier service");
            print_json(&created)
        }
        Command::Update(options) => {
            let mut carrier = carriers.get(options.id).await?;
            options.apply(&mut carrier);
            print_json(&carriers.update(carrier).await?)
        }
        Command::Delete { id } => {
            carriers.delete(id).await?;
            info!(id, "deleted carrier service");
            Ok(())
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render JSON")?;
    println!("{rendered}");
    Ok(())
}
