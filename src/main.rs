use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use storefront::application::catalogue::{Catalogue, ProductQuery, SortOrder};
use storefront::application::checkout::{PaymentStep, RetryPolicy};
use storefront::config::{AppConfig, ServiceEndpoint, StorageBackend};
use storefront::domain::payment::PaymentRequest;
use storefront::infrastructure::open_product_repository;
use storefront::infrastructure::payment_client::HttpPaymentClient;
use storefront::infrastructure::services::ServiceRegistry;
use storefront::interfaces::csv::product_reader::ProductReader;
use storefront::interfaces::csv::product_writer::ProductWriter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the payment service, overriding the configured binding.
    #[arg(long, global = true)]
    payment_url: Option<String>,

    /// Path to a persistent catalogue database. If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the payment service to authorise a charge and print its verdict as JSON
    Authorize(AuthorizeArgs),
    /// Catalogue maintenance and queries
    #[command(subcommand)]
    Catalogue(CatalogueCommand),
}

#[derive(Args)]
struct AuthorizeArgs {
    #[arg(long)]
    amount: Decimal,
    #[arg(long)]
    customer: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    card: String,
}

#[derive(Subcommand)]
enum CatalogueCommand {
    /// Load products from a CSV file
    Import { input: PathBuf },
    /// List products as CSV
    List {
        /// Products CSV loaded before listing
        #[arg(long)]
        seed: Option<PathBuf>,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long, value_enum, default_value_t = SortOrder::Sku)]
        order: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Print one product as CSV
    Get {
        sku: String,
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Print the number of products in the given categories
    Count {
        #[arg(long)]
        seed: Option<PathBuf>,
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Print every category, one per line
    Categories {
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).into_diagnostic()?,
        None => AppConfig::default(),
    };
    if let Some(url) = cli.payment_url {
        let service = config.payment.service.clone();
        let endpoint = config
            .services
            .remove(&service)
            .map(|mut endpoint| {
                endpoint.url = url.clone();
                endpoint
            })
            .unwrap_or_else(|| ServiceEndpoint::new(url));
        config.services.insert(service, endpoint);
    }
    if let Some(path) = cli.db_path {
        config.catalogue.storage = StorageBackend::RocksDb { path };
    }

    match cli.command {
        Command::Authorize(args) => authorize(&config, args).await,
        Command::Catalogue(command) => catalogue(&config, command).await,
    }
}

async fn authorize(config: &AppConfig, args: AuthorizeArgs) -> Result<()> {
    let request =
        PaymentRequest::try_from_parts(args.amount, args.customer, args.address, args.card)
            .into_diagnostic()?;

    let registry = ServiceRegistry::from_config(config);
    let client = HttpPaymentClient::bind(&registry, &config.payment.service).into_diagnostic()?;
    let policy = RetryPolicy::new(config.payment.max_retries).into_diagnostic()?;
    let step = PaymentStep::new(Box::new(client), policy);

    let response = step.authorize(&request).await.into_diagnostic()?;
    if response.is_declined() {
        warn!(
            reason = response.message.as_deref().unwrap_or("none given"),
            "payment declined"
        );
    }
    println!("{}", serde_json::to_string(&response).into_diagnostic()?);
    Ok(())
}

async fn catalogue(config: &AppConfig, command: CatalogueCommand) -> Result<()> {
    let repository = open_product_repository(&config.catalogue).into_diagnostic()?;
    let catalogue = Catalogue::new(repository);

    match command {
        CatalogueCommand::Import { input } => {
            let imported = import(&catalogue, input).await?;
            println!("imported {imported} products");
        }
        CatalogueCommand::List {
            seed,
            categories,
            order,
            page,
            size,
        } => {
            seed_from(&catalogue, seed).await?;
            let query = ProductQuery {
                categories,
                order,
                page,
                size,
            };
            let products = catalogue.list(&query).await.into_diagnostic()?;
            let stdout = io::stdout();
            ProductWriter::new(stdout.lock())
                .write_products(&products)
                .into_diagnostic()?;
        }
        CatalogueCommand::Get { sku, seed } => {
            seed_from(&catalogue, seed).await?;
            let product = catalogue.get(&sku).await.into_diagnostic()?;
            let Some(product) = product else {
                return Err(miette::miette!("no product with SKU '{sku}'"));
            };
            let stdout = io::stdout();
            ProductWriter::new(stdout.lock())
                .write_products([&product])
                .into_diagnostic()?;
        }
        CatalogueCommand::Count { seed, categories } => {
            seed_from(&catalogue, seed).await?;
            println!("{}", catalogue.count(&categories).await.into_diagnostic()?);
        }
        CatalogueCommand::Categories { seed } => {
            seed_from(&catalogue, seed).await?;
            for category in catalogue.categories().await.into_diagnostic()? {
                println!("{category}");
            }
        }
    }
    Ok(())
}

async fn seed_from(catalogue: &Catalogue, seed: Option<PathBuf>) -> Result<()> {
    if let Some(path) = seed {
        import(catalogue, path).await?;
    }
    Ok(())
}

async fn import(catalogue: &Catalogue, input: PathBuf) -> Result<usize> {
    let file = File::open(&input).into_diagnostic()?;
    let mut imported = 0;
    for product in ProductReader::new(file).products() {
        match product {
            Ok(product) => {
                catalogue.add(product).await.into_diagnostic()?;
                imported += 1;
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable product row");
            }
        }
    }
    info!(imported, path = %input.display(), "catalogue import finished");
    Ok(imported)
}
