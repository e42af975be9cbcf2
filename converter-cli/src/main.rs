//! Currency converter CLI
//!
//! Hosts a converter session on the command line: loads the currency list,
//! detects the local currency, converts, and prints notices on stderr.

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_client::{ExchangeRateApi, FixedLocation, IpApiLocator, StaticRates};
use converter_hex::{ConverterService, SelectionState, Session};
use converter_types::{
    AppError, CurrencyCode, FlagResolver, LocationProvider, Notice, NoticeLevel, RateTableProvider,
};

use config::Config;

type Service = ConverterService<Box<dyn RateTableProvider>, Box<dyn LocationProvider>>;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency converter", long_about = None)]
struct Cli {
    /// Use built-in reference rates and skip network access
    #[arg(long, global = true, env = "CONVERTER_OFFLINE")]
    offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available currencies with their flag images
    Currencies,
    /// Detect the local currency from this machine's IP address
    Detect,
    /// Print the flag image URL for a currency code
    Flag {
        /// Currency code, e.g. EUR
        code: String,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        amount: String,
        /// Source currency (defaults to the detected local currency)
        #[arg(long)]
        from: Option<String>,
        /// Target currency (defaults to DEFAULT_TARGET_CURRENCY, then USD)
        #[arg(long)]
        to: Option<String>,
        /// Swap source and target before converting
        #[arg(long)]
        swap: bool,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("{}. Use a three-letter code such as USD", e))
}

fn build_service(config: &Config, offline: bool) -> Result<Service> {
    let flags = FlagResolver::new(config.flag_template.clone());

    let rates: Box<dyn RateTableProvider>;
    let location: Box<dyn LocationProvider>;
    if offline {
        rates = Box::new(StaticRates::default());
        location = Box::new(FixedLocation(config.fallback_currency.clone()));
    } else {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        rates = Box::new(
            ExchangeRateApi::new(config.require_api_key()?)
                .with_base_url(config.rates_url.clone())
                .with_http_client(http.clone()),
        );
        location = Box::new(
            IpApiLocator::new(config.location_url.clone())
                .with_fallback(config.fallback_currency.clone())
                .with_http_client(http),
        );
    }

    Ok(ConverterService::new(rates, location)
        .with_flags(flags)
        .with_reference_base(config.reference_currency.clone()))
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let label = match notice.level {
            NoticeLevel::Error => "error",
            NoticeLevel::Warning => "warning",
        };
        eprintln!("{}: {}", label, notice);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,converter_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Flag { code } => {
            let flags = FlagResolver::new(config.flag_template.clone());
            if let Some(url) = flags.resolve(&code) {
                println!("{}", url);
            }
        }

        Commands::Detect => {
            let service = build_service(&config, cli.offline)?;
            match service.detect_location().await {
                Ok(code) => println!("{}", code),
                Err(e) => {
                    print_notices(&[AppError::LocationDetectionFailed(e).notice()]);
                    std::process::exit(1);
                }
            }
        }

        Commands::Currencies => {
            let session = Session::new(build_service(&config, cli.offline)?);
            session.load_currencies().await;
            print_notices(&session.take_notices());

            let currencies = session
                .snapshot()
                .map(|state| state.currencies)
                .unwrap_or_default();
            if currencies.is_empty() {
                std::process::exit(1);
            }

            let options = session.service().currency_options(&currencies);
            if cli.json {
                let listing: Vec<_> = options
                    .iter()
                    .map(|(code, flag)| serde_json::json!({ "code": code, "flag": flag }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for (code, flag) in options {
                    println!("{}  {}", code, flag.unwrap_or_default());
                }
            }
        }

        Commands::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let amount = match exchange_rates::parse_amount(&amount) {
                Ok(amount) => amount,
                Err(e) => {
                    print_notices(&[AppError::from(e).notice()]);
                    std::process::exit(1);
                }
            };

            let initial = SelectionState {
                to: Some(config.default_target.clone()),
                ..SelectionState::default()
            };
            let session = Session::with_state(build_service(&config, cli.offline)?, initial);

            if let Some(from) = from {
                session.select_from(Some(parse_currency(&from)?));
            }
            if let Some(to) = to {
                session.select_to(Some(parse_currency(&to)?));
            }

            session.mount().await;
            if swap {
                session.swap();
            }
            session.set_amount(amount);

            let outcome = session.convert().await;
            print_notices(&session.take_notices());
            session.unmount();

            match outcome {
                Some(Ok(result)) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                Some(Ok(result)) => {
                    let flags = session.service().flags();
                    tracing::info!(
                        from_flag = %flags.resolve(result.from.as_str()).unwrap_or_default(),
                        to_flag = %flags.resolve(result.to.as_str()).unwrap_or_default(),
                        "Conversion complete"
                    );
                    println!("{} {} = {} {}", amount, result.from, result, result.to);
                }
                _ => std::process::exit(1),
            }
        }
    }

    Ok(())
}
