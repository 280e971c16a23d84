use clap::Parser;
use dohgate_domain::{parse_duration, CliOverrides, GetPayloadFormat};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "dohgate")]
#[command(version)]
#[command(about = "Dohgate - DNS-over-HTTPS gateway")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log every request at info level
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Maximum number of cached lookups in internal resolver mode
    #[arg(long)]
    capacity: Option<usize>,

    /// Forward queries to this DNS server (HOST:PORT) instead of resolving internally
    #[arg(short = 'u', long, value_name = "HOST:PORT")]
    upstream: Option<String>,

    /// Per-request timeout (e.g. 2500ms, 2.5s)
    #[arg(short = 't', long, value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// How the GET `dns` parameter is read (wire, hostname)
    #[arg(long, value_enum)]
    get_payload: Option<GetPayloadFormatArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum GetPayloadFormatArg {
    Wire,
    Hostname,
}

impl From<GetPayloadFormatArg> for GetPayloadFormat {
    fn from(arg: GetPayloadFormatArg) -> Self {
        match arg {
            GetPayloadFormatArg::Wire => GetPayloadFormat::Wire,
            GetPayloadFormatArg::Hostname => GetPayloadFormat::Hostname,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        timeout: cli.timeout,
        cache_capacity: cli.capacity,
        verbose: cli.verbose,
        get_payload: cli.get_payload.map(Into::into),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Dohgate v{}", env!("CARGO_PKG_VERSION"));

    if let Some(runtime_api) = server::lambda_runtime_api() {
        let services = di::DohServices::for_lambda(&config.gateway);
        return server::run_lambda_runtime(&runtime_api, services.handler).await;
    }

    let services = di::DohServices::new(&config.gateway).await?;

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow::anyhow!(
                "Invalid listen address {}:{}: {}",
                config.server.bind_address,
                config.server.port,
                e
            )
        })?;

    server::start_web_server(web_addr, services.state()).await?;

    info!("Server shutdown complete");
    Ok(())
}
