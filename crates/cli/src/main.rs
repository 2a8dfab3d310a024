use adns_domain::{CliOverrides, RecordType};
use adns_jobs::JobRunner;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "adns")]
#[command(version)]
#[command(about = "adns - caching A/AAAA resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Upstream name server (IP or IP:port), overrides config and ADNS_NAMESERVER
    #[arg(short = 'n', long, global = true)]
    nameserver: Option<String>,

    /// Upstream query timeout in milliseconds
    #[arg(short = 't', long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve names and print one JSON response per lookup
    Lookup {
        #[arg(required = true)]
        names: Vec<String>,

        /// Query AAAA instead of A
        #[arg(long)]
        aaaa: bool,

        /// Resolve the whole list this many times
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Answer JSON lookup requests read line by line from stdin
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        nameserver: cli.nameserver.clone(),
        query_timeout: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        timeout_ms = config.dns.query_timeout,
        refresh_enabled = config.dns.refresh_enabled,
        "Starting adns v{}",
        env!("CARGO_PKG_VERSION")
    );

    let dns_services = di::DnsServices::new(&config)?;

    match cli.command {
        Command::Lookup {
            names,
            aaaa,
            repeat,
        } => {
            let record_type = if aaaa { RecordType::AAAA } else { RecordType::A };
            let failures =
                server::run_lookups(&dns_services.handle_lookup, &names, record_type, repeat)
                    .await?;

            let cached = dns_services.lookup.cache_size().await?;
            info!(failures = failures, cached = cached, "Lookups finished");
        }
        Command::Serve => {
            let shutdown = CancellationToken::new();
            let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
            if let Some(job) = dns_services.cache_refresh_job(&config) {
                runner = runner.with_cache_refresh(job);
            }
            runner.start().await;

            let result = server::serve_stdio(dns_services.handle_lookup.clone()).await;
            shutdown.cancel();
            result?;
        }
    }

    info!("Shutdown complete");
    Ok(())
}
