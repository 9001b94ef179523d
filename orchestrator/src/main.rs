//! taranis-load: drive the request orchestrator against a live backend
//!
//! Issues one orchestrated call (or a series of auto-refresh polls) and prints
//! the resulting page regions.

use std::time::Duration;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};

use orchestrator::{
    DispatchOutcome, HeadlessPage, HttpBackendClient, OrchestratorConfig, RecordingScriptHost, Region,
    RequestOrchestrator, SessionHistory,
};
use shared::{RequestDescriptor, logging};

#[derive(Parser, Debug)]
#[command(name = "taranis-load")]
#[command(about = "Issue Taranis load calls through the request orchestrator")]
struct Cli {
    /// Backend script root (overrides TARANIS_SCRIPT_ROOT)
    #[arg(long)]
    script_root: Option<String>,

    /// CSRF token sent with every load call (overrides TARANIS_CSRF_TOKEN)
    #[arg(long)]
    csrf_token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct RouteArgs {
    #[arg(long)]
    module: String,

    #[arg(long)]
    page: String,

    #[arg(long)]
    action: String,

    /// `&`-joined key=value pairs with percent-encoded values
    #[arg(long)]
    query: Option<String>,
}

impl RouteArgs {
    fn descriptor(&self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::new(&self.module, &self.page, &self.action);
        match &self.query {
            Some(query) => descriptor.with_query(query),
            None => descriptor,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a single call and print the page regions
    Dispatch {
        #[command(flatten)]
        route: RouteArgs,

        #[arg(long)]
        auto_refresh: bool,

        #[arg(long)]
        first_page_load: bool,
    },
    /// Repeat a call as a background auto-refresh poll
    Poll {
        #[command(flatten)]
        route: RouteArgs,

        #[arg(long, default_value = "60")]
        interval_secs: u64,

        /// Number of polls; 0 polls until interrupted
        #[arg(long, default_value = "0")]
        count: u64,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<OrchestratorConfig> {
    let _ = dotenv::dotenv();

    let config = match (&cli.script_root, OrchestratorConfig::from_env()) {
        (Some(root), Ok(config)) => config.with_script_root(root)?,
        (Some(root), Err(_)) => OrchestratorConfig::new(root, "")?,
        (None, result) => result.context("set TARANIS_SCRIPT_ROOT or pass --script-root")?,
    };

    Ok(match &cli.csrf_token {
        Some(token) => config.with_csrf_token(token),
        None => config,
    })
}

fn print_page(page: &HeadlessPage, outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Applied { updates, callback_invoked } => {
            println!("applied {updates} update(s), callback invoked: {callback_invoked}");
        }
        DispatchOutcome::Failed(failure) => {
            let status = failure.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
            println!("failed: {} (status {}) {}", failure.reason, status, failure.url);
        }
    }

    for region in [Region::Filters, Region::Content, Region::Dialog, Region::MiniDashboard] {
        if let Some(html) = page.region(region) {
            println!("--- {region} ---\n{html}");
        }
    }

    if let Some(login) = page.navigated_to() {
        println!("session expired, login at {login}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(Some(&cli.log_level));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logging::log_error("Configuration", &e);
            return Err(e);
        }
    };
    tracing::info!("🌐 Using backend at {}", config.script_root);

    let backend = HttpBackendClient::new(config)?;
    let page = HeadlessPage::new();
    let orchestrator = RequestOrchestrator::new(
        backend,
        page.clone(),
        SessionHistory::new(),
        RecordingScriptHost::new(),
    );

    match &cli.command {
        Command::Dispatch {
            route,
            auto_refresh,
            first_page_load,
        } => {
            let mut descriptor = route.descriptor();
            descriptor.is_auto_refresh = *auto_refresh;
            descriptor.is_first_page_load = *first_page_load;

            let outcome = orchestrator.dispatch(descriptor, false).await;
            print_page(&page, &outcome);
        }
        Command::Poll {
            route,
            interval_secs,
            count,
        } => {
            let mut interval = tokio::time::interval(Duration::from_secs((*interval_secs).max(1)));
            let mut polls = 0u64;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let outcome = orchestrator.dispatch(route.descriptor().auto_refresh(), true).await;
                        polls += 1;
                        print_page(&page, &outcome);
                        if page.navigated_to().is_some() || (*count > 0 && polls >= *count) {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        logging::log_success("Polling interrupted");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
