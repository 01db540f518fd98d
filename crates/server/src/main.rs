mod api;
mod background;
mod router;
mod state;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use oncall_core::{Config, RosterConfig};
use oncall_duty::{AnnouncementScheduler, DutyLookupService};
use oncall_notify::{DingTalkNotifier, Notifier, NullNotifier};
use oncall_store::DutyTableStore;

use crate::state::AppState;

fn load_config() -> Config {
    oncall_core::config::load_dotenv();
    Config::from_env()
}

/// Build the outbound channel: DingTalk when a webhook is configured,
/// otherwise a logging null channel.
fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    if config.dingtalk.webhook_url.trim().is_empty() {
        warn!("DINGTALK_WEBHOOK not set, notifications will be logged and dropped");
        return Ok(Arc::new(NullNotifier));
    }
    let notifier = DingTalkNotifier::new(
        config.dingtalk.webhook_url.clone(),
        config.dingtalk.secret.clone(),
        std::time::Duration::from_secs(config.dingtalk.timeout_secs),
    )?;
    Ok(Arc::new(notifier))
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let rosters = RosterConfig::load(&config.schedule.roster_file)?;
    rosters.validate()?;
    info!(
        duty = rosters.duty.len(),
        bug = rosters.bug.len(),
        "rosters loaded"
    );

    let notifier = build_notifier(config)?;
    let lookup = DutyLookupService::new(
        rosters,
        DutyTableStore::new(&config.schedule.table_file),
        notifier.clone(),
        config.schedule.download_url.clone(),
    );
    let state = Arc::new(AppState {
        lookup,
        notifier,
        table_path: config.schedule.table_file.clone(),
    });

    let scheduler = AnnouncementScheduler::new(
        &config.schedule.morning_cron,
        &config.schedule.evening_cron,
    )?;
    background::spawn_announcer(state.clone(), scheduler);

    let app = router::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Generate a fresh table from the roster and print the fairness analysis.
fn generate(config: &Config, start: Option<&str>) -> anyhow::Result<()> {
    let rosters = RosterConfig::load(&config.schedule.roster_file)?;
    rosters.validate()?;

    let start_date = match start {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => chrono::Local::now().date_naive(),
    };

    let table = oncall_rotation::generate(&rosters.duty, start_date, None)?;
    DutyTableStore::new(&config.schedule.table_file).save(&table)?;
    println!(
        "generated {} days starting {} -> {}",
        table.len(),
        start_date,
        config.schedule.table_file.display()
    );

    let report = oncall_rotation::check(&table);
    println!("balance check: {}", if report.passed { "passed" } else { "FAILED" });
    for violation in &report.violations {
        println!("  violation: {}", violation);
    }
    for (person, stats) in &report.stats {
        println!(
            "  {}: {} days, gap {:?}..{:?}, {} weekend days",
            person, stats.total_days, stats.min_gap, stats.max_gap, stats.weekend_days
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("serve") | None => serve(&config).await?,
        Some("generate") => generate(&config, args.get(2).map(|s| s.as_str()))?,
        _ => {
            println!("oncall-server v{}", env!("CARGO_PKG_VERSION"));
            println!("Usage: oncall-server <command>");
            println!("  serve                    Start HTTP server and announcement loop (default)");
            println!("  generate [YYYY-MM-DD]    Generate the rotation table and print a balance report");
        }
    }

    Ok(())
}
