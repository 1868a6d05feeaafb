//! Command execution against an application context

use super::{Command, InlinePolicy, SimulateArgs, StockCommand};
use kvguard_domain::error::{Error, Result};
use kvguard_domain::value_objects::{Consumption, Guarded, RateLimitPolicy, ReleaseOutcome};
use kvguard_infrastructure::AppContext;
use serde::Serialize;
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tracing::info;

/// Result of one command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// False when the store rejected the request (busy, limited, insufficient, down)
    pub admitted: bool,
    /// Command output
    pub body: Value,
}

impl Report {
    fn new(admitted: bool, body: Value) -> Self {
        Self { admitted, body }
    }
}

/// Run one command
pub async fn execute(context: &AppContext, command: Command) -> Result<Report> {
    match command {
        Command::Lock {
            name,
            ttl_secs,
            hold_ms,
        } => lock(context, &name, ttl(context, ttl_secs), hold_ms).await,
        Command::Stock(command) => stock(context, command).await,
        Command::Rate {
            operation,
            key,
            policy,
        } => rate(context, &operation, &key, &policy).await,
        Command::Simulate(args) => simulate(context, args).await,
        Command::Health => {
            let check = context.health().await;
            Ok(Report::new(check.status.is_healthy(), serde_json::to_value(check)?))
        }
    }
}

fn ttl(context: &AppContext, ttl_secs: Option<u64>) -> Duration {
    ttl_secs.map_or_else(|| context.default_lock_ttl(), Duration::from_secs)
}

fn release_label(release: Option<ReleaseOutcome>) -> &'static str {
    match release {
        Some(ReleaseOutcome::Released) => "released",
        Some(ReleaseOutcome::NotOwner) => "not_owner",
        None => "unknown",
    }
}

async fn lock(context: &AppContext, name: &str, ttl: Duration, hold_ms: u64) -> Result<Report> {
    let started = Instant::now();
    let (outcome, release) = context
        .guard()
        .with_lock_observed(name, ttl, || {
            tokio::time::sleep(Duration::from_millis(hold_ms))
        })
        .await?;

    Ok(match outcome {
        Guarded::Completed(()) => Report::new(
            true,
            json!({
                "lock": name,
                "outcome": "acquired",
                "ttl_ms": millis(ttl),
                "held_ms": millis(started.elapsed()),
                "release": release_label(release),
            }),
        ),
        _ => Report::new(false, json!({ "lock": name, "outcome": "busy" })),
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn stock(context: &AppContext, command: StockCommand) -> Result<Report> {
    let stock = context.stock();
    match command {
        StockCommand::Init { resource, quantity } => {
            stock.initialize(&resource, quantity).await?;
            Ok(Report::new(
                true,
                json!({ "resource": resource, "quantity": quantity }),
            ))
        }
        StockCommand::Consume { resource, amount } => {
            let consumption = stock.try_consume(&resource, amount).await?;
            let mut body = serde_json::to_value(consumption)?;
            body["resource"] = json!(resource);
            Ok(Report::new(consumption.is_consumed(), body))
        }
        StockCommand::Show { resource } => {
            let remaining = stock.remaining(&resource).await?;
            Ok(Report::new(
                true,
                json!({ "resource": resource, "remaining": remaining }),
            ))
        }
    }
}

async fn rate(
    context: &AppContext,
    operation: &str,
    key: &str,
    inline: &InlinePolicy,
) -> Result<Report> {
    let limiter = context.limiter();
    let decision = match (inline.window_secs, inline.max_count) {
        (Some(window_secs), Some(max_count)) => {
            let policy = RateLimitPolicy::new(operation, window_secs, max_count);
            limiter.allow(&policy, key).await?
        }
        _ => limiter.allow_declared(operation, key).await?,
    };

    let mut body = serde_json::to_value(decision)?;
    body["operation"] = json!(operation);
    body["key"] = json!(key);
    body["remaining"] = json!(decision.remaining());
    Ok(Report::new(decision.is_admitted(), body))
}

/// Tally of a simulation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    sold: i64,
    busy: u64,
    insufficient: u64,
}

async fn simulate(context: &AppContext, args: SimulateArgs) -> Result<Report> {
    if args.workers == 0 {
        return Err(Error::invalid_argument("simulate needs at least one worker"));
    }
    let ttl = ttl(context, args.ttl_secs);
    context.stock().initialize(&args.resource, args.initial).await?;

    let handles: Vec<_> = (0..args.workers)
        .map(|_| {
            let context = context.clone();
            let resource = args.resource.clone();
            let lock = args.lock.clone();
            let hold = Duration::from_millis(args.hold_ms);
            tokio::spawn(async move {
                let stock = context.stock();
                context
                    .guard()
                    .with_lock(&lock, ttl, || async move {
                        tokio::time::sleep(hold).await;
                        stock.try_consume(&resource, 1).await
                    })
                    .await
            })
        })
        .collect();

    let mut tally = Tally::default();
    for handle in handles {
        let outcome = handle
            .await
            .map_err(|e| Error::internal(format!("simulation worker failed: {e}")))??;
        match outcome {
            Guarded::Completed(consumption) => match consumption? {
                Consumption::Consumed { .. } => tally.sold += 1,
                Consumption::Insufficient { .. } => tally.insufficient += 1,
            },
            Guarded::LockBusy { .. } | Guarded::RateLimited { .. } => tally.busy += 1,
        }
    }

    let remaining = context.stock().remaining(&args.resource).await?.unwrap_or(0);
    let consistent = args.initial - remaining == tally.sold;
    info!(
        resource = %args.resource,
        workers = args.workers,
        sold = tally.sold,
        busy = tally.busy,
        remaining,
        "simulation finished"
    );

    Ok(Report::new(
        consistent,
        json!({
            "resource": args.resource,
            "initial": args.initial,
            "workers": args.workers,
            "sold": tally.sold,
            "busy": tally.busy,
            "insufficient": tally.insufficient,
            "remaining": remaining,
            "consistent": consistent,
        }),
    ))
}
