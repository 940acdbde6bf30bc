//! Vitals Daemon - background metric simulation service
//!
//! Owns one simulator session and:
//! - drives `tick()` on a fixed cadence while running
//! - parks the tick loop entirely while paused (no catch-up on resume)
//! - serves display clients over a line-delimited JSON IPC protocol
//!
//! Nothing is persisted; a restart is a fresh session.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Notify, RwLock};
use tokio::time;
use tracing::{error, info, warn};

use vitals::channel::Channel;
use vitals::observer::VitalsAdapter;
use vitals::prng::Prng;
use vitals::simulator::{Simulator, TICK_PERIOD_MS};

mod protocol;

use protocol::{
    clamp_tick_period_ms, MetricReading, OrganismKnobs, Request, Response, StateSnapshot,
};

const DEFAULT_ADDR: &str = "127.0.0.1:9177";

#[derive(Debug, thiserror::Error)]
enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════════════════════
// Daemon State
// ═══════════════════════════════════════════════════════════════════════════

struct DaemonState {
    sim: Simulator<Prng>,
    tick_period_ms: u32,
    knobs: OrganismKnobs,
}

impl DaemonState {
    fn new(seed: u64) -> Self {
        Self {
            sim: Simulator::seeded(seed),
            tick_period_ms: TICK_PERIOD_MS as u32,
            knobs: OrganismKnobs::default(),
        }
    }

    /// Drop the current session and start over from a new seed.
    /// Keeps the running flag so a live dashboard keeps updating.
    fn reseed(&mut self, seed: u64) {
        let was_running = self.sim.is_running();
        self.sim = Simulator::seeded(seed);
        if was_running {
            self.sim.start();
        }
    }

    fn state_snapshot(&self) -> StateSnapshot {
        let snap = VitalsAdapter::new(&self.sim).snapshot();

        let readings = Channel::ALL
            .iter()
            .map(|&c| {
                let spec = self.sim.config().spec(c);
                MetricReading {
                    channel: c.name().to_string(),
                    value: snap.metrics.get(c),
                    unit: c.unit().to_string(),
                    min: spec.min,
                    max: spec.max,
                }
            })
            .collect();

        StateSnapshot {
            running: snap.running,
            ticks: snap.ticks,
            tick_period_ms: self.tick_period_ms,
            state: snap.state.label().to_string(),
            health: snap.health.status.label().to_string(),
            issues: snap.health.issues.iter().map(|s| s.to_string()).collect(),
            metrics: snap.metrics,
            readings,
            knobs: self.knobs,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Client handling
// ═══════════════════════════════════════════════════════════════════════════

async fn handle_client(
    stream: TcpStream,
    state: Arc<RwLock<DaemonState>>,
    resume: Arc<Notify>,
) -> Result<(), ClientError> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let request: Request = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                let resp = Response::Error {
                    message: format!("Invalid request: {}", e),
                };
                writer
                    .write_all(serde_json::to_string(&resp)?.as_bytes())
                    .await?;
                writer.write_all(b"\n").await?;
                continue;
            }
        };

        let response = match request {
            Request::Start => {
                let mut s = state.write().await;
                s.sim.start();
                // Wake the tick loop; it begins a fresh period from now.
                resume.notify_one();
                info!("Simulation started");
                Response::Success {
                    message: "Started".to_string(),
                }
            }
            Request::Pause => {
                let mut s = state.write().await;
                s.sim.pause();
                info!("Simulation paused at tick {}", s.sim.ticks());
                Response::Success {
                    message: "Paused".to_string(),
                }
            }
            Request::GetState => {
                let s = state.read().await;
                Response::State(Box::new(s.state_snapshot()))
            }
            Request::GetHealth => {
                let s = state.read().await;
                let report = s.sim.health();
                Response::Health {
                    status: report.status.label().to_string(),
                    issues: report.issues.iter().map(|s| s.to_string()).collect(),
                }
            }
            Request::CfgGet => {
                let s = state.read().await;
                Response::Config {
                    tick_period_ms: s.tick_period_ms,
                    knobs: s.knobs,
                }
            }
            Request::CfgSet {
                tick_period_ms,
                metabolic_rate,
                workload,
                efficiency,
            } => {
                let mut s = state.write().await;
                if let Some(ms) = tick_period_ms {
                    let clamped = clamp_tick_period_ms(ms);
                    s.tick_period_ms = clamped;
                    info!("Tick period set to {} ms", clamped);
                }
                // Organism knobs are display-side only; they never feed the walk.
                s.knobs.apply(metabolic_rate, workload, efficiency);
                Response::Config {
                    tick_period_ms: s.tick_period_ms,
                    knobs: s.knobs,
                }
            }
            Request::Reseed { seed } => {
                let mut s = state.write().await;
                s.reseed(seed);
                info!("Session reseeded (seed={})", seed);
                Response::Success {
                    message: format!("Reseeded with {}", seed),
                }
            }
            Request::Shutdown => {
                info!("Shutdown requested");
                tokio::spawn(async {
                    // Give the response a moment to flush before exiting.
                    time::sleep(Duration::from_millis(50)).await;
                    std::process::exit(0);
                });
                Response::Success {
                    message: "Shutting down".to_string(),
                }
            }
        };

        writer
            .write_all(serde_json::to_string(&response)?.as_bytes())
            .await?;
        writer.write_all(b"\n").await?;
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════

fn startup_seed() -> u64 {
    if let Ok(v) = std::env::var("VITALSD_SEED") {
        match v.trim().parse::<u64>() {
            Ok(n) => return n,
            Err(_) => warn!("Ignoring unparsable VITALSD_SEED: {}", v),
        }
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(1)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let seed = startup_seed();
    let state = Arc::new(RwLock::new(DaemonState::new(seed)));
    let resume = Arc::new(Notify::new());
    info!("Session initialized (seed={})", seed);

    let addr = std::env::var("VITALSD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Vitals daemon listening on {}", addr);

    // Tick loop task. Pausing parks the loop on `resume`; on resume a fresh
    // sleep starts the next period, so missed ticks are never replayed.
    {
        let state = Arc::clone(&state);
        let resume = Arc::clone(&resume);
        tokio::spawn(async move {
            loop {
                let (running, period_ms) = {
                    let s = state.read().await;
                    (s.sim.is_running(), s.tick_period_ms)
                };

                if !running {
                    resume.notified().await;
                    continue;
                }

                time::sleep(Duration::from_millis(period_ms as u64)).await;

                // tick() rechecks the running flag, so a pause that landed
                // during the sleep drops this arm instead of mutating.
                let mut s = state.write().await;
                s.sim.tick();
            }
        });
    }

    // Accept client connections
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("Client connected: {}", addr);
        let state = Arc::clone(&state);
        let resume = Arc::clone(&resume);

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, state, resume).await {
                error!("Client handler error: {}", e);
            }
        });
    }
}
