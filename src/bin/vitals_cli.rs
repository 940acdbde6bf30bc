//! CLI client for the `vitalsd` daemon.
//!
//! Examples:
//!   vitals-cli status
//!   vitals-cli start
//!   vitals-cli pause
//!   vitals-cli health
//!   vitals-cli period 2000
//!   vitals-cli knob workload 0.8
//!   vitals-cli reseed 42
//!   vitals-cli watch
//!
//! By default it talks to 127.0.0.1:9177; override with `--addr host:port`.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::process;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum Request {
    Start,
    Pause,
    GetState,
    GetHealth,
    CfgGet,
    CfgSet {
        #[serde(skip_serializing_if = "Option::is_none")]
        tick_period_ms: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metabolic_rate: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        workload: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        efficiency: Option<f32>,
    },
    Reseed {
        seed: u64,
    },
    Shutdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum Response {
    State(StateSnapshot),
    Health { status: String, issues: Vec<String> },
    Config { tick_period_ms: u32, knobs: Knobs },
    Success { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateSnapshot {
    running: bool,
    ticks: u64,
    tick_period_ms: u32,
    state: String,
    health: String,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    readings: Vec<MetricReading>,
    #[serde(default)]
    knobs: Knobs,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct MetricReading {
    channel: String,
    value: f64,
    #[serde(default)]
    unit: String,
    min: f64,
    max: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
struct Knobs {
    metabolic_rate: f32,
    workload: f32,
    efficiency: f32,
}

fn usage() -> ! {
    eprintln!("vitals-cli (talks to vitalsd @ 127.0.0.1:9177 by default)");
    eprintln!("Usage: vitals-cli [--addr host:port] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  status                      Show session state and metrics");
    eprintln!("  health                      Show health status and issues");
    eprintln!("  start | pause               Control the tick loop");
    eprintln!("  config                      Show tick period and knobs");
    eprintln!("  period <100-60000>          Set tick period in milliseconds");
    eprintln!("  knob <name> <0.0-1.0>       Set metabolic_rate|workload|efficiency");
    eprintln!("  reseed <seed>               Start a fresh session");
    eprintln!("  watch                       Poll status every 2s until interrupted");
    eprintln!("  shutdown                    Stop the daemon");
    process::exit(1);
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut addr = "127.0.0.1:9177".to_string();
    if args.len() >= 2 && args[0] == "--addr" {
        addr = args[1].clone();
        args.drain(0..2);
    }

    if args.is_empty() {
        usage();
    }

    (addr, args)
}

fn send_request(addr: &str, req: &Request) -> Result<Response, String> {
    let mut stream = TcpStream::connect(addr).map_err(|e| format!("connect: {e}"))?;
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .map_err(|e| format!("set_read_timeout: {e}"))?;
    let mut reader = BufReader::new(stream.try_clone().map_err(|e| format!("clone: {e}"))?);

    let line = serde_json::to_string(req).map_err(|e| format!("serialize: {e}"))?;
    stream
        .write_all(line.as_bytes())
        .and_then(|_| stream.write_all(b"\n"))
        .map_err(|e| format!("send: {e}"))?;

    let mut resp_line = String::new();
    reader
        .read_line(&mut resp_line)
        .map_err(|e| format!("recv: {e}"))?;
    serde_json::from_str(&resp_line).map_err(|e| format!("parse response: {e}"))
}

fn print_state(s: &StateSnapshot) {
    println!(
        "running={} ticks={} period={}ms state={} health={}",
        s.running, s.ticks, s.tick_period_ms, s.state, s.health,
    );
    for issue in &s.issues {
        println!("  issue: {}", issue);
    }
    for r in &s.readings {
        println!(
            "  {:<14} {:>8.1} {:<5} [{} .. {}]",
            r.channel, r.value, r.unit, r.min, r.max
        );
    }
    println!(
        "knobs: metabolic_rate={:.2} workload={:.2} efficiency={:.2}",
        s.knobs.metabolic_rate, s.knobs.workload, s.knobs.efficiency,
    );
}

fn main() {
    let (addr, args) = parse_args();
    let cmd = &args[0];

    let make_error = |msg: &str| -> ! {
        eprintln!("{}", msg);
        process::exit(1);
    };

    if cmd == "watch" {
        loop {
            match send_request(&addr, &Request::GetState) {
                Ok(Response::State(s)) => {
                    print_state(&s);
                    println!();
                }
                Ok(other) => make_error(&format!("unexpected response: {:?}", other)),
                Err(e) => make_error(&e),
            }
            thread::sleep(Duration::from_secs(2));
        }
    }

    let req = match cmd.as_str() {
        "status" => Request::GetState,
        "health" => Request::GetHealth,
        "start" => Request::Start,
        "pause" => Request::Pause,
        "config" => Request::CfgGet,
        "period" => {
            if args.len() < 2 {
                usage();
            }
            let ms: u32 = args[1]
                .parse()
                .unwrap_or_else(|_| make_error("period must be a number (100-60000)"));
            Request::CfgSet {
                tick_period_ms: Some(ms),
                metabolic_rate: None,
                workload: None,
                efficiency: None,
            }
        }
        "knob" => {
            if args.len() < 3 {
                usage();
            }
            let value: f32 = args[2]
                .parse()
                .unwrap_or_else(|_| make_error("knob value must be a number in 0.0-1.0"));
            let (mut rate, mut load, mut eff) = (None, None, None);
            match args[1].as_str() {
                "metabolic_rate" => rate = Some(value),
                "workload" => load = Some(value),
                "efficiency" => eff = Some(value),
                _ => make_error("knob must be metabolic_rate|workload|efficiency"),
            }
            Request::CfgSet {
                tick_period_ms: None,
                metabolic_rate: rate,
                workload: load,
                efficiency: eff,
            }
        }
        "reseed" => {
            if args.len() < 2 {
                usage();
            }
            let seed: u64 = args[1]
                .parse()
                .unwrap_or_else(|_| make_error("seed must be a number"));
            Request::Reseed { seed }
        }
        "shutdown" => Request::Shutdown,
        _ => usage(),
    };

    match send_request(&addr, &req) {
        Ok(Response::State(s)) => print_state(&s),
        Ok(Response::Health { status, issues }) => {
            println!("health={}", status);
            for issue in &issues {
                println!("  issue: {}", issue);
            }
        }
        Ok(Response::Config {
            tick_period_ms,
            knobs,
        }) => {
            println!(
                "period={}ms metabolic_rate={:.2} workload={:.2} efficiency={:.2}",
                tick_period_ms, knobs.metabolic_rate, knobs.workload, knobs.efficiency,
            );
        }
        Ok(Response::Success { message }) => println!("{}", message),
        Ok(Response::Error { message }) => {
            eprintln!("daemon error: {}", message);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
