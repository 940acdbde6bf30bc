use vitals::channel::Channel;
use vitals::observer::VitalsAdapter;
use vitals::simulator::Simulator;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }

    let mut seed: u64 = 2024;
    let mut ticks: u64 = 40;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" if i + 1 < args.len() => {
                seed = args[i + 1].parse().unwrap_or(seed);
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                ticks = args[i + 1].parse().unwrap_or(ticks);
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(2);
            }
        }
    }

    // Minimal demo:
    // - seeded walk, so the same invocation always prints the same run
    // - a pause halfway through freezes the snapshot for a few rounds
    // - state/health are derived fresh on every read

    let mut sim = Simulator::seeded(seed);
    sim.start();

    println!("vitals demo (seed={}, ticks={})", seed, ticks);
    print_header();

    for t in 0..ticks {
        sim.tick();
        print_row(&sim);

        if t == ticks / 2 {
            sim.pause();
            println!("-- paused: snapshot frozen, no draws consumed --");
            // These do nothing; the walk resumes exactly where it stopped.
            sim.tick();
            sim.tick();
            print_row(&sim);
            sim.start();
        }
    }

    let snap = VitalsAdapter::new(&sim).snapshot();
    println!();
    println!(
        "final: ticks={} state={} health={}",
        snap.ticks,
        snap.state.label(),
        snap.health.status.label()
    );
    for issue in &snap.health.issues {
        println!("  issue: {}", issue);
    }
}

fn print_header() {
    let names: Vec<&str> = Channel::ALL.iter().map(|c| c.name()).collect();
    println!("tick  state      health     {}", names.join("  "));
}

fn print_row(sim: &Simulator<vitals::prng::Prng>) {
    let mut cells = String::new();
    for c in Channel::ALL {
        cells.push_str(&format!("{:>8.1}", sim.snapshot().get(c)));
    }
    println!(
        "{:>4}  {:<9}  {:<9} {}",
        sim.ticks(),
        sim.state().label(),
        sim.health().status.label(),
        cells
    );
}

fn print_help() {
    println!("vitals - bounded random-walk metric simulator demo");
    println!();
    println!("Usage:");
    println!("  vitals [--seed N] [--ticks N]");
    println!();
    println!("Runs a seeded simulation, printing one row per tick with the");
    println!("derived operating state and health status. The same seed always");
    println!("produces the same run.");
}
