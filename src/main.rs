//Jerome M. St.Martin
//Mar 9, 2023

use std::env::args;

use rw_it::{run, BoundedRandom, ConsoleReporter, RunConfig, SharedGate};

const USAGE: &str = "usage: rw_it [readers] [writers] [repeats]";

fn main() -> Result<(), String> {
    let config = parse_args()?;

    let gate = SharedGate::new(0);
    let reporter = ConsoleReporter;
    let values = BoundedRandom::new(99);

    let summary = run(&config, &gate, &reporter, &values).map_err(|e| e.to_string())?;

    println!(
        "done: {} reads, {} writes, final value {}",
        summary.reads,
        summary.writes,
        gate.into_inner()
    );

    Ok(())
}

//All three positions are optional; defaults are 5 readers, 5 writers,
//1 access each.
fn parse_args() -> Result<RunConfig, String> {
    let argv: Vec<String> = args().skip(1).collect();

    if argv.len() > 3 {
        return Err(format!("too many arguments; {}", USAGE));
    }

    let mut parsed = argv
        .iter()
        .map(|arg| {
            arg.parse::<usize>()
                .map_err(|_| format!("'{}' is not a non-negative integer; {}", arg, USAGE))
        });

    let mut config = RunConfig::default();

    if let Some(n) = parsed.next() {
        config.readers = n?;
    }
    if let Some(n) = parsed.next() {
        config.writers = n?;
    }
    if let Some(n) = parsed.next() {
        let repeats = n?;
        config.reads_per_task = repeats;
        config.writes_per_task = repeats;
    }

    Ok(config)
}
