//Jerome M. St.Martin
//Mar 9, 2023

//-----------------------------------------------------------------------------
//--------------------- Reader & Writer Task Orchestration --------------------
//-----------------------------------------------------------------------------

use std::{fmt, thread, time::Duration};

use itertools::{Either, Itertools};
use rand::Rng;

use crate::{gate::SharedGate, report::Reporter, value::ValueSource};

///How many tasks go through the gate and how often each one does.
///
///Defaults to 5 readers and 5 writers touching the value once each; a
///read-heavy 20-reader mix is just another config. Repeat counts are kept
///separate per task class rather than hardcoded to 1.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub readers: usize,
    pub writers: usize,
    pub reads_per_task: usize,
    pub writes_per_task: usize,
    ///Upper bound of the random pause every task takes before each access,
    ///so reads and writes don't all land at once.
    pub max_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            readers: 5,
            writers: 5,
            reads_per_task: 1,
            writes_per_task: 1,
            max_delay: Duration::from_millis(10),
        }
    }
}

///Totals over a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reads: usize,
    pub writes: usize,
}

enum TaskOutcome {
    Reader(usize),
    Writer(usize),
}

///Spawns every reader and writer task, waits for all of them, and tallies
///what they did. Each task sleeps a random bounded duration, goes through
///the gate once, reports, and repeats per its configured count.
///
///Returns Err if any task panicked; the gate itself stays consistent even
///then, because each pass restores the phase while unwinding.
pub fn run(
    config: &RunConfig,
    gate: &SharedGate<i32>,
    reporter: &dyn Reporter,
    values: &dyn ValueSource,
) -> Result<RunSummary, RunError> {
    let outcomes: Vec<thread::Result<TaskOutcome>> = thread::scope(|s| {
        let mut handles = Vec::with_capacity(config.readers + config.writers);

        for _ in 0..config.readers {
            handles.push(s.spawn(|| {
                for _ in 0..config.reads_per_task {
                    sleep_jitter(config.max_delay);

                    let pass = gate.read();
                    reporter.read_line(*pass, pass.readers());
                }
                TaskOutcome::Reader(config.reads_per_task)
            }));
        }

        for _ in 0..config.writers {
            handles.push(s.spawn(|| {
                for _ in 0..config.writes_per_task {
                    sleep_jitter(config.max_delay);

                    let mut pass = gate.write();
                    let v = values.next_value();
                    *pass = v;
                    reporter.write_line(v, pass.readers());
                }
                TaskOutcome::Writer(config.writes_per_task)
            }));
        }

        //Join here, inside the scope, so a panicked task surfaces as an
        //Err outcome instead of unwinding through scope itself.
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let completed: Vec<TaskOutcome> = outcomes
        .into_iter()
        .collect::<Result<_, _>>()
        .map_err(|_| RunError("a reader or writer task panicked before completing"))?;

    let (read_counts, write_counts): (Vec<usize>, Vec<usize>) =
        completed.into_iter().partition_map(|outcome| match outcome {
            TaskOutcome::Reader(n) => Either::Left(n),
            TaskOutcome::Writer(n) => Either::Right(n),
        });

    Ok(RunSummary {
        reads: read_counts.into_iter().sum(),
        writes: write_counts.into_iter().sum(),
    })
}

fn sleep_jitter(max_delay: Duration) {
    if max_delay.is_zero() {
        return;
    }

    let nanos = rand::thread_rng().gen_range(0..=max_delay.as_nanos());
    thread::sleep(Duration::from_nanos(nanos as u64));
}

//--- Error Type ---

#[derive(Debug)]
pub struct RunError(&'static str);

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RunError {}
