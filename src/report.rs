//Jerome M. St.Martin
//Mar 8, 2023

//-----------------------------------------------------------------------------
//----------------------------- Access Reporting ------------------------------
//-----------------------------------------------------------------------------

use std::sync::Mutex;

const LINES_POISON: &str = "lines mtx found poisoned in report.rs";

///Sink for the one line each completed access emits. Readers report the
///value they saw and how many readers were present when they saw it;
///writers report the value they wrote and the reader head count at write
///time, which a correct gate keeps at exactly 0. A nonzero count in a
///write_line call is a gate bug, never a reporter concern.
pub trait Reporter: Send + Sync {
    fn read_line(&self, value: i32, readers: usize);
    fn write_line(&self, value: i32, readers: usize);
}

///One recorded access, as captured by MemoryReporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine {
    Read { value: i32, readers: usize },
    Write { value: i32, readers: usize },
}

///Prints each access to stdout, one human-readable line per access.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn read_line(&self, value: i32, readers: usize) {
        println!("read {} with {} readers present", value, readers);
    }

    fn write_line(&self, value: i32, readers: usize) {
        println!("wrote {} with {} readers present", value, readers);
    }
}

///Captures every line in memory so tests can assert on exactly what a run
///emitted.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<ReportLine>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    ///Snapshot of everything reported so far, in arrival order.
    pub fn lines(&self) -> Vec<ReportLine> {
        self.lines.lock().expect(LINES_POISON).clone()
    }
}

impl Reporter for MemoryReporter {
    fn read_line(&self, value: i32, readers: usize) {
        self.lines
            .lock()
            .expect(LINES_POISON)
            .push(ReportLine::Read { value, readers });
    }

    fn write_line(&self, value: i32, readers: usize) {
        self.lines
            .lock()
            .expect(LINES_POISON)
            .push(ReportLine::Write { value, readers });
    }
}
