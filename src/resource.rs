//Jerome M. St.Martin
//Mar 2, 2023

//-----------------------------------------------------------------------------
//-------------------- Resource Phase Counter & Predicates --------------------
//-----------------------------------------------------------------------------

///Single source of truth for the gate's phase. Lives inside the gate's
///Mutex, so every caller of these methods necessarily holds the lock.
///
///Encoding of phase_counter:
/// 0 => idle: readable and writable
/// n > 0 => shared-read: n active readers, not writable
///-1 => exclusive-write: one active writer, not readable
///
///Invariant: phase_counter never drops below -1, and is never incremented
///while at -1. Every transition below asserts its precondition; violating
///one means the gate protocol itself is broken, not a runtime condition.
#[derive(Debug)]
pub(crate) struct ResourceState {
    phase_counter: isize,
}

impl ResourceState {
    pub(crate) fn new() -> Self {
        ResourceState { phase_counter: 0 }
    }

    pub(crate) fn is_writable(&self) -> bool {
        self.phase_counter == 0
    }

    pub(crate) fn is_readable(&self) -> bool {
        self.phase_counter >= 0
    }

    pub(crate) fn is_write_phase(&self) -> bool {
        self.phase_counter == -1
    }

    ///Precondition: not in exclusive-write phase.
    pub(crate) fn add_reader(&mut self) {
        debug_assert!(
            self.phase_counter >= 0,
            "add_reader during exclusive-write phase"
        );
        self.phase_counter += 1;
    }

    ///Precondition: at least one active reader.
    pub(crate) fn remove_reader(&mut self) {
        debug_assert!(
            self.phase_counter > 0,
            "remove_reader with no active readers"
        );
        self.phase_counter -= 1;
    }

    ///Precondition: idle.
    pub(crate) fn set_exclusive_writer(&mut self) {
        debug_assert!(
            self.phase_counter == 0,
            "set_exclusive_writer while not idle"
        );
        self.phase_counter = -1;
    }

    ///Precondition: in exclusive-write phase.
    pub(crate) fn clear_exclusive_writer(&mut self) {
        debug_assert!(
            self.phase_counter == -1,
            "clear_exclusive_writer outside exclusive-write phase"
        );
        self.phase_counter = 0;
    }

    ///Reports 0 while a writer holds the exclusive phase.
    pub(crate) fn active_reader_count(&self) -> usize {
        self.phase_counter.max(0) as usize
    }
}
