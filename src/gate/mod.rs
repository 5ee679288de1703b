//Jerome M. St.Martin
//Mar 4, 2023

//-----------------------------------------------------------------------------
//--------------- Reader-Prioritized Gate Over One Shared Value ---------------
//-----------------------------------------------------------------------------

use std::{
    cell::UnsafeCell,
    sync::{Condvar, Mutex},
};

use crate::resource::ResourceState;

mod pass;

pub use pass::{ReadPass, WritePass};

const READ_POISON: &str = "gate mtx found poisoned during reader protocol";
const WRITE_POISON: &str = "gate mtx found poisoned during writer protocol";

///Guards one shared value for many concurrent reader and writer threads,
///giving readers priority: a writer is admitted only while the resource is
///fully idle, and an arriving reader is blocked only by an active writer,
///never by other readers. Under continuous reader traffic writers wait
///indefinitely; that is the intended trade-off, not a bug.
///
///Composition, never inheritance: the gate holds its Mutex and Condvars as
///fields. One condvar per waiter class - readers are woken with notify_all,
///writers with notify_one.
#[derive(Debug)]
pub struct SharedGate<T> {
    mtx: Mutex<ResourceState>,
    reader_cvar: Condvar,
    writer_cvar: Condvar,
    //Deref this UnsafeCell IF AND ONLY IF you hold a live pass granted by this gate.
    cell: UnsafeCell<T>,
}

//The UnsafeCell suppresses auto-Sync; sharing is sound because the pass
//protocol permits either many readers or one writer, never both.
unsafe impl<T> Sync for SharedGate<T> where T: Send + Sync {}

impl<T> SharedGate<T> {
    pub fn new(value: T) -> Self {
        SharedGate {
            mtx: Mutex::new(ResourceState::new()),
            reader_cvar: Condvar::new(),
            writer_cvar: Condvar::new(),
            cell: UnsafeCell::new(value),
        }
    }

    ///Blocks until shared-read access is granted, then returns a pass that
    ///derefs to the guarded value. Do your read and let the pass drop; a
    ///held pass keeps every writer parked.
    ///
    ///Do not request a second pass on a thread that already holds a
    ///WritePass from this gate - that thread would wait on itself.
    pub fn read(&self) -> ReadPass<'_, T> {
        let snapshot = self.enter_read();
        ReadPass::new(self, snapshot)
    }

    ///Blocks until the resource is fully idle, then returns a pass granting
    ///exclusive mutation of the guarded value until dropped.
    pub fn write(&self) -> WritePass<'_, T> {
        self.enter_write();
        WritePass::new(self)
    }

    ///True while no reader and no writer is inside the gate.
    pub fn is_idle(&self) -> bool {
        self.mtx.lock().expect(READ_POISON).is_writable()
    }

    ///Count of readers inside the gate at this instant. Reports 0 while a
    ///writer holds the exclusive phase.
    pub fn active_readers(&self) -> usize {
        self.mtx.lock().expect(READ_POISON).active_reader_count()
    }

    ///Consumes the gate and hands back the guarded value.
    pub fn into_inner(self) -> T {
        self.cell.into_inner()
    }

    //Returns the reader count snapshotted atomically with the increment,
    //this reader included. Never 0.
    fn enter_read(&self) -> usize {
        //While a writer holds the exclusive phase, wait until notified on
        //the reader condvar. wait_while releases the mutex and re-acquires
        //it on wakeup, re-checking the guard every time, so a spurious or
        //stale wakeup can never admit a reader into a write phase. Active
        //readers never make this guard true: readers don't queue behind
        //readers, which is the entire priority mechanism.
        let mut state = self
            .reader_cvar
            .wait_while(
                self.mtx.lock().expect(READ_POISON),
                |state: &mut ResourceState| state.is_write_phase(),
            )
            .expect(READ_POISON);

        state.add_reader();

        state.active_reader_count()
    }

    fn exit_read(&self) {
        let mut state = self.mtx.lock().expect(READ_POISON);

        state.remove_reader();

        if state.is_writable() {
            //Last reader out; one parked writer may take the idle resource.
            self.writer_cvar.notify_one();
        }

        //Usually a no-op, since readers never park behind readers. It still
        //runs so that any reader parked behind a writer which never got
        //scheduled onto the idle window is released here rather than never.
        if state.is_readable() {
            self.reader_cvar.notify_all();
        }
    }

    fn enter_write(&self) {
        //A writer yields to everything: the guard stays true while readers
        //are active OR another writer holds the exclusive phase, so a
        //writer proceeds only from a fully idle resource.
        let mut state = self
            .writer_cvar
            .wait_while(
                self.mtx.lock().expect(WRITE_POISON),
                |state: &mut ResourceState| !state.is_writable(),
            )
            .expect(WRITE_POISON);

        state.set_exclusive_writer();
    }

    fn exit_write(&self) {
        let mut state = self.mtx.lock().expect(WRITE_POISON);

        state.clear_exclusive_writer();

        //Reader prioritization: wake every parked reader first, then one
        //writer. The writer re-checks its guard on wakeup, so if any woken
        //reader wins the race to the mutex the writer parks again.
        self.reader_cvar.notify_all();
        self.writer_cvar.notify_one();
    }

    //Callers must hold a live pass; the pass types are the only users.
    fn value_ptr(&self) -> *mut T {
        self.cell.get()
    }
}
