//Jerome M. St.Martin
//Mar 6, 2023

//-----------------------------------------------------------------------------
//--------------------- RAII Passes Through the SharedGate --------------------
//-----------------------------------------------------------------------------

use std::ops::{Deref, DerefMut};

use super::SharedGate;

///What you get when the gate grants shared-read access. Derefs to the
///guarded value. These should NOT be held long-term: do your read then let
///the pass drop, else every writer stays parked for as long as you linger.
///
///Dropping runs the reader exit protocol on every path out of the read
///section, a panic mid-read included.
#[derive(Debug)]
pub struct ReadPass<'a, T> {
    gate: &'a SharedGate<T>,
    readers: usize,
}

impl<'a, T> ReadPass<'a, T> {
    pub(super) fn new(gate: &'a SharedGate<T>, readers: usize) -> Self {
        ReadPass { gate, readers }
    }

    ///Count of active readers at the instant this pass was granted, this
    ///reader included; captured atomically with the reader increment.
    ///Always at least 1.
    pub fn readers(&self) -> usize {
        self.readers
    }
}

impl<T> Deref for ReadPass<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        //A live ReadPass means the phase counter is positive, so no writer
        //can touch the cell until this pass has dropped.
        unsafe { &*self.gate.value_ptr() }
    }
}

impl<T> Drop for ReadPass<'_, T> {
    fn drop(&mut self) {
        self.gate.exit_read();
    }
}

///What you get when the gate grants exclusive-write access. Derefs to the
///guarded value, mutably too. Same rule as ReadPass: write and let it drop.
///
///Dropping runs the writer exit protocol, which wakes all parked readers
///before offering the idle resource to one parked writer.
#[derive(Debug)]
pub struct WritePass<'a, T> {
    gate: &'a SharedGate<T>,
}

impl<'a, T> WritePass<'a, T> {
    pub(super) fn new(gate: &'a SharedGate<T>) -> Self {
        WritePass { gate }
    }

    ///Count of active readers while this pass is held. The exclusive phase
    ///admits no readers, so this reports 0 for every live WritePass.
    pub fn readers(&self) -> usize {
        self.gate.active_readers()
    }
}

impl<T> Deref for WritePass<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { &*self.gate.value_ptr() }
    }
}

impl<T> DerefMut for WritePass<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        //A live WritePass means the phase counter is -1: no reader holds
        //the cell and no second writer can, so this &mut is unique.
        unsafe { &mut *self.gate.value_ptr() }
    }
}

impl<T> Drop for WritePass<'_, T> {
    fn drop(&mut self) {
        self.gate.exit_write();
    }
}
