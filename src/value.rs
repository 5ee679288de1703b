//Jerome M. St.Martin
//Mar 8, 2023

//-----------------------------------------------------------------------------
//--------------------------- Writer Value Sources ----------------------------
//-----------------------------------------------------------------------------

use std::sync::atomic::{AtomicI32, Ordering};

use rand::Rng;

///Hands a writer the next value to put through the gate.
pub trait ValueSource: Send + Sync {
    fn next_value(&self) -> i32;
}

///Uniformly random values in 0..=max.
#[derive(Debug)]
pub struct BoundedRandom {
    max: i32,
}

impl BoundedRandom {
    pub fn new(max: i32) -> Self {
        assert!(max >= 0);
        BoundedRandom { max }
    }
}

impl ValueSource for BoundedRandom {
    fn next_value(&self) -> i32 {
        rand::thread_rng().gen_range(0..=self.max)
    }
}

///Deterministic 0, 1, 2, ... so tests can pin down exactly what was written.
#[derive(Debug, Default)]
pub struct Sequence {
    next: AtomicI32,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValueSource for Sequence {
    fn next_value(&self) -> i32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
