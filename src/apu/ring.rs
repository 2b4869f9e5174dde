//! Lock-free single-producer/single-consumer sample ring.
//!
//! The emulation thread pushes one mixed sample at a time; the host's audio
//! thread drains batches. The two sides synchronize only through the atomic
//! read/write indices: the producer publishes with a Release store after the
//! slot is filled, the consumer observes with an Acquire load before reading
//! slots. Neither side ever blocks — a full ring drops the sample (a moment of
//! silence beats stalling emulation), an empty ring returns zero samples.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ring capacity in samples (~93 ms at 44.1 kHz). Power of two so the index
/// wrap is a mask.
pub const RING_CAPACITY: usize = 4096;

/// SPSC ring of 16-bit mono samples. Safe to share between exactly one
/// producing thread and one consuming thread.
pub struct SampleRing {
    buf: UnsafeCell<[i16; RING_CAPACITY]>,
    write_index: AtomicUsize,
    read_index: AtomicUsize,
}

// The UnsafeCell is only written at `write_index` by the single producer and
// only read below `write_index` by the single consumer; the Acquire/Release
// pairs on the indices order those accesses.
unsafe impl Sync for SampleRing {}
unsafe impl Send for SampleRing {}

impl SampleRing {
    pub fn new() -> Self {
        Self {
            buf: UnsafeCell::new([0; RING_CAPACITY]),
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
        }
    }

    /// Producer side: append one sample. Returns false (sample dropped) when
    /// the ring is full.
    pub fn push(&self, sample: i16) -> bool {
        let w = self.write_index.load(Ordering::Relaxed);
        let next = (w + 1) & (RING_CAPACITY - 1);
        if next == self.read_index.load(Ordering::Acquire) {
            return false;
        }
        unsafe {
            (*self.buf.get())[w] = sample;
        }
        self.write_index.store(next, Ordering::Release);
        true
    }

    /// Consumer side: copy up to `out.len()` samples, oldest first. Returns
    /// the number written; never blocks.
    pub fn read_into(&self, out: &mut [i16]) -> usize {
        let mut r = self.read_index.load(Ordering::Relaxed);
        let w = self.write_index.load(Ordering::Acquire);
        let mut n = 0;
        while n < out.len() && r != w {
            out[n] = unsafe { (*self.buf.get())[r] };
            r = (r + 1) & (RING_CAPACITY - 1);
            n += 1;
        }
        self.read_index.store(r, Ordering::Release);
        n
    }

    /// Consumer side: discard everything currently queued.
    pub fn clear(&self) {
        let w = self.write_index.load(Ordering::Acquire);
        self.read_index.store(w, Ordering::Release);
    }

    /// Samples currently queued (consumer-side estimate).
    pub fn len(&self) -> usize {
        let w = self.write_index.load(Ordering::Acquire);
        let r = self.read_index.load(Ordering::Acquire);
        w.wrapping_sub(r) & (RING_CAPACITY - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new()
    }
}
