//! NES APU (Audio Processing Unit) emulation.
//!
//! - **Pulse** (×2): square waves with duty, fixed volume, length counter.
//! - **Triangle**: 32-step wave, linear counter, length counter.
//! - **Noise**: 15-bit LFSR, fixed volume, length counter.
//! - **Frame counter**: 7457-cycle divider; quarter frames clock the linear
//!   counter, half frames clock the length counters.
//! - **Output**: signed sum of the four channels, downsampled to 44.1 kHz into
//!   a lock-free single-producer/single-consumer ring.
//!
//! Envelopes, sweep, the frame IRQ and the DMC channel are not implemented.

pub mod apu;
pub mod ring;
