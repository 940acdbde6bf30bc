#![cfg_attr(not(feature = "std"), no_std)]

// no_std support: use core and alloc when std is not available
#[cfg(not(feature = "std"))]
extern crate alloc;

#[path = "core/channel.rs"]
pub mod channel;

#[path = "core/classify.rs"]
pub mod classify;

#[path = "core/health.rs"]
pub mod health;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/simulator.rs"]
pub mod simulator;

pub mod observer;
