//! Edge-triggered "load more" for scrollable views.
//!
//! The core is [`EdgeScrollTrigger`], a small state machine that turns scroll
//! samples into load requests and suppresses duplicates until the host
//! reports completion or a timeout elapses. [`ScrollBinding`] attaches it to a
//! UI layer's scroll events, and [`EffectRunner`] supplies the clock and
//! timers on tokio.

pub mod binding;
pub mod config;
pub mod error;
pub mod log;
pub mod runtime;
pub mod sample;
pub mod trigger;

pub use binding::{Dispatch, Propagation, ScrollBinding};
pub use config::{Config, TriggerConfig};
pub use error::{ConfigError, DecodeError, EdgeScrollError};
pub use runtime::{Clock, EffectRunner, SystemClock};
pub use sample::ScrollSample;
pub use trigger::{Direction, EdgeScrollTrigger, Effect, Msg, Token};
