//! Clock and timer collaborator backed by tokio.
//!
//! [`EffectRunner`] carries out the trigger's [`Effect`]s: clock reads and
//! timers run as spawned tasks that report back over an mpsc channel, and
//! load requests are handed back to the caller. Timers are never cancelled;
//! a timeout that arrives after its request finished is discarded by the
//! trigger's token check.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::log;
use crate::trigger::{Effect, Msg, Token};

/// Source of request tokens.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Token;
}

/// Wall clock in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Token {
        Token(Utc::now().timestamp_millis())
    }
}

/// Executes trigger effects on the current tokio runtime.
#[derive(Debug)]
pub struct EffectRunner<C = SystemClock> {
    clock: Arc<C>,
    tx: mpsc::Sender<Msg>,
}

impl<C> Clone for EffectRunner<C> {
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            tx: self.tx.clone(),
        }
    }
}

impl<C: Clock> EffectRunner<C> {
    pub fn new(clock: C, tx: mpsc::Sender<Msg>) -> Self {
        Self {
            clock: Arc::new(clock),
            tx,
        }
    }

    /// Create a runner together with the receiver its messages arrive on.
    pub fn channel(clock: C, capacity: usize) -> (Self, mpsc::Receiver<Msg>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(clock, tx), rx)
    }

    /// Carry out `effects` and return the load requests, in emission order,
    /// for the host to perform.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run<E>(&self, effects: Vec<Effect<E>>) -> Vec<E> {
        let mut loads = Vec::new();

        for effect in effects {
            match effect {
                Effect::RequestTime => self.request_time(),
                Effect::LoadMore(request) => loads.push(request),
                Effect::ArmTimeout { token, after } => self.arm_timeout(token, after),
            }
        }

        loads
    }

    fn request_time(&self) {
        let clock = Arc::clone(&self.clock);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let now = clock.now();
            if tx.send(Msg::TimeResolved(now)).await.is_err() {
                log::log("Trigger receiver dropped before time resolved");
            }
        });
    }

    fn arm_timeout(&self, token: Token, after: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(Msg::TimeoutFired(token)).await.is_err() {
                log::log(&format!("Trigger receiver dropped before timeout {}", token));
            }
        });
    }
}
