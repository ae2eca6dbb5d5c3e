//! Attaching a trigger to a host's scroll source.
//!
//! A [`ScrollBinding`] is the descriptor a UI layer applies to its scrollable
//! element. It names the event to listen for, says whether the raw event may
//! continue to other listeners, and wraps the payload into the host's own
//! message type.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::trigger::Msg;

/// Name of the element event a binding listens to.
pub const SCROLL_EVENT: &str = "scroll";

/// Whether the raw scroll event continues to other listeners once the
/// binding has consumed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// The binding is the only consumer of the event
    #[default]
    Stop,
    /// Other listeners on the element or its ancestors also see the event
    Continue,
}

/// What the host should do with one raw scroll notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<M> {
    /// Message to feed into the host's update loop
    pub message: M,
    /// Whether the host must stop propagating the raw event
    pub stop_propagation: bool,
}

/// Scroll-source descriptor carrying the host's message constructor.
pub struct ScrollBinding<M> {
    propagation: Propagation,
    to_msg: Arc<dyn Fn(Msg) -> M + Send + Sync>,
}

impl<M> Clone for ScrollBinding<M> {
    fn clone(&self) -> Self {
        Self {
            propagation: self.propagation,
            to_msg: Arc::clone(&self.to_msg),
        }
    }
}

impl<M> fmt::Debug for ScrollBinding<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBinding")
            .field("event", &SCROLL_EVENT)
            .field("propagation", &self.propagation)
            .finish_non_exhaustive()
    }
}

impl<M> ScrollBinding<M> {
    /// Bind with propagation stopped, so the raw event is consumed here only.
    pub fn new<F>(to_msg: F) -> Self
    where
        F: Fn(Msg) -> M + Send + Sync + 'static,
    {
        Self {
            propagation: Propagation::Stop,
            to_msg: Arc::new(to_msg),
        }
    }

    /// Bind as a plain listener that lets the raw event through.
    pub fn propagating<F>(to_msg: F) -> Self
    where
        F: Fn(Msg) -> M + Send + Sync + 'static,
    {
        Self::new(to_msg).with_propagation(Propagation::Continue)
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    pub fn event_name(&self) -> &'static str {
        SCROLL_EVENT
    }

    pub fn propagation(&self) -> Propagation {
        self.propagation
    }

    pub fn stops_propagation(&self) -> bool {
        self.propagation == Propagation::Stop
    }

    /// Wrap a raw scroll payload for the host's update loop.
    ///
    /// The payload is passed through undecoded; the trigger decodes it and
    /// drops it if malformed.
    pub fn dispatch(&self, payload: Value) -> Dispatch<M> {
        Dispatch {
            message: (self.to_msg)(Msg::Scrolled(payload)),
            stop_propagation: self.stops_propagation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum HostMsg {
        Trigger(Msg),
    }

    #[test]
    fn test_default_binding_stops_propagation() {
        let binding = ScrollBinding::new(HostMsg::Trigger);
        assert_eq!(binding.event_name(), "scroll");
        assert!(binding.stops_propagation());

        let payload = json!({ "target": {} });
        let dispatch = binding.dispatch(payload.clone());
        assert_eq!(dispatch.message, HostMsg::Trigger(Msg::Scrolled(payload)));
        assert!(dispatch.stop_propagation);
    }

    #[test]
    fn test_propagating_binding() {
        let binding = ScrollBinding::propagating(HostMsg::Trigger);
        assert_eq!(binding.propagation(), Propagation::Continue);
        assert!(!binding.dispatch(json!(null)).stop_propagation);
    }
}
