//! Edge-triggered "load more" for scrollable content.
//!
//! [`EdgeScrollTrigger`] watches scroll samples, decides when the viewport has
//! come within `offset` pixels of the configured edge, and asks the host to
//! load more content. Further crossings are ignored until the host calls
//! [`stop_loading`](EdgeScrollTrigger::stop_loading) or the request times out.
//!
//! The trigger performs no I/O. Every transition returns the [`Effect`]s the
//! host must carry out: read the clock, invoke the load, arm a timer. Results
//! of the first and last come back as [`Msg`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut trigger = EdgeScrollTrigger::new(|dir| FetchRequest::next(dir))
//!     .with_offset(100)
//!     .with_direction(Direction::Bottom);
//!
//! // In the scroll handler:
//! let effects = trigger.evaluate(sample);
//! runner.run(effects);
//!
//! // When the fetch settles, success or not:
//! trigger.stop_loading();
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::log;
use crate::sample::ScrollSample;

pub const DEFAULT_OFFSET: u32 = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Which edge of the scrollable area triggers loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    #[default]
    Bottom,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Top => write!(f, "top"),
            Direction::Bottom => write!(f, "bottom"),
        }
    }
}

/// Identifies a load request. Milliseconds since the Unix epoch, as read
/// from the host clock when the request started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub i64);

impl Token {
    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work the host must perform on behalf of the trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<E> {
    /// Read the clock and feed the result back as [`Msg::TimeResolved`]
    RequestTime,
    /// Run the host's load action
    LoadMore(E),
    /// Sleep for `after`, then feed back [`Msg::TimeoutFired`] with `token`
    ArmTimeout { token: Token, after: Duration },
}

/// Inputs delivered to [`EdgeScrollTrigger::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Raw scroll notification from the UI layer
    Scrolled(Value),
    /// The clock read requested by [`Effect::RequestTime`] completed
    TimeResolved(Token),
    /// A timer armed by [`Effect::ArmTimeout`] elapsed
    TimeoutFired(Token),
}

type LoadMoreFn<E> = Arc<dyn Fn(Direction) -> E + Send + Sync>;

/// Scroll-position watcher that gates a host-supplied load action.
///
/// `E` is the host's load effect, typically a request description that the
/// host turns into a fetch.
pub struct EdgeScrollTrigger<E> {
    direction: Direction,
    offset: u32,
    timeout: Duration,
    load_more: LoadMoreFn<E>,
    is_loading: bool,
    last_request: Option<Token>,
}

impl<E> Clone for EdgeScrollTrigger<E> {
    fn clone(&self) -> Self {
        Self {
            direction: self.direction,
            offset: self.offset,
            timeout: self.timeout,
            load_more: Arc::clone(&self.load_more),
            is_loading: self.is_loading,
            last_request: self.last_request,
        }
    }
}

impl<E> fmt::Debug for EdgeScrollTrigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeScrollTrigger")
            .field("direction", &self.direction)
            .field("offset", &self.offset)
            .field("timeout", &self.timeout)
            .field("is_loading", &self.is_loading)
            .field("last_request", &self.last_request)
            .finish_non_exhaustive()
    }
}

impl<E> EdgeScrollTrigger<E> {
    /// Create an idle trigger watching the bottom edge with a 50px offset
    /// and a 5 second timeout.
    pub fn new<F>(load_more: F) -> Self
    where
        F: Fn(Direction) -> E + Send + Sync + 'static,
    {
        Self {
            direction: Direction::default(),
            offset: DEFAULT_OFFSET,
            timeout: DEFAULT_TIMEOUT,
            load_more: Arc::new(load_more),
            is_loading: false,
            last_request: None,
        }
    }

    /// Set the distance from the edge at which loading triggers
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the edge that triggers loading
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set how long to wait for [`stop_loading`](Self::stop_loading) before
    /// resetting on our own. Clamped to at least one millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Set the load action
    pub fn with_load_more<F>(mut self, load_more: F) -> Self
    where
        F: Fn(Direction) -> E + Send + Sync + 'static,
    {
        self.load_more = Arc::new(load_more);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Token of the most recent triggered request, if any
    pub fn last_request(&self) -> Option<Token> {
        self.last_request
    }

    /// Replace the load action used by subsequent triggers, e.g. after the
    /// host's page cursor moved.
    pub fn change_load_more<F>(&mut self, load_more: F)
    where
        F: Fn(Direction) -> E + Send + Sync + 'static,
    {
        self.load_more = Arc::new(load_more);
    }

    /// Force the loading state, for host-driven loads such as the initial
    /// fetch on mount. Scroll crossings are ignored until
    /// [`stop_loading`](Self::stop_loading).
    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    /// Re-arm the trigger. The host calls this once its load settles.
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    /// Whether `sample` is within `offset` of the configured edge.
    pub fn crosses_threshold(&self, sample: &ScrollSample) -> bool {
        let offset = f64::from(self.offset);
        match self.direction {
            Direction::Top => sample.scroll_offset <= offset,
            Direction::Bottom => sample.scroll_offset >= sample.excess() - offset,
        }
    }

    /// Evaluate a scroll sample.
    ///
    /// While loading this is a no-op. Otherwise, if the threshold is crossed,
    /// the trigger enters the loading state and asks for the current time,
    /// which becomes the new request's token.
    pub fn evaluate(&mut self, sample: ScrollSample) -> Vec<Effect<E>> {
        if self.is_loading || !self.crosses_threshold(&sample) {
            return Vec::new();
        }

        log::log_event(&format!(
            "{} edge reached at offset {:.1} (content {}, viewport {})",
            self.direction, sample.scroll_offset, sample.content_extent, sample.viewport_extent
        ));

        self.is_loading = true;
        vec![Effect::RequestTime]
    }

    /// Record `time` as the current request and emit the load and its timeout.
    pub fn on_time_resolved(&mut self, time: Token) -> Vec<Effect<E>> {
        self.last_request = Some(time);

        vec![
            Effect::LoadMore((self.load_more)(self.direction)),
            Effect::ArmTimeout {
                token: time,
                after: self.timeout,
            },
        ]
    }

    /// Reset the loading state if `time` still identifies the current
    /// request. Timeouts for finished or superseded requests are ignored.
    pub fn on_timeout_fired(&mut self, time: Token) {
        if self.is_loading && self.last_request == Some(time) {
            log::log_event(&format!("request {} timed out, re-arming", time));
            self.stop_loading();
        } else {
            log::log_event(&format!("ignoring stale timeout for request {}", time));
        }
    }

    /// Handle a single input message.
    ///
    /// Scroll payloads that fail to decode are logged and dropped.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect<E>> {
        match msg {
            Msg::Scrolled(payload) => match ScrollSample::decode(&payload) {
                Ok(sample) => self.evaluate(sample),
                Err(e) => {
                    log::log(&format!("Skipping scroll event: {}", e));
                    Vec::new()
                }
            },
            Msg::TimeResolved(time) => self.on_time_resolved(time),
            Msg::TimeoutFired(time) => {
                self.on_timeout_fired(time);
                Vec::new()
            }
        }
    }
}
