//! Scroll geometry samples and decoding of raw scroll notifications.
//!
//! UI layers report scroll events as loosely structured payloads shaped like a
//! DOM scroll event:
//!
//! ```json
//! { "target": { "scrollTop": 450.0, "scrollHeight": 1000, "offsetHeight": 500, "clientHeight": 498 } }
//! ```
//!
//! Decoding is fallible. Callers are expected to drop a sample that fails to
//! decode rather than surface the error.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{DecodeError, DecodeResult};

/// A snapshot of scroll position, content size, and visible viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Distance scrolled from the top edge
    pub scroll_offset: f64,
    /// Total height of the scrollable content
    pub content_extent: u64,
    /// Height of the visible viewport
    pub viewport_extent: u64,
}

/// Element fields read from a raw scroll payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScrollTarget {
    scroll_top: f64,
    scroll_height: f64,
    offset_height: f64,
    client_height: f64,
}

impl ScrollSample {
    pub fn new(scroll_offset: f64, content_extent: u64, viewport_extent: u64) -> Self {
        Self {
            scroll_offset,
            content_extent,
            viewport_extent,
        }
    }

    /// Decode a raw scroll notification.
    ///
    /// The viewport extent is the larger of `offsetHeight` and `clientHeight`.
    /// Heights may arrive as integers or whole-valued floats. A negative
    /// `scrollTop` (elastic overscroll) is clamped to zero.
    pub fn decode(payload: &Value) -> DecodeResult<Self> {
        let target = payload
            .get("target")
            .filter(|t| t.is_object())
            .ok_or(DecodeError::MissingTarget)?;

        let raw = ScrollTarget::deserialize(target)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let content_extent = extent("scrollHeight", raw.scroll_height)?;
        let offset_height = extent("offsetHeight", raw.offset_height)?;
        let client_height = extent("clientHeight", raw.client_height)?;

        if !raw.scroll_top.is_finite() {
            return Err(DecodeError::NotFinite("scrollTop"));
        }

        Ok(Self {
            scroll_offset: raw.scroll_top.max(0.0),
            content_extent,
            viewport_extent: offset_height.max(client_height),
        })
    }

    /// Encode this sample in the raw payload shape accepted by [`decode`](Self::decode).
    pub fn to_payload(&self) -> Value {
        json!({
            "target": {
                "scrollTop": self.scroll_offset,
                "scrollHeight": self.content_extent,
                "offsetHeight": self.viewport_extent,
                "clientHeight": self.viewport_extent,
            }
        })
    }

    /// How far the content extends past the viewport. Negative when the
    /// content fits entirely.
    pub fn excess(&self) -> f64 {
        self.content_extent as f64 - self.viewport_extent as f64
    }
}

/// Validate a height: finite, non-negative, and whole.
fn extent(field: &'static str, value: f64) -> DecodeResult<u64> {
    if !value.is_finite() {
        return Err(DecodeError::NotFinite(field));
    }
    if value < 0.0 {
        return Err(DecodeError::Negative { field, value });
    }
    if value.fract() != 0.0 {
        return Err(DecodeError::Fractional { field, value });
    }
    Ok(value as u64)
}
