//! Rendering chat events as terminal text.

use crate::sse::Event;

/// Text carried by an event, if any.
///
/// Looks at `completion`, then `text`, then `delta.text`.
pub fn event_text(event: &Event) -> Option<&str> {
    event
        .get("completion")
        .and_then(Event::as_str)
        .or_else(|| event.get("text").and_then(Event::as_str))
        .or_else(|| event.pointer("/delta/text").and_then(Event::as_str))
}
