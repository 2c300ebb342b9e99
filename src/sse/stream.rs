//! Lazy event stream over a byte-chunk source.

use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use super::decoder::SseDecoder;
use super::Event;
use crate::traits::DiagnosticSink;

struct DecodeState<S> {
    chunks: S,
    /// `None` once the source has ended or failed.
    decoder: Option<SseDecoder>,
    ready: VecDeque<Event>,
}

/// Turn a stream of body chunks into a stream of decoded events.
///
/// Each poll pulls at most as many chunks as it takes to produce the next
/// event; nothing is read ahead. Events come out in the order their lines
/// appeared. A source error is yielded once and ends the stream. When the
/// source ends, the trailing partial line is decoded as a final line.
pub fn decode<S, E>(chunks: S, sink: Arc<dyn DiagnosticSink>) -> impl Stream<Item = Result<Event, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    let state = DecodeState {
        chunks,
        decoder: Some(SseDecoder::new(sink)),
        ready: VecDeque::new(),
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }

            let Some(decoder) = state.decoder.as_mut() else {
                return None;
            };

            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    let events = decoder.feed(&chunk);
                    state.ready.extend(events);
                }
                Some(Err(err)) => {
                    state.decoder = None;
                    return Some((Err(err), state));
                }
                None => {
                    if let Some(decoder) = state.decoder.take() {
                        state.ready.extend(decoder.finish());
                    }
                }
            }
        }
    })
}
