//! `GET /stream` - forwards one job's output as server-sent events.
//!
//! Each [`JobEvent`] becomes one SSE frame, written and flushed as soon as the
//! job emits it. Progress lines are plain `data:` frames; failures carry
//! `event: error`, and the optional completion frame carries `event: done`.
//! The response ends when the job's channel is closed and drained.

use super::{AppState, StreamError};
use crate::config::StreamTransport;
use crate::domain::jobs::JobEvent;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    job: String,
    path: Option<String>,
}

pub async fn stream_job(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<impl IntoResponse, StreamError> {
    if state.stream.transport == StreamTransport::Buffered {
        return Err(StreamError::TransportUnsupported);
    }

    let execution = state.runner.start(&query.job, query.path)?;
    let frames = execution
        .into_stream(state.stream.done_event)
        .map(|event| Ok::<_, Infallible>(frame(event)));

    Ok((
        [
            (header::CONNECTION, "keep-alive"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Sse::new(frames),
    ))
}

fn frame(event: JobEvent) -> Event {
    match event {
        JobEvent::Progress(text) => Event::default().data(sanitize(&text)),
        tagged => Event::default()
            .event(tagged.kind())
            .data(sanitize(tagged.text())),
    }
}

// SSE has no escape for a bare carriage return; newlines are split into
// several `data:` lines by `Event::data`.
fn sanitize(text: &str) -> String {
    text.replace('\r', "")
}
