// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Buffers for the live operational streams (trace, watch, health info,
//! speed test, profile).

use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::de::DeserializeOwned;
use snafu::Snafu;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use strum::Display as StrumDisplay;
use tokio::time::{Instant, interval_at};
use tokio_stream::wrappers::IntervalStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Keeps idle streams from being dropped by the server.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
pub const HEARTBEAT: &str = "ok";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to send heartbeat on {} stream: {}", kind, message))]
    Heartbeat { kind: StreamKind, message: String },

    #[snafu(display("{} stream failed: {}", kind, message))]
    Receive { kind: StreamKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "camelCase")]
pub enum StreamKind {
    Trace,
    Watch,
    HealthInfo,
    Speedtest,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    Text(String),
    Binary(Vec<u8>),
}

#[derive(Debug, Default)]
struct Buffer {
    messages: Vec<StreamMessage>,
    closed: bool,
}

/// Ordered, append-only message sequence of one stream. Clones share the
/// same buffer.
#[derive(Debug, Clone, Default)]
pub struct StreamBuffer {
    inner: Arc<Mutex<Buffer>>,
}

impl StreamBuffer {
    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `message`. Returns false once the stream is closed.
    pub fn push(&self, message: StreamMessage) -> bool {
        let mut buffer = self.lock();
        if buffer.closed {
            return false;
        }
        buffer.messages.push(message);
        true
    }

    pub fn close(&self) {
        self.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn messages(&self) -> Vec<StreamMessage> {
        self.lock().messages.clone()
    }

    /// Decodes the newline-delimited JSON carried by text messages. Lines
    /// that do not decode are skipped.
    pub fn entries<T>(&self) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        let buffer = self.lock();
        buffer
            .messages
            .iter()
            .filter_map(|message| match message {
                StreamMessage::Text(text) => Some(text),
                StreamMessage::Binary(_) => None,
            })
            .flat_map(|text| text.lines())
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(error = %err, "skipping undecodable stream line");
                    None
                }
            })
            .collect()
    }
}

/// Copies `incoming` into `buffer` and sends a heartbeat on `outgoing` every
/// [`HEARTBEAT_INTERVAL`] until the peer ends the stream or `token` is
/// cancelled. The buffer is closed on return.
pub async fn pump<I, O, E>(
    kind: StreamKind,
    mut incoming: I,
    mut outgoing: O,
    buffer: StreamBuffer,
    token: CancellationToken,
) -> Result<(), Error>
where
    I: Stream<Item = Result<StreamMessage, E>> + Unpin,
    O: Sink<String> + Unpin,
    O::Error: Display,
    E: Display,
{
    let mut heartbeat = IntervalStream::new(interval_at(
        Instant::now() + HEARTBEAT_INTERVAL,
        HEARTBEAT_INTERVAL,
    ));
    info!(%kind, "stream opened");

    let result = loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!(%kind, "stream cancelled");
                break Ok(());
            }
            Some(_) = heartbeat.next() => {
                if let Err(err) = outgoing.send(HEARTBEAT.to_string()).await {
                    break HeartbeatSnafu { kind, message: err.to_string() }.fail();
                }
            }
            message = incoming.next() => match message {
                Some(Ok(message)) => {
                    buffer.push(message);
                }
                Some(Err(err)) => {
                    warn!(%kind, error = %err, "stream failed");
                    break ReceiveSnafu { kind, message: err.to_string() }.fail();
                }
                None => {
                    info!(%kind, received = buffer.len(), "stream ended");
                    break Ok(());
                }
            },
        }
    };

    buffer.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use serde::Deserialize;

    fn text(s: &str) -> Result<StreamMessage, String> {
        Ok(StreamMessage::Text(s.to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_every_ten_seconds() {
        let (_incoming_tx, incoming) = mpsc::unbounded::<Result<StreamMessage, String>>();
        let (outgoing, mut sent) = mpsc::unbounded::<String>();
        let buffer = StreamBuffer::default();
        let token = CancellationToken::new();

        let handle = tokio::spawn(pump(
            StreamKind::Trace,
            incoming,
            outgoing,
            buffer.clone(),
            token.clone(),
        ));

        tokio::time::sleep(Duration::from_secs(25)).await;
        token.cancel();
        handle.await.unwrap().unwrap();

        let mut heartbeats = Vec::new();
        while let Ok(Some(message)) = sent.try_next() {
            heartbeats.push(message);
        }
        assert_eq!(heartbeats, vec!["ok".to_string(), "ok".to_string()]);
        assert!(buffer.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_kept_in_order() {
        let (incoming_tx, incoming) = mpsc::unbounded();
        let (outgoing, _sent) = mpsc::unbounded::<String>();
        let buffer = StreamBuffer::default();

        for line in ["first", "second", "third"] {
            incoming_tx.unbounded_send(text(line)).unwrap();
        }
        incoming_tx
            .unbounded_send(Ok(StreamMessage::Binary(vec![1, 2])))
            .unwrap();
        drop(incoming_tx);

        pump(
            StreamKind::Watch,
            incoming,
            outgoing,
            buffer.clone(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            buffer.messages(),
            vec![
                StreamMessage::Text("first".to_string()),
                StreamMessage::Text("second".to_string()),
                StreamMessage::Text("third".to_string()),
                StreamMessage::Binary(vec![1, 2]),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_appended_after_cancel() {
        let (incoming_tx, incoming) = mpsc::unbounded();
        let (outgoing, _sent) = mpsc::unbounded::<String>();
        let buffer = StreamBuffer::default();
        let token = CancellationToken::new();

        incoming_tx.unbounded_send(text("before")).unwrap();
        let handle = tokio::spawn(pump(
            StreamKind::Speedtest,
            incoming,
            outgoing,
            buffer.clone(),
            token.clone(),
        ));
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
        handle.await.unwrap().unwrap();

        assert!(incoming_tx.unbounded_send(text("after")).is_err());
        assert!(!buffer.push(StreamMessage::Text("late".to_string())));
        assert_eq!(buffer.messages(), vec![StreamMessage::Text("before".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receive_error_closes_stream() {
        let (incoming_tx, incoming) = mpsc::unbounded();
        let (outgoing, _sent) = mpsc::unbounded::<String>();
        let buffer = StreamBuffer::default();

        incoming_tx.unbounded_send(text("one")).unwrap();
        incoming_tx
            .unbounded_send(Err("connection reset".to_string()))
            .unwrap();

        let err = pump(
            StreamKind::HealthInfo,
            incoming,
            outgoing,
            buffer.clone(),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Receive { kind: StreamKind::HealthInfo, .. }));
        assert!(buffer.is_closed());
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_entries_decode_json_lines() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Event {
            key: String,
        }

        let buffer = StreamBuffer::default();
        buffer.push(StreamMessage::Text(
            "{\"key\":\"a\"}\n{\"key\":\"b\"}\n".to_string(),
        ));
        buffer.push(StreamMessage::Text("not json".to_string()));
        buffer.push(StreamMessage::Binary(vec![0]));
        buffer.push(StreamMessage::Text("{\"key\":\"c\"}".to_string()));

        let keys: Vec<String> = buffer.entries::<Event>().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
