// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendezvous hand-off for output lines.
//!
//! A publish completes only once the receiver has taken the line, so at
//! most one line is ever in flight and the producer can never run ahead
//! of the consumer.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

type Slot = (String, oneshot::Sender<()>);

/// The receiving side went away; the line was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line relay closed")]
pub struct RelayClosed;

/// Producer half, owned by the job runner.
#[derive(Debug)]
pub struct RelaySender {
    tx: mpsc::Sender<Slot>,
}

/// Consumer half, owned by the event loop.
#[derive(Debug)]
pub struct RelayReceiver {
    rx: mpsc::Receiver<Slot>,
}

/// Create a relay for one job.
pub fn channel() -> (RelaySender, RelayReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (RelaySender { tx }, RelayReceiver { rx })
}

impl RelaySender {
    /// Hand `line` to the receiver, waiting until it has been taken.
    pub async fn publish(&self, line: String) -> Result<(), RelayClosed> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx.send((line, ack_tx)).await.map_err(|_| RelayClosed)?;
        ack_rx.await.map_err(|_| RelayClosed)
    }
}

impl RelayReceiver {
    /// Take the next line. `None` once the sender is gone and nothing is pending.
    pub async fn recv(&mut self) -> Option<String> {
        let (line, ack) = self.rx.recv().await?;
        // Publisher may have been cancelled mid-wait; the line still counts.
        let _ = ack.send(());
        Some(line)
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
