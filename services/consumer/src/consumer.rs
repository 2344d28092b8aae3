//! The fetch-decode-render loop
//!
//! One logical task: take the next raw message from the subscription, decode
//! it, write the rendered line for `'C'` events, repeat. The only suspension
//! point is the fetch; decoding and rendering never block.
//!
//! The loop ends on any of:
//! - the shutdown channel flipping (or its sender being dropped)
//! - the subscription reporting a clean end of stream
//! - a transport error (the connection is gone; reconnect is out of scope)

use codec::{decode, render, KIND_CHANGE, KIND_HEARTBEAT};
use std::io::Write;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};
use transport::{Subscription, TransportError};

/// Failures that end the consume loop
#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to write rendered event: {0}")]
    Render(#[from] std::io::Error),
}

/// Counters accumulated over one run of the loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Raw messages fetched from the subscription.
    pub received: u64,
    /// `'C'` events decoded and rendered.
    pub invalidations: u64,
    /// Messages of other kinds, accepted but not rendered.
    pub skipped: u64,
    /// Malformed messages logged and dropped.
    pub decode_errors: u64,
}

/// Run the consume loop until shutdown or end of stream
///
/// Renders each `'C'` event as one line on `out`. Decode errors are logged
/// and skipped; they never terminate the loop. Returns the accumulated
/// counters so callers (and tests) can verify what was processed.
pub async fn run<S, W>(
    source: &mut S,
    shutdown: &mut watch::Receiver<bool>,
    out: &mut W,
) -> Result<ConsumerStats, ConsumerError>
where
    S: Subscription,
    W: Write,
{
    let mut stats = ConsumerStats::default();

    loop {
        let received = tokio::select! {
            // A send on the channel or a dropped sender both mean stop.
            _ = shutdown.changed() => {
                info!("shutdown signal received");
                break;
            }
            received = source.receive() => received,
        };

        let raw = match received {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("subscription stream ended");
                break;
            }
            Err(e) => {
                error!(error = %e, "subscription failed");
                return Err(e.into());
            }
        };

        stats.received += 1;

        match decode(&raw) {
            Ok(event) if event.kind == KIND_CHANGE => {
                stats.invalidations += 1;
                if let Some(line) = render(&event) {
                    writeln!(out, "{}", line)?;
                }
            }
            Ok(event) if event.kind == KIND_HEARTBEAT => {
                stats.skipped += 1;
                trace!("publisher heartbeat");
            }
            Ok(event) => {
                stats.skipped += 1;
                debug!(kind = event.kind, "ignoring event of unrecognized kind");
            }
            Err(e) => {
                stats.decode_errors += 1;
                warn!(error = %e, bytes = raw.len(), "skipping undecodable message");
            }
        }
    }

    info!(
        received = stats.received,
        invalidations = stats.invalidations,
        skipped = stats.skipped,
        decode_errors = stats.decode_errors,
        "consume loop finished"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use codec::encode_change;
    use transport::ReplaySource;

    fn shutdown_pair() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(false)
    }

    #[tokio::test]
    async fn renders_change_events_in_order() {
        let first = encode_change(b"0123456789abcdef", 1.0).to_vec();
        let second = encode_change(&[0u8; 16], 1700000000.1234).to_vec();
        let mut source = ReplaySource::new(vec![first, vec![b'P'], second]);
        let (_tx, mut shutdown) = shutdown_pair();
        let mut out = Vec::new();

        let stats = run(&mut source, &mut shutdown, &mut out).await.unwrap();

        assert_eq!(stats.received, 3);
        assert_eq!(stats.invalidations, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.decode_errors, 0);

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("C {} 1.000", hex_of(b"0123456789abcdef"))
        );
        assert_eq!(
            lines[1],
            "C 00000000000000000000000000000000 1700000000.123"
        );
    }

    #[tokio::test]
    async fn malformed_messages_are_skipped_not_fatal() {
        let good = encode_change(&[7u8; 16], 2.0).to_vec();
        let mut source = ReplaySource::new(vec![
            Vec::new(),            // empty: no kind byte
            vec![b'C', 1, 2, 3],   // truncated change record
            good,
        ]);
        let (_tx, mut shutdown) = shutdown_pair();
        let mut out = Vec::new();

        let stats = run(&mut source, &mut shutdown, &mut out).await.unwrap();

        assert_eq!(stats.received, 3);
        assert_eq!(stats.decode_errors, 2);
        assert_eq!(stats.invalidations, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn unrecognized_kinds_are_accepted_silently() {
        let mut source = ReplaySource::new(vec![b"Xsome payload".to_vec()]);
        let (_tx, mut shutdown) = shutdown_pair();
        let mut out = Vec::new();

        let stats = run(&mut source, &mut shutdown, &mut out).await.unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.decode_errors, 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn shutdown_interrupts_a_blocked_fetch() {
        // A source that never produces: receive() suspends forever.
        struct SilentSource;

        #[async_trait]
        impl Subscription for SilentSource {
            async fn receive(&mut self) -> transport::Result<Option<Vec<u8>>> {
                std::future::pending().await
            }
        }

        let (tx, mut shutdown) = shutdown_pair();
        let mut out = Vec::new();

        let handle = tokio::spawn(async move {
            let mut source = SilentSource;
            run(&mut source, &mut shutdown, &mut out).await
        });

        tx.send(true).unwrap();
        let stats = handle.await.unwrap().unwrap();
        assert_eq!(stats, ConsumerStats::default());
    }

    #[tokio::test]
    async fn transport_error_ends_the_loop() {
        struct FailingSource;

        #[async_trait]
        impl Subscription for FailingSource {
            async fn receive(&mut self) -> transport::Result<Option<Vec<u8>>> {
                Err(TransportError::FrameTooLarge {
                    size: 1_000_000,
                    max: 1024,
                })
            }
        }

        let (_tx, mut shutdown) = shutdown_pair();
        let mut out = Vec::new();
        let mut source = FailingSource;

        let result = run(&mut source, &mut shutdown, &mut out).await;
        assert!(matches!(result, Err(ConsumerError::Transport(_))));
    }

    fn hex_of(key: &[u8; 16]) -> String {
        codec::format_key(key)
    }
}
