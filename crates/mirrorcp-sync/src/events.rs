//! Copy event reporting
//!
//! Workers emit one event per successful copy and one per failed task. The
//! consumer (normally the CLI) takes the receiver before the run starts and
//! drains it concurrently.

use std::path::PathBuf;
use tokio::sync::mpsc;

/// An observable synchronization event
#[derive(Debug, Clone)]
pub enum CopyEvent {
    /// A file was copied to its mirrored destination
    Copied {
        /// Source file path
        source: PathBuf,
        /// Destination file path
        destination: PathBuf,
    },
    /// A task failed; the run continues and the failure is counted
    Failed {
        /// Source file path of the failed task
        source: PathBuf,
        /// Human-readable error message
        message: String,
    },
}

/// Event reporter shared between the engine and its workers
#[derive(Debug)]
pub struct EventReporter {
    tx: mpsc::UnboundedSender<CopyEvent>,
    rx: Option<mpsc::UnboundedReceiver<CopyEvent>>,
}

impl EventReporter {
    /// Create a new event reporter
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx: Some(rx) }
    }

    /// Take the event receiver (can only be called once)
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<CopyEvent>> {
        self.rx.take()
    }

    /// Report a completed copy
    pub fn copied(&self, source: PathBuf, destination: PathBuf) {
        let _ = self.tx.send(CopyEvent::Copied {
            source,
            destination,
        });
    }

    /// Report a failed task
    pub fn failed(&self, source: PathBuf, message: String) {
        let _ = self.tx.send(CopyEvent::Failed { source, message });
    }
}

impl Default for EventReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventReporter {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: None, // Clones don't get the receiver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        let mut reporter = EventReporter::new();
        let mut rx = reporter.take_event_receiver().unwrap();

        reporter.copied("a".into(), "b".into());
        reporter.failed("c".into(), "boom".into());

        assert!(matches!(rx.recv().await, Some(CopyEvent::Copied { .. })));
        match rx.recv().await {
            Some(CopyEvent::Failed { source, message }) => {
                assert_eq!(source, PathBuf::from("c"));
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_receiver_taken_once() {
        let mut reporter = EventReporter::new();
        assert!(reporter.take_event_receiver().is_some());
        assert!(reporter.take_event_receiver().is_none());

        let mut clone = reporter.clone();
        assert!(clone.take_event_receiver().is_none());
    }
}
