//! In-memory sink for exercising alert delivery without a mail server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::sink::{AlertNotice, AlertSink, NotifyError};

/// One delivery attempt captured by a [`MemorySink`].
#[derive(Debug, Clone)]
pub struct RecordedAlert {
    /// The notice handed to the sink.
    pub notice: AlertNotice,
    /// Recipients the notice was addressed to.
    pub recipients: Vec<String>,
}

/// A sink that records deliveries in memory instead of sending anything.
///
/// Can be flipped into a failing mode to simulate a transport outage;
/// attempts are recorded either way so tests can assert on what was tried.
#[derive(Clone, Default)]
pub struct MemorySink {
    deliveries: Arc<Mutex<Vec<RecordedAlert>>>,
    failing: Arc<AtomicBool>,
}

impl MemorySink {
    /// Create a sink that accepts every delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that rejects every delivery.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.failing.store(true, Ordering::SeqCst);
        sink
    }

    /// Switch the sink between accepting and rejecting deliveries.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every delivery attempted so far.
    pub fn deliveries(&self) -> Vec<RecordedAlert> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Number of delivery attempts so far.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    async fn deliver(&self, notice: &AlertNotice, recipients: &[String]) -> Result<(), NotifyError> {
        self.deliveries.lock().unwrap().push(RecordedAlert {
            notice: notice.clone(),
            recipients: recipients.to_vec(),
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Rejected("memory sink set to fail".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MemorySink"
    }
}
