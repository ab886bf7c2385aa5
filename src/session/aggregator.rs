/// A recoverable failure recorded during one operation and surfaced at the
/// next loop boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredError {
    pub kind: String,
    pub subject: String,
    pub message: String,
}

/// Process-wide deferred-error queue, owned by the session and drained at
/// the top of every loop iteration. Recording anything forces the final
/// exit status to the partial-failure code.
#[derive(Debug, Default)]
pub struct ErrorQueue {
    records: Vec<DeferredError>,
}

impl ErrorQueue {
    pub fn new() -> Self {
        ErrorQueue::default()
    }

    pub fn record<K, S, M>(&mut self, kind: K, subject: S, message: M)
    where
        K: Into<String>,
        S: Into<String>,
        M: Into<String>,
    {
        self.records.push(DeferredError {
            kind: kind.into(),
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Return and clear all pending records, in insertion order.
    pub fn drain(&mut self) -> Vec<DeferredError> {
        std::mem::take(&mut self.records)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
