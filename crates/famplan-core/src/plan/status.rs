//! Progress reporting for plan queries.

/// Receives human-readable progress messages during a query.
///
/// Implementations must not panic; the sink never influences control flow.
pub trait StatusSink: Send + Sync {
    fn report(&self, message: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forward `message` to the sink, if one was supplied.
pub(crate) fn notify(sink: Option<&dyn StatusSink>, message: &str) {
    if let Some(sink) = sink {
        sink.report(message);
    }
}
