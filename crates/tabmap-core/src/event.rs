//! Notifications delivered to the host.

use tabmap_model::ImportResult;

use crate::step::ImportStep;

/// Something the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportEvent<'a> {
    StepChanged { from: ImportStep, to: ImportStep },
    /// A submission succeeded. The host takes ownership of the result via
    /// the return value of [`crate::ImportSession::submit`].
    Completed(&'a ImportResult),
    /// A user-facing error, already translated.
    Error(&'a str),
    /// The host asked to close the importer.
    Closed,
}

/// Receives [`ImportEvent`]s. Any `FnMut(&ImportEvent)` closure is a listener.
pub trait ImportListener {
    fn on_event(&mut self, event: &ImportEvent<'_>);
}

impl<F> ImportListener for F
where
    F: FnMut(&ImportEvent<'_>),
{
    fn on_event(&mut self, event: &ImportEvent<'_>) {
        self(event);
    }
}
