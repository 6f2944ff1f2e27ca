// ── Query id allocation ──
//
// Ids are handed out by a source owned by the controller, so two editor
// sessions (or two tests) never share a counter.

use crate::model::QueryId;

/// Supplies fresh, never-repeating query node ids.
pub trait IdSource {
    fn next_id(&mut self) -> QueryId;
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> QueryId {
        (**self).next_id()
    }
}

/// Monotonic counter starting at 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after `last`, e.g. when resuming a recorded session.
    pub fn after(last: u64) -> Self {
        Self { last }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> QueryId {
        self.last += 1;
        QueryId::new(self.last)
    }
}
