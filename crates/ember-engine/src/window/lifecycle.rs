/// Driver lifecycle states.
///
/// Transitions are linear: Uninitialized → Initialized → WindowOpen →
/// Running → Closed, plus an abort edge to `Closed` from any live state so
/// teardown can run after an early failure. `Closed` is terminal; the
/// runtime is consumed by `run`, so re-entry cannot happen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    WindowOpen,
    Running,
    Closed,
}

impl Lifecycle {
    pub fn can_advance_to(self, next: Lifecycle) -> bool {
        use Lifecycle::*;

        match (self, next) {
            (Uninitialized, Initialized)
            | (Initialized, WindowOpen)
            | (WindowOpen, Running)
            | (Running, Closed) => true,

            // Abort edge: teardown is legal from any live state.
            (from, Closed) => from != Closed,

            _ => false,
        }
    }

    pub(crate) fn advance(&mut self, next: Lifecycle) {
        debug_assert!(
            self.can_advance_to(next),
            "invalid lifecycle transition {self:?} -> {next:?}"
        );
        log::trace!("lifecycle: {self:?} -> {next:?}");
        *self = next;
    }
}
