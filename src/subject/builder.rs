use super::Subject;
use crate::config::SubjectConfig;
use crate::observers::Observer;

/// Builder for constructing a [`Subject`] with a config, state and seed observers.
pub struct SubjectBuilder<S> {
    cfg: SubjectConfig,
    state: Option<S>,
    observers: Vec<Observer<S>>,
}

impl<S> SubjectBuilder<S> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SubjectConfig) -> Self {
        Self {
            cfg,
            state: None,
            observers: Vec::new(),
        }
    }

    /// Sets the initial state payload.
    pub fn with_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Seeds the registry with already-resolved observers, in order.
    ///
    /// Use [`Candidate::into_observer`](crate::Candidate::into_observer) to
    /// resolve candidates up front.
    pub fn with_observers(mut self, observers: Vec<Observer<S>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds the subject; the state falls back to `S::default()`.
    pub fn build(self) -> Subject<S>
    where
        S: Default,
    {
        let state = self.state.unwrap_or_default();
        Subject::from_parts(self.cfg, state, self.observers)
    }
}
