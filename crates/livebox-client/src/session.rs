//! Authenticated device session

/// Context handle returned by a successful login
///
/// Valid for one poll cycle; the scheduler opens a fresh session every cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    context_id: String,
}

impl Session {
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
        }
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }
}

// The context ID is a bearer credential; keep it out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("context_id", &"<redacted>")
            .finish()
    }
}
