//! The "current session" state machine.

use uuid::Uuid;

/// Which conversation the client is currently looking at.
///
/// There is exactly one owner of this value per client; consumers read
/// it through the controller rather than mutating it ad hoc. A draft is
/// a client-local placeholder -- it has no store id, so it can never be
/// the target of `select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentSession {
    /// No conversation selected.
    None,
    /// A not-yet-persisted conversation the user intends to create.
    Draft { title: String },
    /// A conversation that exists in the store.
    Committed(Uuid),
}

impl CurrentSession {
    /// The committed session id, if any.
    pub fn committed_id(&self) -> Option<Uuid> {
        match self {
            CurrentSession::Committed(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, CurrentSession::Draft { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CurrentSession::None)
    }
}
