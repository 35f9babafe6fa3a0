//! Session context
//!
//! Tracks which owner, if any, is signed in. "No current user" is a
//! first-class state: the engines accept `Option<&str>` and treat `None`
//! as a defined empty-result case, so the analytics surface stays safe to
//! call speculatively from a UI layer.

/// The identity of the current user, owned by the session layer.
///
/// The engines never read ambient session state; callers pass
/// [`SessionContext::owner`] explicitly into every query.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current_owner: Option<String>,
}

impl SessionContext {
    /// Context with no signed-in user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a signed-in owner.
    pub fn signed_in(owner_id: impl Into<String>) -> Self {
        Self {
            current_owner: Some(owner_id.into()),
        }
    }

    /// Sign in as the given owner.
    pub fn sign_in(&mut self, owner_id: impl Into<String>) {
        self.current_owner = Some(owner_id.into());
    }

    /// Sign out, returning to the anonymous state.
    pub fn sign_out(&mut self) {
        self.current_owner = None;
    }

    /// The current owner identity, if any.
    pub fn owner(&self) -> Option<&str> {
        self.current_owner.as_deref()
    }

    /// Whether an owner is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.current_owner.is_some()
    }
}
