//! "File modified, save it?" prompt state.
//!
//! At most one prompt is pending. The follow-up is carried in the state instead of being
//! remembered elsewhere, and resolving always returns to `Idle`.

use crate::kernel::error::{Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Nothing,
    CloseAfter,
    QuitAfter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    AwaitingDecision {
        index: usize,
        follow_up: FollowUp,
        prompt: String,
    },
}

/// What the controller must do for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Save the entry; run the follow-up only if the save succeeds.
    SaveThen(FollowUp),
    /// Clear the modified flag without writing, then run the follow-up.
    DiscardThen(FollowUp),
    /// Drop the prompt and do nothing else.
    Abort,
}

pub fn resolution_for(decision: Decision, follow_up: FollowUp) -> Resolution {
    match (decision, follow_up) {
        (Decision::Yes, f) => Resolution::SaveThen(f),
        (Decision::No, f) => Resolution::DiscardThen(f),
        // Cancel on a close still closes the file and drops its changes (DESIGN.md).
        (Decision::Cancel, FollowUp::CloseAfter) => Resolution::DiscardThen(FollowUp::CloseAfter),
        (Decision::Cancel, _) => Resolution::Abort,
    }
}

#[derive(Debug, Default)]
pub struct ConfirmationWorkflow {
    state: ConfirmState,
}

impl ConfirmationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConfirmState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self.state, ConfirmState::Idle)
    }

    pub fn prompt(&self) -> Option<&str> {
        match &self.state {
            ConfirmState::AwaitingDecision { prompt, .. } => Some(prompt),
            ConfirmState::Idle => None,
        }
    }

    pub fn begin(&mut self, index: usize, follow_up: FollowUp, file_name: &str) -> Result<()> {
        if self.is_pending() {
            return Err(SessionError::ConfirmationPending);
        }
        self.state = ConfirmState::AwaitingDecision {
            index,
            follow_up,
            prompt: format!("File {} has been modified. Save it?", file_name),
        };
        Ok(())
    }

    /// Ends the prompt and returns what it was waiting on.
    pub fn take(&mut self) -> Option<(usize, FollowUp)> {
        match std::mem::take(&mut self.state) {
            ConfirmState::AwaitingDecision {
                index, follow_up, ..
            } => Some((index, follow_up)),
            ConfirmState::Idle => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/confirm.rs"]
mod tests;
