//! Headless session core (state/action/effect).

pub mod action;
pub mod confirm;
pub mod effect;
pub mod error;
pub mod explorer;
pub mod refresh;
pub mod registry;
pub mod services;
pub mod session;
pub mod vcs;

pub use action::{Action, EditorAction};
pub use confirm::{ConfirmState, ConfirmationWorkflow, Decision, FollowUp};
pub use effect::Effect;
pub use error::SessionError;
pub use explorer::{Activation, Explorer};
pub use refresh::{OpenFileRow, RefreshThrottle, StatusView};
pub use registry::{FileEntry, Registry};
pub use session::{DispatchResult, SessionController, StatusMessage, TickOutput};
pub use vcs::{FileStatusCode, FileStatusKind, VcsSnapshot, WorktreeStatus};
