#![warn(missing_docs)]
//! Client façade: turns server events into world writes and chunk meshes.

mod applier;
pub mod event;
mod session;
mod settings;
pub mod source;

pub use applier::{AppliedUpdate, ApplyError, UpdateApplier};
pub use event::{EntityPosition, ServerEvent};
pub use session::{ClientSession, SessionError, SessionStats};
pub use settings::ConnectionSettings;
pub use source::{EventSource, ReplaySource, SourceError};
