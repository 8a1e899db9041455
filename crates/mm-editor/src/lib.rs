pub mod export;
pub mod form;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use export::{ExportError, ExportGuard};
pub use form::{EditForm, FormField, NodeDetail};
pub use input::{InputEvent, Modifiers};
pub use session::{KeyOutcome, Selection, Session, SessionConfig, Tooltip};
pub use shortcuts::{ShortcutAction, ShortcutMap};
