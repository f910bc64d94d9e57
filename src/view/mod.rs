//! The playground view: local row state, modal flows and toast
//! notifications, driven against an injected [`crate::gateway::KeyStore`].

mod playground;
mod toast;

pub use playground::{CreateDraft, EditDraft, KeyRow, Playground, Stats};
pub use toast::{TOAST_DURATION, Toast, ToastKind, ToastState};
