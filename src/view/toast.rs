use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Update,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// At most one toast at a time: a new one replaces whatever is showing,
/// nothing is queued. Expiry is a deadline checked on read, not a timer.
#[derive(Debug, Default)]
pub struct ToastState {
    current: Option<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.current = Some(Toast {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// The toast visible at `now`, if its deadline has not passed.
    pub fn current(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|t| now.duration_since(t.shown_at) < TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_new_toast_replaces_the_visible_one() {
        let mut state = ToastState::new();
        state.show("first", ToastKind::Success);
        state.show("second", ToastKind::Error);

        let now = Instant::now();
        let toast = state.current(now).expect("toast should be visible");
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn toasts_expire_after_the_fixed_interval() {
        let mut state = ToastState::new();
        state.show("hello", ToastKind::Update);

        let now = Instant::now();
        assert!(state.current(now).is_some());
        assert!(state.current(now + TOAST_DURATION).is_none());
    }

    #[test]
    fn empty_state_shows_nothing() {
        let state = ToastState::new();
        assert!(state.current(Instant::now()).is_none());
    }
}
