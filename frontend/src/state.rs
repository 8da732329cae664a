use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Loading,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
            ToastKind::Loading => "toast loading",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Toast notifications, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct ToastState {
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastState {
    pub fn provide() -> Self {
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        let state = Self { toasts, set_toasts, next_id: StoredValue::new(0) };
        provide_context(state);
        state
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, text.into(), true)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, text.into(), true)
    }

    /// Stays until dismissed or replaced.
    pub fn loading(&self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Loading, text.into(), false)
    }

    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, text: String, expires: bool) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.set_toasts.update(|toasts| toasts.push(Toast { id, kind, text }));

        if expires {
            let state = *self;
            Timeout::new(TOAST_LIFETIME_MS, move || state.dismiss(id)).forget();
        }
        id
    }
}

/// Lifecycle of a one-shot fetch owned by a view.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}
