//! Process-wide toast notifications.
//!
//! `ToastQueue` is the plain queue with monotonically increasing ids;
//! `ToastService` wraps it in a signal, hands it out via context, and
//! attaches one expiry timer per toast so lifetimes stay independent.

use leptos::prelude::*;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

pub const TOAST_LIFETIME_MS: u32 = 2500;

/// Queue bound; the oldest toast is evicted when a new one would
/// exceed it, timers for evicted toasts become no-ops.
const MAX_LIVE_TOASTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, message: String, kind: ToastKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message });
        if self.toasts.len() > MAX_LIVE_TOASTS {
            self.toasts.remove(0);
        }
        id
    }

    /// Removes only the toast with the given id; every other toast
    /// keeps its position and remaining lifetime.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn live(&self) -> &[Toast] {
        &self.toasts
    }
}

#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message.into(), ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message.into(), ToastKind::Error);
    }

    pub fn notify(&self, message: String, kind: ToastKind) {
        let id = match self.queue.try_update(|q| q.push(message, kind)) {
            Some(id) => id,
            None => return,
        };
        let queue = self.queue;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            // The host may already be gone; dropping the update is fine.
            queue.try_update(|q| q.dismiss(id));
        });
    }

    pub fn live(&self) -> Vec<Toast> {
        self.queue.get().live().to_vec()
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders all currently live toasts in arrival order.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");

    view! {
        <div class="toast-host">
            {move || toasts.live().into_iter().map(|toast| {
                let kind_class = match toast.kind {
                    ToastKind::Success => "toast--success",
                    ToastKind::Error => "toast--error",
                };
                view! {
                    <div class=format!("toast {}", kind_class)>
                        {toast.message}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_order_is_arrival_order() {
        let mut q = ToastQueue::default();
        let a = q.push("a".to_string(), ToastKind::Success);
        let b = q.push("b".to_string(), ToastKind::Error);
        assert!(b > a);
        let messages: Vec<_> = q.live().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn dismissing_one_toast_leaves_the_others() {
        let mut q = ToastQueue::default();
        let a = q.push("a".to_string(), ToastKind::Success);
        let b = q.push("b".to_string(), ToastKind::Success);
        q.dismiss(a);
        assert_eq!(q.live().len(), 1);
        assert_eq!(q.live()[0].id, b);

        // Late expiry of an already-dismissed toast is a no-op.
        q.dismiss(a);
        assert_eq!(q.live().len(), 1);
    }

    #[test]
    fn queue_is_bounded_by_evicting_the_oldest() {
        let mut q = ToastQueue::default();
        for i in 0..(MAX_LIVE_TOASTS + 2) {
            q.push(format!("t{}", i), ToastKind::Success);
        }
        assert_eq!(q.live().len(), MAX_LIVE_TOASTS);
        assert_eq!(q.live()[0].message, "t2");
    }

    #[test]
    fn ids_are_not_reused_after_dismissal() {
        let mut q = ToastQueue::default();
        let a = q.push("a".to_string(), ToastKind::Success);
        q.dismiss(a);
        let b = q.push("b".to_string(), ToastKind::Success);
        assert!(b > a);
    }
}
