//! Centralized modal stack.
//!
//! Screens push a builder; the builder receives a [`ModalHandle`] so
//! the modal content can close itself from its own buttons. An entry
//! may carry a close hook, which runs on every close path (the modal's
//! own buttons and the overlay click alike).

use leptos::prelude::*;

use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

type Builder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: Builder,
    on_close: Option<CloseHook>,
}

/// Handle returned by [`ModalStackService::push`]. Cloneable so event
/// handlers inside the modal can close it.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Plain stack state; ids are monotonically increasing.
#[derive(Clone, Default)]
struct ModalStack {
    entries: Vec<ModalEntry>,
    next_id: u64,
}

impl ModalStack {
    fn push(&mut self, builder: Builder, on_close: Option<CloseHook>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ModalEntry {
            id,
            builder,
            on_close,
        });
        id
    }

    /// Removes the entry and returns its close hook, if any. Closing an
    /// already-closed id is a no-op, so the hook cannot run twice.
    fn close(&mut self, id: u64) -> Option<CloseHook> {
        let hook = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.on_close.clone());
        self.entries.retain(|e| e.id != id);
        hook
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<ModalStack>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(ModalStack::default()),
        }
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(Arc::new(builder), None)
    }

    /// Push a modal whose close hook runs whenever the modal closes,
    /// regardless of which control closed it.
    pub fn push_with_on_close<F, C>(&self, builder: F, on_close: C) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        self.push_entry(Arc::new(builder), Some(Arc::new(on_close)))
    }

    fn push_entry(&self, builder: Builder, on_close: Option<CloseHook>) -> ModalHandle {
        let id = match self.stack.try_update(|s| s.push(builder, on_close)) {
            Some(id) => id,
            None => 0,
        };
        ModalHandle { id, svc: *self }
    }

    /// Close on the next tick to avoid dropping the originating DOM
    /// event handler while it is still being dispatched.
    fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            if let Some(Some(hook)) = svc.stack.try_update(|s| s.close(id)) {
                hook();
            }
        });
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders every open modal; clicking the overlay closes that modal.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>().expect("ModalStackService not provided in context");

    view! {
        {move || svc.stack.get().entries.into_iter().map(|entry| {
            let handle = ModalHandle { id: entry.id, svc };
            let overlay_handle = handle.clone();
            view! {
                <div class="modal-overlay" on:click=move |_| overlay_handle.close()>
                    <div class="modal-content" on:click=|e| e.stop_propagation()>
                        {(entry.builder)(handle.clone())}
                    </div>
                </div>
            }
        }).collect_view()}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn blank(_: ModalHandle) -> AnyView {
        ().into_any()
    }

    #[test]
    fn any_close_path_runs_the_hook_exactly_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let hook: CloseHook = {
            let runs = runs.clone();
            Arc::new(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            })
        };

        let mut stack = ModalStack::default();
        let id = stack.push(Arc::new(blank), Some(hook));

        if let Some(hook) = stack.close(id) {
            hook();
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // Closing again (e.g. overlay and button racing) is a no-op.
        assert!(stack.close(id).is_none());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn entries_without_a_hook_close_silently() {
        let mut stack = ModalStack::default();
        let id = stack.push(Arc::new(blank), None);
        assert!(stack.close(id).is_none());
        assert!(stack.entries.is_empty());
    }
}
