use std::sync::Arc;

use leptos::prelude::*;

use crate::domain::item_library::ui::ItemLibraryPage;
use crate::domain::scheduling::ui::SchedulingPage;
use crate::domain::templates::ui::TemplatesPage;
use crate::layout::{Page, Shell};
use crate::shared::api_client::ApiClient;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::StorageTokens;

#[component]
pub fn App() -> impl IntoView {
    // Process-wide services, injected via context rather than accessed
    // as ambient globals.
    provide_context(ToastService::new());
    provide_context(ModalStackService::new());
    provide_context(ApiClient::new(Arc::new(StorageTokens)));

    let (page, set_page) = signal(Page::Items);

    view! {
        <Shell page=page set_page=set_page>
            {move || match page.get() {
                Page::Items => view! { <ItemLibraryPage /> }.into_any(),
                Page::Templates => view! { <TemplatesPage /> }.into_any(),
                Page::Scheduling => view! { <SchedulingPage /> }.into_any(),
            }}
        </Shell>
        <ModalHost />
        <ToastHost />
    }
}
