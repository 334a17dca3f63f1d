//! Application shell: header with the page switcher.
//!
//! Routing proper is out of scope; pages are switched on a signal.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Items,
    Templates,
    Scheduling,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Items => "Items",
            Page::Templates => "Templates",
            Page::Scheduling => "CA consultation",
        }
    }
}

const PAGES: [Page; 3] = [Page::Items, Page::Templates, Page::Scheduling];

#[component]
pub fn Shell(
    page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <div class="shell">
            <header class="shell__header">
                <span class="shell__brand">"Invoicer"</span>
                <nav class="shell__nav">
                    {PAGES.into_iter().map(|target| {
                        view! {
                            <button
                                class="shell__nav-item"
                                class:shell__nav-item--active=move || page.get() == target
                                on:click=move |_| set_page.set(target)
                            >
                                {target.title()}
                            </button>
                        }
                    }).collect_view()}
                </nav>
            </header>
            <main class="shell__body">
                {children()}
            </main>
        </div>
    }
}
