use contracts::items::CatalogItem;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::editor::ItemEditor;
use crate::domain::item_library::api;
use crate::shared::api_client::ApiClient;
use crate::shared::collection::{Collection, LoadPhase};
use crate::shared::confirm::confirm;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::ToastService;

/// Optimistic rows have no identity yet; opening the editor on one
/// would fork a second create for the same record.
fn row_is_editable(item: &CatalogItem) -> bool {
    item.id.is_some()
}

#[component]
pub fn ItemLibraryPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not provided in context");

    let collection = RwSignal::new(Collection::<CatalogItem>::new());
    let (filter, set_filter) = signal(String::new());
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let fetch = {
        let client = client.clone();
        move || {
            let client = client.clone();
            collection.update(|c| c.begin_load());
            spawn_local(async move {
                let result = api::fetch_items(&client).await;
                // The page may have been left before the fetch settled.
                match collection.try_update(|c| c.finish_load(result)) {
                    Some(Ok(())) => {
                        set_load_error.try_set(None);
                    }
                    Some(Err(e)) => {
                        let message = format!("Failed to load items: {}", e);
                        toasts.error(message.clone());
                        set_load_error.try_set(Some(message));
                    }
                    None => {}
                }
            });
        }
    };

    let open_editor = move |seed: Option<CatalogItem>| {
        modal_stack.push(move |handle| {
            let on_done = Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! {
                <ItemEditor seed=seed.clone() collection=collection on_done=on_done />
            }
            .into_any()
        });
    };

    let delete_one = {
        let client = client.clone();
        move |id: i64, description: String| {
            if !confirm(&format!("Delete item \"{}\"?", description)) {
                return;
            }
            let client = client.clone();
            spawn_local(async move {
                match api::delete_item(&client, id).await {
                    Ok(()) => {
                        collection.try_update(|c| c.remove(id));
                        toasts.success("Item deleted");
                    }
                    Err(e) => toasts.error(e.to_string()),
                }
            });
        }
    };

    fetch();

    let fetch_again = fetch.clone();
    let open_new = open_editor.clone();

    view! {
        <div class="page item-library">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Item library"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_new(None)>
                        "New item"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch_again()>
                        "Refresh"
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                <input
                    type="text"
                    class="filter-bar__input"
                    placeholder="Filter by description or HSN/SAC code"
                    prop:value=move || filter.get()
                    on:input=move |ev| set_filter.set(event_target_value(&ev))
                />
            </div>

            {move || load_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || collection.get().is_loading().then(|| view! {
                <div class="loading-indicator">"Loading…"</div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Description"</th>
                            <th class="table__header-cell">"HSN/SAC"</th>
                            <th class="table__header-cell">"GST rate"</th>
                            <th class="table__header-cell">"Unit"</th>
                            <th class="table__header-cell">"Status"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let needle = filter.get().trim().to_lowercase();
                            let rows = collection.get().project(|item| {
                                needle.is_empty()
                                    || item.description.to_lowercase().contains(&needle)
                                    || item.hsn_sac_code.to_lowercase().contains(&needle)
                            });
                            rows.into_iter().map(|item| {
                                // Entries without an id are optimistic placeholders
                                // still waiting for the server.
                                let pending = item.id.is_none();
                                let edit_seed = item.clone();
                                let open = open_editor.clone();
                                let delete = delete_one.clone();
                                let description = item.description.clone();
                                view! {
                                    <tr
                                        class="table__row"
                                        class:table__row--pending=pending
                                        on:click=move |_| {
                                            if row_is_editable(&edit_seed) {
                                                open(Some(edit_seed.clone()));
                                            }
                                        }
                                    >
                                        <td class="table__cell">{item.description.clone()}</td>
                                        <td class="table__cell">{item.hsn_sac_code.clone()}</td>
                                        <td class="table__cell">{format!("{}%", item.gst_rate)}</td>
                                        <td class="table__cell">{item.unit.clone()}</td>
                                        <td class="table__cell">
                                            {if pending { "Saving…" } else if item.is_active { "Active" } else { "Inactive" }}
                                        </td>
                                        <td class="table__cell table__cell--actions">
                                            {item.id.map(|id| {
                                                let delete = delete.clone();
                                                let description = description.clone();
                                                view! {
                                                    <button
                                                        class="button button--danger"
                                                        on:click=move |e| {
                                                            e.stop_propagation();
                                                            delete(id, description.clone());
                                                        }
                                                    >
                                                        "Delete"
                                                    </button>
                                                }
                                            })}
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            {move || {
                let c = collection.get();
                (c.is_empty() && c.phase() == LoadPhase::Ready).then(|| view! {
                    <div class="empty-state">"No items yet. Create one to reuse it on invoices."</div>
                })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_awaiting_the_server_cannot_be_edited() {
        let pending = CatalogItem {
            id: None,
            description: "Consulting".to_string(),
            ..CatalogItem::default()
        };
        assert!(!row_is_editable(&pending));

        let persisted = CatalogItem {
            id: Some(3),
            ..pending
        };
        assert!(row_is_editable(&persisted));
    }
}
