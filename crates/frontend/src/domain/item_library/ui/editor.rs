use contracts::items::CatalogItem;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use crate::domain::item_library::api;
use crate::shared::api_client::ApiClient;
use crate::shared::collection::Collection;
use crate::shared::draft::Draft;
use crate::shared::toast::ToastService;

/// Create/edit form for one catalog item. Create and edit share the
/// same draft and commit path; the buffer's id decides POST vs PUT.
#[component]
pub fn ItemEditor(
    seed: Option<CatalogItem>,
    collection: RwSignal<Collection<CatalogItem>>,
    on_done: Rc<dyn Fn(())>,
) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");

    let is_edit = seed.is_some();
    let draft = RwSignal::new(Draft::<CatalogItem>::new());
    draft.update(|d| d.start(seed.unwrap_or_default()));
    let violations = RwSignal::new(Vec::<&'static str>::new());

    let handle_save = {
        let client = client.clone();
        let on_done = on_done.clone();
        move |_| {
            let outcome = match draft.try_update(|d| d.begin_submit()) {
                Some(outcome) => outcome,
                None => return,
            };
            let payload = match outcome {
                Ok(payload) => payload,
                Err(missing) => {
                    violations.set(missing);
                    return;
                }
            };
            violations.set(Vec::new());

            let client = client.clone();
            let on_done = on_done.clone();
            spawn_local(async move {
                match payload.id {
                    None => {
                        // Optimistic insert; the placeholder is reconciled or
                        // discarded once the server answers.
                        let pending = collection.try_update(|c| c.insert_pending(payload.clone()));
                        match api::create_item(&client, &payload).await {
                            Ok(created) => {
                                if let Some(key) = pending {
                                    collection.try_update(|c| c.reconcile_pending(key, created));
                                }
                                draft.try_update(|d| d.submit_succeeded());
                                toasts.success("Item created");
                                (on_done)(());
                            }
                            Err(e) => {
                                if let Some(key) = pending {
                                    collection.try_update(|c| c.discard_pending(key));
                                }
                                draft.try_update(|d| d.submit_failed());
                                toasts.error(e.to_string());
                            }
                        }
                    }
                    Some(id) => match api::update_item(&client, id, &payload).await {
                        Ok(updated) => {
                            collection.try_update(|c| c.replace(id, updated));
                            draft.try_update(|d| d.submit_succeeded());
                            toasts.success("Item updated");
                            (on_done)(());
                        }
                        Err(e) => {
                            draft.try_update(|d| d.submit_failed());
                            toasts.error(e.to_string());
                        }
                    },
                }
            });
        }
    };

    let handle_cancel = {
        let on_done = on_done.clone();
        move |_| {
            draft.update(|d| d.discard());
            (on_done)(());
        }
    };

    let field = move |read: fn(&CatalogItem) -> String| {
        move || draft.get().buffer().map(read).unwrap_or_default()
    };

    view! {
        <div class="details-container item-editor">
            <div class="details-header">
                <h3>{if is_edit { "Edit item" } else { "New item" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group" class:form-group--invalid=move || violations.get().contains(&"description")>
                    <label for="description">"Description"</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=field(|b| b.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.description = value.clone()));
                        }
                        placeholder="e.g. GST return filing"
                    />
                    {move || violations.get().contains(&"description").then(|| view! {
                        <span class="field-error">"Description is required"</span>
                    })}
                </div>

                <div class="form-group">
                    <label for="hsn_sac_code">"HSN/SAC code"</label>
                    <input
                        type="text"
                        id="hsn_sac_code"
                        prop:value=field(|b| b.hsn_sac_code.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.hsn_sac_code = value.clone()));
                        }
                        placeholder="4–8 digits"
                    />
                </div>

                <div class="form-group">
                    <label for="gst_rate">"GST rate (%)"</label>
                    <input
                        type="number"
                        id="gst_rate"
                        min="0"
                        max="28"
                        step="0.1"
                        prop:value=move || draft.get().buffer().map(|b| b.gst_rate.to_string()).unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            draft.update(|d| d.set(|b| b.gst_rate = value));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="unit">"Unit"</label>
                    <input
                        type="text"
                        id="unit"
                        prop:value=field(|b| b.unit.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.unit = value.clone()));
                        }
                        placeholder="e.g. nos, hour"
                    />
                </div>

                <div class="form-group form-group--inline">
                    <label for="is_active">"Active"</label>
                    <input
                        type="checkbox"
                        id="is_active"
                        prop:checked=move || draft.get().buffer().map(|b| b.is_active).unwrap_or(true)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            draft.update(|d| d.set(|b| b.is_active = checked));
                        }
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || draft.get().is_submitting()
                    on:click=handle_save
                >
                    {move || if draft.get().is_submitting() { "Saving…" } else { "Save" }}
                </button>
                <button class="button button--secondary" on:click=handle_cancel>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
