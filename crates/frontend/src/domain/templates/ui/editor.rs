use contracts::templates::DocumentTemplate;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use crate::domain::templates::api;
use crate::shared::api_client::ApiClient;
use crate::shared::collection::Collection;
use crate::shared::draft::Draft;
use crate::shared::toast::ToastService;

#[component]
pub fn TemplateEditor(
    seed: Option<DocumentTemplate>,
    collection: RwSignal<Collection<DocumentTemplate>>,
    on_done: Rc<dyn Fn(())>,
) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");

    let is_edit = seed.is_some();
    let draft = RwSignal::new(Draft::<DocumentTemplate>::new());
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
                    None => match api::create_template(&client, &payload).await {
                        Ok(created) => {
                            collection.try_update(|c| c.insert(created));
                            draft.try_update(|d| d.submit_succeeded());
                            toasts.success("Template created");
                            (on_done)(());
                        }
                        Err(e) => {
                            draft.try_update(|d| d.submit_failed());
                            toasts.error(e.to_string());
                        }
                    },
                    Some(id) => match api::update_template(&client, id, &payload).await {
                        Ok(updated) => {
                            collection.try_update(|c| c.replace(id, updated));
                            draft.try_update(|d| d.submit_succeeded());
                            toasts.success("Template updated");
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

    view! {
        <div class="details-container template-editor">
            <div class="details-header">
                <h3>{if is_edit { "Edit template" } else { "New template" }}</h3>
            </div>

            <div class="details-form">
                <div class="form-group" class:form-group--invalid=move || violations.get().contains(&"name")>
                    <label for="name">"Name"</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || draft.get().buffer().map(|b| b.name.clone()).unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.name = value.clone()));
                        }
                        placeholder="e.g. GST invoice"
                    />
                    {move || violations.get().contains(&"name").then(|| view! {
                        <span class="field-error">"Name is required"</span>
                    })}
                </div>

                <div class="form-group">
                    <label for="description">"Description"</label>
                    <textarea
                        id="description"
                        prop:value=move || {
                            draft.get().buffer().and_then(|b| b.description.clone()).unwrap_or_default()
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| {
                                b.description = if value.trim().is_empty() { None } else { Some(value.clone()) };
                            }));
                        }
                        placeholder="When to use this template"
                    ></textarea>
                </div>

                <div class="form-group form-group--inline">
                    <label for="is_default">"Use as default"</label>
                    <input
                        type="checkbox"
                        id="is_default"
                        prop:checked=move || draft.get().buffer().map(|b| b.is_default).unwrap_or(false)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            draft.update(|d| d.set(|b| b.is_default = checked));
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
