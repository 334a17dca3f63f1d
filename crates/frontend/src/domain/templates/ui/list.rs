use contracts::templates::DocumentTemplate;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::editor::TemplateEditor;
use crate::domain::templates::api;
use crate::shared::api_client::ApiClient;
use crate::shared::collection::{Collection, LoadPhase};
use crate::shared::confirm::confirm;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::ToastService;

#[component]
pub fn TemplatesPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not provided in context");

    let collection = RwSignal::new(Collection::<DocumentTemplate>::new());
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let fetch = {
        let client = client.clone();
        move || {
            let client = client.clone();
            collection.update(|c| c.begin_load());
            spawn_local(async move {
                let result = api::fetch_templates(&client).await;
                match collection.try_update(|c| c.finish_load(result)) {
                    Some(Ok(())) => {
                        set_load_error.try_set(None);
                    }
                    Some(Err(e)) => {
                        let message = format!("Failed to load templates: {}", e);
                        toasts.error(message.clone());
                        set_load_error.try_set(Some(message));
                    }
                    None => {}
                }
            });
        }
    };

    let open_editor = move |seed: Option<DocumentTemplate>| {
        modal_stack.push(move |handle| {
            let on_done = Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! {
                <TemplateEditor seed=seed.clone() collection=collection on_done=on_done />
            }
            .into_any()
        });
    };

    // True uniqueness of the default flag is a server invariant, so a
    // successful update is followed by a full refetch instead of a
    // local flag flip.
    let make_default = {
        let client = client.clone();
        let fetch = fetch.clone();
        move |template: DocumentTemplate| {
            let id = match template.id {
                Some(id) => id,
                None => return,
            };
            let client = client.clone();
            let fetch = fetch.clone();
            spawn_local(async move {
                match api::update_template(&client, id, &template.as_default()).await {
                    Ok(_) => {
                        toasts.success("Default template updated");
                        fetch();
                    }
                    Err(e) => toasts.error(e.to_string()),
                }
            });
        }
    };

    let upload = {
        let client = client.clone();
        let fetch = fetch.clone();
        move |id: i64, file: web_sys::File| {
            let client = client.clone();
            let fetch = fetch.clone();
            spawn_local(async move {
                match api::upload_template_file(&client, id, file).await {
                    Ok(response) => {
                        toasts.success(response.message);
                        fetch();
                    }
                    // Failed uploads leave the list untouched.
                    Err(e) => toasts.error(e.to_string()),
                }
            });
        }
    };

    let delete_one = {
        let client = client.clone();
        move |id: i64, name: String| {
            if !confirm(&format!("Delete template \"{}\"?", name)) {
                return;
            }
            let client = client.clone();
            spawn_local(async move {
                match api::delete_template(&client, id).await {
                    Ok(()) => {
                        collection.try_update(|c| c.remove(id));
                        toasts.success("Template deleted");
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
        <div class="page templates">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Document templates"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_new(None)>
                        "New template"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch_again()>
                        "Refresh"
                    </button>
                </div>
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
                            <th class="table__header-cell">"Name"</th>
                            <th class="table__header-cell">"Description"</th>
                            <th class="table__header-cell">"File"</th>
                            <th class="table__header-cell">"Default"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || collection.get().records().into_iter().map(|template| {
                            let edit_seed = template.clone();
                            let open = open_editor.clone();
                            let promote = make_default.clone();
                            let promote_seed = template.clone();
                            let upload = upload.clone();
                            let delete = delete_one.clone();
                            let name = template.name.clone();
                            view! {
                                <tr class="table__row" on:click=move |_| open(Some(edit_seed.clone()))>
                                    <td class="table__cell">{template.name.clone()}</td>
                                    <td class="table__cell">{template.description.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="table__cell">{template.file_name.clone().unwrap_or_else(|| "No file".to_string())}</td>
                                    <td class="table__cell">
                                        {if template.is_default {
                                            view! { <span class="badge badge--default">"Default"</span> }.into_any()
                                        } else {
                                            match template.id {
                                                Some(_) => view! {
                                                    <button
                                                        class="button button--small"
                                                        on:click=move |e| {
                                                            e.stop_propagation();
                                                            promote(promote_seed.clone());
                                                        }
                                                    >
                                                        "Make default"
                                                    </button>
                                                }.into_any(),
                                                None => view! { <span>"-"</span> }.into_any(),
                                            }
                                        }}
                                    </td>
                                    <td class="table__cell table__cell--actions">
                                        {template.id.map(|id| {
                                            let upload = upload.clone();
                                            let delete = delete.clone();
                                            let name = name.clone();
                                            view! {
                                                <label class="button button--small" on:click=|e| e.stop_propagation()>
                                                    "Upload PDF"
                                                    <input
                                                        type="file"
                                                        accept=".pdf"
                                                        style="display: none;"
                                                        on:change=move |ev| {
                                                            let input = event_target::<web_sys::HtmlInputElement>(&ev);
                                                            if let Some(file) = input.files().and_then(|f| f.get(0)) {
                                                                upload(id, file);
                                                            }
                                                            input.set_value("");
                                                        }
                                                    />
                                                </label>
                                                <button
                                                    class="button button--danger button--small"
                                                    on:click=move |e| {
                                                        e.stop_propagation();
                                                        delete(id, name.clone());
                                                    }
                                                >
                                                    "Delete"
                                                </button>
                                            }
                                        })}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || {
                let c = collection.get();
                (c.is_empty() && c.phase() == LoadPhase::Ready).then(|| view! {
                    <div class="empty-state">"No templates yet. Create one and upload a PDF."</div>
                })
            }}
        </div>
    }
}
