use contracts::scheduling::{AvailableSlots, ConsultationRequestDto};
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use crate::domain::scheduling::api;
use crate::shared::api_client::ApiClient;
use crate::shared::draft::Draft;
use crate::shared::toast::ToastService;

/// Booking dialog: availability grid plus the contact form.
///
/// Availability is computed server-side; the grid only reflects it.
#[component]
pub fn BookingDialog(on_done: Rc<dyn Fn(())>) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");

    let slots = RwSignal::new(Option::<AvailableSlots>::None);
    let (slots_error, set_slots_error) = signal::<Option<String>>(None);

    let draft = RwSignal::new(Draft::<ConsultationRequestDto>::new());
    draft.update(|d| d.start(ConsultationRequestDto::default()));
    let violations = RwSignal::new(Vec::<&'static str>::new());

    {
        let client = client.clone();
        spawn_local(async move {
            match api::fetch_available_slots(&client).await {
                Ok(response) => {
                    slots.try_set(Some(response));
                }
                Err(e) => {
                    let message = format!("Failed to load slots: {}", e);
                    toasts.error(message.clone());
                    set_slots_error.try_set(Some(message));
                }
            }
        });
    }

    let pick_slot = move |date: String, time: String| {
        draft.update(|d| {
            d.set(|b| {
                b.preferred_date = Some(date.clone());
                b.preferred_time = Some(time.clone());
            })
        });
    };

    let handle_book = {
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
                match api::schedule_consultation(&client, &payload).await {
                    Ok(response) => {
                        draft.try_update(|d| d.submit_succeeded());
                        toasts.success(response.message);
                        (on_done)(());
                    }
                    Err(e) => {
                        draft.try_update(|d| d.submit_failed());
                        toasts.error(e.to_string());
                    }
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

    let selected_slot = move || {
        draft.get().buffer().and_then(|b| {
            match (&b.preferred_date, &b.preferred_time) {
                (Some(date), Some(time)) => Some((date.clone(), time.clone())),
                _ => None,
            }
        })
    };

    view! {
        <div class="details-container booking-dialog">
            <div class="details-header">
                <h3>"Book a free consultation"</h3>
                {move || slots.get().map(|s| {
                    let ca = s.ca_info;
                    let qualification = ca.qualification.map(|q| format!(" ({})", q)).unwrap_or_default();
                    view! {
                        <p class="booking-dialog__ca">
                            {format!("with {}{}, times in {}", ca.name, qualification, s.timezone)}
                        </p>
                    }
                })}
            </div>

            {move || slots_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="booking-dialog__slots">
                {move || slots.get().map(|s| s.slots.into_iter().map(|slot| {
                    let date = slot.date.clone();
                    let time = slot.time.clone();
                    let is_selected = {
                        let date = date.clone();
                        let time = time.clone();
                        move || selected_slot() == Some((date.clone(), time.clone()))
                    };
                    let pick = pick_slot.clone();
                    view! {
                        <button
                            class="slot-button"
                            class:slot-button--selected=is_selected
                            disabled=!slot.available
                            on:click=move |_| pick(date.clone(), time.clone())
                        >
                            {format!("{} {}", slot.date, slot.time)}
                        </button>
                    }
                }).collect_view())}
            </div>

            <div class="details-form">
                <div class="form-group" class:form-group--invalid=move || violations.get().contains(&"contact_name")>
                    <label for="contact_name">"Your name"</label>
                    <input
                        type="text"
                        id="contact_name"
                        prop:value=move || draft.get().buffer().map(|b| b.contact_name.clone()).unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.contact_name = value.clone()));
                        }
                    />
                    {move || violations.get().contains(&"contact_name").then(|| view! {
                        <span class="field-error">"Name is required"</span>
                    })}
                </div>

                <div class="form-group" class:form-group--invalid=move || violations.get().contains(&"phone")>
                    <label for="phone">"Phone"</label>
                    <input
                        type="tel"
                        id="phone"
                        prop:value=move || draft.get().buffer().map(|b| b.phone.clone()).unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| b.phone = value.clone()));
                        }
                    />
                    {move || violations.get().contains(&"phone").then(|| view! {
                        <span class="field-error">"Phone is required"</span>
                    })}
                </div>

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        prop:value=move || {
                            draft.get().buffer().and_then(|b| b.email.clone()).unwrap_or_default()
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| {
                                b.email = if value.trim().is_empty() { None } else { Some(value.clone()) };
                            }));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="notes">"What would you like to discuss?"</label>
                    <textarea
                        id="notes"
                        prop:value=move || {
                            draft.get().buffer().and_then(|b| b.notes.clone()).unwrap_or_default()
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set(|b| {
                                b.notes = if value.trim().is_empty() { None } else { Some(value.clone()) };
                            }));
                        }
                    ></textarea>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || draft.get().is_submitting()
                    on:click=handle_book
                >
                    {move || if draft.get().is_submitting() { "Booking…" } else { "Book call" }}
                </button>
                <button class="button button--secondary" on:click=handle_cancel>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
