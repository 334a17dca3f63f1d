use contracts::scheduling::ConsultationRequest;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::booking::BookingDialog;
use crate::domain::scheduling::api;
use crate::shared::api_client::ApiClient;
use crate::shared::collection::{Collection, LoadPhase};
use crate::shared::eligibility::Eligibility;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::ToastService;

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[component]
pub fn SchedulingPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not provided in context");

    let eligibility = RwSignal::new(Eligibility::Unknown);
    let requests = RwSignal::new(Collection::<ConsultationRequest>::new());
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let evaluate = {
        let client = client.clone();
        move || {
            let client = client.clone();
            spawn_local(async move {
                let result = api::check_first_invoice(&client).await;
                eligibility.try_set(Eligibility::settle(result));
            });
        }
    };

    let fetch_requests = {
        let client = client.clone();
        move || {
            let client = client.clone();
            requests.update(|c| c.begin_load());
            spawn_local(async move {
                let result = api::fetch_my_requests(&client).await;
                match requests.try_update(|c| c.finish_load(result)) {
                    Some(Ok(())) => {
                        set_load_error.try_set(None);
                    }
                    Some(Err(e)) => {
                        let message = format!("Failed to load requests: {}", e);
                        toasts.error(message.clone());
                        set_load_error.try_set(Some(message));
                    }
                    None => {}
                }
            });
        }
    };

    // Closing the booking dialog re-evaluates eligibility so the promo
    // reflects a fresh booking without a page reload. The hook is bound
    // to the modal entry itself, so the overlay click and the dialog's
    // own buttons refresh alike.
    let open_booking = {
        let evaluate = evaluate.clone();
        let fetch_requests = fetch_requests.clone();
        move || {
            let refresh = {
                let evaluate = evaluate.clone();
                let fetch_requests = fetch_requests.clone();
                move || {
                    evaluate();
                    fetch_requests();
                }
            };
            modal_stack.push_with_on_close(
                move |handle| {
                    let on_done = Rc::new({
                        let handle = handle.clone();
                        move |_| handle.close()
                    });
                    view! { <BookingDialog on_done=on_done /> }.into_any()
                },
                refresh,
            );
        }
    };

    evaluate();
    fetch_requests();

    view! {
        <div class="page scheduling">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"CA consultation"</h1>
                </div>
            </div>

            // Suppressed entirely while the check is pending or failed,
            // so an ineligible user never sees it flash.
            {move || eligibility.get().is_shown().then(|| {
                let open = open_booking.clone();
                view! {
                    <div class="promo-card">
                        <div class="promo-card__body">
                            <h2>"Talk to a chartered accountant, free"</h2>
                            <p>"Creating your first invoice? Book a complimentary consultation call to get your GST setup right."</p>
                        </div>
                        <button class="button button--primary" on:click=move |_| open()>
                            "Book free consultation"
                        </button>
                    </div>
                }
            })}

            <h2 class="section-title">"My consultation requests"</h2>

            {move || load_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || requests.get().is_loading().then(|| view! {
                <div class="loading-indicator">"Loading…"</div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Contact"</th>
                            <th class="table__header-cell">"Phone"</th>
                            <th class="table__header-cell">"Preferred slot"</th>
                            <th class="table__header-cell">"Status"</th>
                            <th class="table__header-cell">"Requested"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || requests.get().records().into_iter().map(|request| {
                            let slot = match (&request.preferred_date, &request.preferred_time) {
                                (Some(date), Some(time)) => format!("{} {}", date, time),
                                (Some(date), None) => date.clone(),
                                _ => "Any".to_string(),
                            };
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">{request.contact_name.clone()}</td>
                                    <td class="table__cell">{request.phone.clone()}</td>
                                    <td class="table__cell">{slot}</td>
                                    <td class="table__cell">
                                        <span class=format!("badge badge--{}", request.status)>
                                            {request.status.clone()}
                                        </span>
                                    </td>
                                    <td class="table__cell">
                                        {request.created_at.map(format_timestamp).unwrap_or_else(|| "-".to_string())}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || {
                let c = requests.get();
                (c.is_empty() && c.phase() == LoadPhase::Ready).then(|| view! {
                    <div class="empty-state">"No consultation requests yet."</div>
                })
            }}
        </div>
    }
}
