use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::slot_grid::{BookingSummary, NoticeBanner, SlotButton};
use crate::components::spinner::Spinner;
use crate::data::api::VenueApi;
use crate::data::availability::AvailabilityLoader;
use crate::data::form::{BookingFormData, ContactRule, Placement, ValidationPolicy};
use crate::data::reservation::{BookingSession, HttpReservationSink, Pricing, ReservationSink};
use crate::data::shared_booking::DayAvailability;
use crate::data::slots::FlatSelection;
use crate::i18n::{use_i18n, Text};
use crate::settings::Settings;
use crate::utils::date::{format_long_date, iso_date, parse_iso_date, today};

const FIELD_CLASS: &str = "w-full mb-3 px-3 py-2 rounded-md bg-slate-900 border border-slate-600 text-slate-200 focus:outline-none focus:border-amber-300";

/// Booking of the mobile VR set delivered to the visitor's location. The
/// set is one shared resource, so slots are picked from a single row.
#[component]
pub fn OutboundBooking(
    /// Availability already fetched for today, if the caller has it.
    #[prop(into, optional)]
    initial: Signal<Option<DayAvailability>>,
) -> impl IntoView {
    let i18n = use_i18n();
    let settings = Settings::current();
    let reset_after = Duration::from_millis(settings.success_reset_ms);

    let (open, set_open) = signal(false);
    let session = RwSignal::new(
        BookingSession::<FlatSelection>::new(
            today(),
            Pricing::Fixed(settings.outbound_price),
            ValidationPolicy::new(ContactRule::EmailOrPhone),
        )
        .with_blank_form(BookingFormData::outbound()),
    );

    let date = Memo::new(move |_| session.with(|s| s.date()));
    let loading = Memo::new(move |_| session.with(|s| s.is_loading()));
    let submitting = Memo::new(move |_| session.with(|s| s.is_submitting()));
    let success = Memo::new(move |_| session.with(|s| s.is_success()));
    let slots = Memo::new(move |_| session.with(|s| s.time_slots()));

    let load_day = move || {
        let Some(ticket) = session.try_update(|s| s.begin_load()) else {
            return;
        };
        let mut loader = AvailabilityLoader::http(VenueApi::current());
        if let Some(day) = initial.get_untracked() {
            loader = loader.with_initial(today(), day);
        }
        spawn_local(async move {
            let day = loader.load(ticket.date).await;
            session.update(|s| {
                s.finish_load(ticket, day);
            });
        });
    };

    Effect::new(move |_| {
        let _ = date.get();
        if open.get() {
            load_day();
        }
    });

    let handle_booking = move |_| {
        let Some(request) = session.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = HttpReservationSink::new(VenueApi::current())
                .reserve(&request)
                .await
                .map(|_| ());
            let succeeded = session.try_update(|s| s.finish_submit(outcome)).flatten();
            if let Some(attempt) = succeeded {
                set_timeout(
                    move || {
                        // a later attempt owns the success state now
                        if session.try_update(|s| s.dismiss_success(attempt)) == Some(true) {
                            set_open.set(false);
                        }
                    },
                    reset_after,
                );
            }
        });
    };

    view! {
        <button
            type="button"
            class="px-6 py-3 rounded-md font-semibold bg-amber-300 hover:bg-amber-400 text-slate-900"
            on:click=move |_| set_open.set(true)
        >
            {move || i18n.t(Text::BookOutbound)}
        </button>

        <Show when=move || open.get()>
            <div class="fixed inset-0 z-40 bg-black/70 flex items-center justify-center" on:click=move |_| set_open.set(false)>
                <div
                    class="relative w-11/12 md:w-[800px] max-h-[95vh] overflow-y-auto p-6 rounded-lg bg-slate-950 border border-slate-700"
                    on:click=|ev| ev.stop_propagation()
                >
                    <button
                        type="button"
                        class="absolute top-3 right-3 text-slate-400 hover:text-white"
                        title=move || i18n.t(Text::Close)
                        on:click=move |_| set_open.set(false)
                    >"✕"</button>

                    <h2 class="text-2xl font-bold mb-1">{move || i18n.t(Text::OutboundTitle)}</h2>
                    <p class="text-amber-300 font-semibold mb-4">
                        {move || format!("{} EUR / {}", settings.outbound_price, i18n.t(Text::Hour))}
                    </p>

                    <input
                        type="date"
                        class="h-10 mb-2 px-3 rounded-md bg-slate-900 border border-slate-600 text-slate-200"
                        min=iso_date(today())
                        prop:value=move || iso_date(date.get())
                        on:change=move |ev| {
                            if let Some(picked) = parse_iso_date(&event_target_value(&ev)) {
                                session.update(|s| {
                                    s.select_date(picked);
                                });
                            }
                        }
                    />
                    <p class="text-sm text-slate-400 mb-4">{move || format_long_date(date.get(), i18n.language())}</p>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex justify-center py-10"><Spinner size=48/></div>
                        }
                    >
                        <div class="flex flex-wrap mb-4">
                            {move || slots.get().into_iter().map(|hour| view! {
                                <SlotButton
                                    hour=hour
                                    state=Signal::derive(move || session.with(|s| s.slot_state(hour)))
                                    on_toggle=move || session.update(|s| {
                                        s.toggle(hour);
                                    })
                                />
                            }).collect::<Vec<_>>()}
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                            <input
                                type="text"
                                required
                                class=FIELD_CLASS
                                placeholder=move || i18n.t(Text::FullName)
                                prop:value=move || session.with(|s| s.form().fullname.clone())
                                on:input=move |ev| session.update(|s| s.form_mut().fullname = event_target_value(&ev))
                            />
                            <input
                                type="email"
                                class=FIELD_CLASS
                                placeholder=move || i18n.t(Text::Email)
                                prop:value=move || session.with(|s| s.form().email.clone())
                                on:input=move |ev| session.update(|s| s.form_mut().email = event_target_value(&ev))
                            />
                            <input
                                type="tel"
                                class=FIELD_CLASS
                                placeholder=move || i18n.t(Text::Phone)
                                prop:value=move || session.with(|s| s.form().phone.clone())
                                on:input=move |ev| session.update(|s| s.form_mut().phone = event_target_value(&ev))
                            />
                            <select
                                class=FIELD_CLASS
                                prop:value=move || session.with(|s| s.form().inside_outside.unwrap_or_default().as_str())
                                on:change=move |ev| session.update(|s| {
                                    s.form_mut().inside_outside = Some(Placement::parse(&event_target_value(&ev)));
                                })
                            >
                                <option value=Placement::Inside.as_str()>{move || i18n.t(Text::Inside)}</option>
                                <option value=Placement::Outside.as_str()>{move || i18n.t(Text::Outside)}</option>
                            </select>
                            <input
                                type="number"
                                min="1"
                                class=FIELD_CLASS
                                placeholder=move || i18n.t(Text::DevicesCount)
                                prop:value=move || session.with(|s| {
                                    s.form().devices_count.map(|count| count.to_string()).unwrap_or_default()
                                })
                                on:input=move |ev| session.update(|s| {
                                    s.form_mut().devices_count = event_target_value(&ev).trim().parse().ok();
                                })
                            />
                            <input
                                type="text"
                                class=FIELD_CLASS
                                placeholder=move || i18n.t(Text::Address)
                                prop:value=move || session.with(|s| s.form().address.clone())
                                on:input=move |ev| session.update(|s| s.form_mut().address = event_target_value(&ev))
                            />
                        </div>
                        <textarea
                            rows=3
                            class=FIELD_CLASS
                            placeholder=move || i18n.t(Text::BookingDescription)
                            prop:value=move || session.with(|s| s.form().description.clone())
                            on:input=move |ev| session.update(|s| s.form_mut().description = event_target_value(&ev))
                        ></textarea>

                        <BookingSummary
                            date=date
                            lines=Signal::derive(move || session.with(|s| s.summary()))
                            estimated_price=Signal::derive(move || session.with(|s| s.estimated_price()))
                        />

                        <NoticeBanner
                            notice=Signal::derive(move || session.with(|s| s.notice()))
                            on_dismiss=move || session.update(|s| s.dismiss_notice())
                        />

                        <div class="flex items-center gap-3 mt-6">
                            <button
                                type="button"
                                class=move || if success.get() {
                                    "w-full md:w-auto px-6 py-2 rounded-md font-semibold bg-green-500 hover:bg-green-700 text-white"
                                } else {
                                    "w-full md:w-auto px-6 py-2 rounded-md font-semibold bg-amber-300 hover:bg-amber-400 text-slate-900 disabled:opacity-60"
                                }
                                disabled=move || submitting.get()
                                on:click=handle_booking
                            >
                                {move || if success.get() { i18n.t(Text::BookingSuccess) } else { i18n.t(Text::ConfirmBooking) }}
                            </button>
                            <Show when=move || submitting.get()>
                                <Spinner size=24/>
                            </Show>
                        </div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
