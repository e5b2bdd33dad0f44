use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::slot_grid::{BookingSummary, NoticeBanner, SlotButton};
use crate::components::spinner::Spinner;
use crate::data::api::VenueApi;
use crate::data::availability::AvailabilityLoader;
use crate::data::form::{ContactRule, ValidationPolicy};
use crate::data::reservation::{BookingSession, HttpReservationSink, Pricing, ReservationSink};
use crate::data::slots::PerDeviceSelection;
use crate::i18n::{use_i18n, Text};
use crate::settings::Settings;
use crate::utils::date::{format_long_date, iso_date, parse_iso_date, today};

const INPUT_CLASS: &str = "w-full mb-3 px-3 py-2 rounded-md bg-slate-900 border border-slate-600 text-slate-200 hover:border-amber-300 focus:outline-none focus:border-amber-300";

/// In-venue booking: every device has its own column of hourly slots.
#[component]
pub fn BookingPage() -> impl IntoView {
    let i18n = use_i18n();
    let reset_after = Duration::from_millis(Settings::current().success_reset_ms);

    let session = RwSignal::new(BookingSession::<PerDeviceSelection>::new(
        today(),
        Pricing::FromServer,
        ValidationPolicy::new(ContactRule::Email),
    ));

    let date = Memo::new(move |_| session.with(|s| s.date()));
    let loading = Memo::new(move |_| session.with(|s| s.is_loading()));
    let submitting = Memo::new(move |_| session.with(|s| s.is_submitting()));
    let success = Memo::new(move |_| session.with(|s| s.is_success()));
    let grid = Memo::new(move |_| session.with(|s| (s.time_slots(), s.devices().to_vec())));

    let load_day = move || {
        let Some(ticket) = session.try_update(|s| s.begin_load()) else {
            return;
        };
        spawn_local(async move {
            let day = AvailabilityLoader::http(VenueApi::current()).load(ticket.date).await;
            session.update(|s| {
                s.finish_load(ticket, day);
            });
        });
    };

    Effect::new(move |_| {
        let _ = date.get();
        load_day();
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
                        session.update(|s| {
                            s.dismiss_success(attempt);
                        })
                    },
                    reset_after,
                );
            }
        });
    };

    let shift_day = move |forward: bool| {
        session.update(|s| {
            let target = if forward { s.date().succ_opt() } else { s.date().pred_opt() };
            if let Some(target) = target {
                s.select_date(target);
            }
        });
    };

    view! {
        <div class="py-8">
            <div class="flex justify-between items-center mb-4">
                <div>
                    <h1 class="text-3xl font-bold mb-1">{move || i18n.t(Text::BookYourSlot)}</h1>
                    <p class="text-slate-400">{move || i18n.t(Text::LocationName)}</p>
                </div>
                {move || session.with(|s| s.price()).map(|price| view! {
                    <span class="text-lg font-bold text-amber-300">
                        {format!("{price} EUR / {}", i18n.t(Text::Hour))}
                    </span>
                })}
            </div>

            <div class="flex items-center gap-2 mb-6">
                <input
                    type="date"
                    class="h-10 px-3 rounded-md bg-slate-900 border border-slate-600 text-slate-200"
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
                <button
                    type="button"
                    class="px-3 py-2 rounded-md hover:bg-white/10 disabled:text-white/30"
                    title=move || i18n.t(Text::PreviousDay)
                    disabled=move || !session.with(|s| s.can_go_back())
                    on:click=move |_| shift_day(false)
                >"‹"</button>
                <button
                    type="button"
                    class="px-3 py-2 rounded-md hover:bg-white/10"
                    title=move || i18n.t(Text::NextDay)
                    on:click=move |_| shift_day(true)
                >"›"</button>
                <span class="text-sm text-slate-400">{move || format_long_date(date.get(), i18n.language())}</span>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center items-center py-20 min-h-80">
                        <Spinner size=48/>
                    </div>
                }
            >
                <div class="grid grid-cols-1 md:grid-cols-4 gap-4 mb-8">
                    {move || {
                        let (slots, devices) = grid.get();
                        devices.into_iter().map(|device| {
                            let id = device.id;
                            view! {
                                <div>
                                    <h3 class="text-lg font-semibold mb-3">{device.name}</h3>
                                    {slots.iter().map(|&hour| view! {
                                        <SlotButton
                                            hour=hour
                                            state=Signal::derive(move || session.with(|s| s.slot_state((id, hour))))
                                            on_toggle=move || session.update(|s| {
                                                s.toggle((id, hour));
                                            })
                                        />
                                    }).collect::<Vec<_>>()}
                                </div>
                            }
                        }).collect::<Vec<_>>()
                    }}
                </div>

                <div class="max-w-5xl mx-auto flex flex-col md:flex-row items-start justify-center gap-4">
                    <div class="w-full max-w-md">
                        <input
                            type="text"
                            required
                            class=INPUT_CLASS
                            placeholder=move || i18n.t(Text::FullName)
                            prop:value=move || session.with(|s| s.form().fullname.clone())
                            on:input=move |ev| session.update(|s| s.form_mut().fullname = event_target_value(&ev))
                        />
                        <input
                            type="email"
                            class=INPUT_CLASS
                            placeholder=move || i18n.t(Text::Email)
                            prop:value=move || session.with(|s| s.form().email.clone())
                            on:input=move |ev| session.update(|s| s.form_mut().email = event_target_value(&ev))
                        />
                        <textarea
                            rows=3
                            class=INPUT_CLASS
                            placeholder=move || i18n.t(Text::BookingDescription)
                            prop:value=move || session.with(|s| s.form().description.clone())
                            on:input=move |ev| session.update(|s| s.form_mut().description = event_target_value(&ev))
                        ></textarea>
                        <p class="text-xs text-slate-400">{move || i18n.t(Text::NotesDescription)}</p>
                    </div>

                    <BookingSummary
                        date=date
                        lines=Signal::derive(move || session.with(|s| s.summary()))
                        estimated_price=Signal::derive(move || session.with(|s| s.estimated_price()))
                    />
                </div>

                <NoticeBanner
                    notice=Signal::derive(move || session.with(|s| s.notice()))
                    on_dismiss=move || session.update(|s| s.dismiss_notice())
                />

                <div class="w-full flex justify-center items-center gap-3 mt-8">
                    <button
                        type="button"
                        class=move || if success.get() {
                            "px-6 py-2 rounded-md font-semibold bg-green-500 hover:bg-green-700 text-white"
                        } else {
                            "px-6 py-2 rounded-md font-semibold bg-amber-300 hover:bg-amber-400 text-slate-900 disabled:opacity-60"
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
    }
}
