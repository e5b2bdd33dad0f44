use chrono::NaiveDate;
use leptos::prelude::*;

use crate::data::reservation::Notice;
use crate::data::shared_booking::Hour;
use crate::data::slots::{SlotState, SummaryLine};
use crate::i18n::{use_i18n, Text};
use crate::utils::date::{format_display_date, slot_label, slot_range_label};

fn slot_class(state: SlotState) -> &'static str {
    match state {
        // booked keeps its look regardless of hover or selection
        SlotState::Booked => "w-20 mr-2 mb-2 py-1.5 rounded-md border border-red-400/50 bg-red-500/20 text-slate-100 cursor-not-allowed",
        SlotState::Selected => "w-20 mr-2 mb-2 py-1.5 rounded-md border border-amber-300 bg-amber-300 text-slate-900 hover:bg-amber-400 transition-colors",
        SlotState::Free => "w-20 mr-2 mb-2 py-1.5 rounded-md border border-slate-500 bg-white/10 text-slate-100 hover:bg-slate-800 transition-colors",
    }
}

#[component]
pub fn SlotButton(
    hour: Hour,
    #[prop(into)] state: Signal<SlotState>,
    on_toggle: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || slot_class(state.get())
            disabled=move || state.get() == SlotState::Booked
            on:click=move |_| on_toggle()
        >
            {slot_label(hour)}
        </button>
    }
}

/// "Your booking" box listing the chosen slots and the estimated price.
#[component]
pub fn BookingSummary(
    #[prop(into)] date: Signal<NaiveDate>,
    #[prop(into)] lines: Signal<Vec<SummaryLine>>,
    #[prop(into)] estimated_price: Signal<Option<f64>>,
) -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <Show when=move || !lines.get().is_empty()>
            <div class="w-full max-w-md p-4 rounded-lg bg-amber-300 text-slate-900">
                <h3 class="text-lg font-semibold mb-2">{move || i18n.t(Text::YourBooking)}</h3>
                {move || {
                    let day = format_display_date(date.get());
                    lines.get().into_iter().map(|line| {
                        let device = line.device.map(|name| format!(" - {name}")).unwrap_or_default();
                        view! {
                            <p class="text-sm mb-1">{format!("{day} {}{device}", slot_range_label(line.hour))}</p>
                        }
                    }).collect::<Vec<_>>()
                }}
                {move || estimated_price.get().map(|price| view! {
                    <p class="text-sm mt-2">{format!("{}: {price},-", i18n.t(Text::EstimatedPrice))}</p>
                })}
            </div>
        </Show>
    }
}

/// Inline message for a rejected or failed booking attempt.
#[component]
pub fn NoticeBanner(
    #[prop(into)] notice: Signal<Option<Notice>>,
    on_dismiss: impl Fn() + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let i18n = use_i18n();

    view! {
        {move || notice.get().map(|notice| {
            let text = match notice {
                Notice::Invalid(err) => err.message(),
                Notice::BookingFailed => Text::BookingError,
            };
            view! {
                <div class="mt-4 p-3 rounded-md border border-red-400/60 bg-red-500/10 text-red-200 text-sm flex items-start justify-between gap-3" role="alert">
                    <span>{i18n.t(text)}</span>
                    <button
                        type="button"
                        class="text-red-200/70 hover:text-white"
                        title=move || i18n.t(Text::Close)
                        on:click=move |_| on_dismiss()
                    >"✕"</button>
                </div>
            }
        })}
    }
}
