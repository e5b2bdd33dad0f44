use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::outbound_booking::OutboundBooking;
use crate::data::shared_booking::DayAvailability;
use crate::i18n::{use_i18n, Text};
use crate::settings::Settings;

#[component]
pub fn HomePage() -> impl IntoView {
    let i18n = use_i18n();
    let (today_day, set_today_day) = signal::<Option<DayAvailability>>(None);

    // Fetch today once in the browser; the outbound modal reuses it.
    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            use crate::data::api::VenueApi;
            use crate::data::availability::AvailabilityLoader;
            use crate::utils::date::today;

            let day = AvailabilityLoader::http(VenueApi::current()).load(today()).await;
            set_today_day.set(Some(day));
        });
    });
    #[cfg(feature = "ssr")]
    let _ = set_today_day;

    let free_hours = Memo::new(move |_| today_day.with(|day| day.as_ref().map(DayAvailability::free_hours)));

    view! {
        <section class="py-16 md:py-24 text-center">
            <h1 class="text-4xl md:text-6xl font-bold mb-4">{move || i18n.t(Text::HeroTitle)}</h1>
            <p class="text-lg text-slate-300 max-w-2xl mx-auto mb-8">{move || i18n.t(Text::HeroSubtitle)}</p>
            <div class="flex flex-col md:flex-row items-center justify-center gap-4">
                <A href="/booking" attr:class="px-6 py-3 rounded-md font-semibold bg-amber-300 hover:bg-amber-400 text-slate-900">
                    {move || i18n.t(Text::BookNow)}
                </A>
                <A href="/games" attr:class="px-6 py-3 rounded-md font-semibold border border-slate-500 hover:bg-white/10">
                    {move || i18n.t(Text::Games)}
                </A>
            </div>
            <p class="mt-6 text-sm text-slate-400">
                {move || match free_hours.get() {
                    Some(count) => format!("{}: {count}", i18n.t(Text::FreeHoursToday)),
                    None => i18n.t(Text::Loading).to_string(),
                }}
            </p>
        </section>

        <section class="mb-16 p-6 md:p-10 rounded-lg bg-slate-900 border border-slate-700 flex flex-col md:flex-row items-center justify-between gap-6">
            <div>
                <h2 class="text-2xl font-bold mb-2">{move || i18n.t(Text::OutboundTitle)}</h2>
                <p class="text-amber-300 font-semibold">
                    {move || format!("{} EUR / {}", Settings::current().outbound_price, i18n.t(Text::Hour))}
                </p>
            </div>
            <OutboundBooking initial=today_day/>
        </section>
    }
}
