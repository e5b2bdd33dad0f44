use leptos::prelude::*;
use leptos_router::components::A;

use crate::i18n::{use_i18n, Language, Text};

#[component]
pub fn Header() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <header class="border-b border-slate-800">
            <nav class="max-w-6xl mx-auto px-4 py-3 flex items-center gap-6">
                <A href="/" attr:class="text-xl font-bold text-amber-300">"VR Arena"</A>
                <div class="flex gap-4 text-sm">
                    <A href="/" attr:class="hover:text-amber-300">{move || i18n.t(Text::NavHome)}</A>
                    <A href="/games" attr:class="hover:text-amber-300">{move || i18n.t(Text::NavGames)}</A>
                    <A href="/booking" attr:class="hover:text-amber-300">{move || i18n.t(Text::NavBooking)}</A>
                </div>
                <LanguageSwitcher/>
            </nav>
        </header>
    }
}

#[component]
fn LanguageSwitcher() -> impl IntoView {
    let i18n = use_i18n();

    let on_change = move |ev| {
        if let Some(lang) = Language::from_tag(&event_target_value(&ev)) {
            i18n.set_language(lang);
        }
    };

    view! {
        <select
            class="ml-auto bg-slate-900 border border-slate-700 rounded-md px-2 py-1 text-sm"
            on:change=on_change
        >
            {Language::ALL.into_iter().map(|lang| {
                view! {
                    <option value=lang.tag() selected=move || i18n.language() == lang>
                        {lang.label()}
                    </option>
                }
            }).collect::<Vec<_>>()}
        </select>
    }
}
