use leptos::prelude::*;

use crate::i18n::{use_i18n, Text};

#[component]
pub fn Footer() -> impl IntoView {
    let i18n = use_i18n();
    let year = chrono::Local::now().format("%Y").to_string();

    view! {
        <footer class="mt-12 border-t border-slate-800">
            <div class="max-w-6xl mx-auto px-4 py-6 flex flex-wrap justify-between gap-4 text-sm text-slate-400">
                <div>
                    <p class="font-semibold text-slate-200">"VR Arena"</p>
                    <p>{move || i18n.t(Text::LocationName)}</p>
                </div>
                <p>{move || i18n.t(Text::OpeningHours)}</p>
                <p>{format!("© {year} VR Arena. ")}{move || i18n.t(Text::FooterRights)}</p>
            </div>
        </footer>
    }
}
