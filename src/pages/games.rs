use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::spinner::Spinner;
use crate::data::api::VenueApi;
use crate::data::games::{load_games, Game};
use crate::i18n::{use_i18n, Text};

/// Fetches the catalog once the page is mounted in the browser.
pub(crate) fn use_games() -> ReadSignal<Option<Vec<Game>>> {
    let (games, set_games) = signal::<Option<Vec<Game>>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            set_games.set(Some(load_games(&VenueApi::current()).await));
        });
    });

    games
}

#[component]
pub fn GamesPage() -> impl IntoView {
    let i18n = use_i18n();
    let games = use_games();

    view! {
        <div class="py-8">
            <h1 class="text-3xl font-bold mb-6">{move || i18n.t(Text::Games)}</h1>
            {move || match games.get() {
                None => view! {
                    <div class="flex justify-center py-20"><Spinner size=48/></div>
                }.into_any(),
                Some(games) => view! {
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
                        {games.into_iter().enumerate().map(|(index, game)| view! {
                            <GameCard index=index game=game/>
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn GameCard(index: usize, game: Game) -> impl IntoView {
    let i18n = use_i18n();
    let preview = game.clone();

    view! {
        <A href=format!("/games/{index}") attr:class="block rounded-lg overflow-hidden bg-slate-900 border border-slate-700 hover:border-amber-300 transition-colors">
            <img src=game.image.clone() alt=game.name.clone() class="w-full h-48 object-cover"/>
            <div class="p-4">
                <h2 class="text-xl font-semibold mb-1">{game.name.clone()}</h2>
                <p class="text-sm text-slate-400 mb-2">{move || preview.texts(i18n.language()).preview}</p>
                <div class="flex gap-3 text-xs text-slate-400">
                    {game.age.map(|age| view! { <span>{move || format!("{} {age}+", i18n.t(Text::Age))}</span> })}
                    {game.max_players_count.map(|count| view! { <span>{move || format!("{}: {count}", i18n.t(Text::Players))}</span> })}
                </div>
            </div>
        </A>
    }
}
