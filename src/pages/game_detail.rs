use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::spinner::Spinner;
use crate::data::games::Game;
use crate::i18n::{use_i18n, Text};
use crate::pages::games::use_games;

/// Resolves `/games/:id` against the catalog by position.
fn find_game(games: &[Game], id: &str) -> Option<Game> {
    id.parse::<usize>().ok().and_then(|index| games.get(index).cloned())
}

#[component]
pub fn GameDetailPage() -> impl IntoView {
    let i18n = use_i18n();
    let params = use_params_map();
    let games = use_games();

    let game = Memo::new(move |_| {
        let id = params.with(|p| p.get("id").unwrap_or_default());
        games.with(|games| games.as_ref().map(|list| find_game(list, &id)))
    });

    view! {
        <div class="py-8">
            <A href="/games" attr:class="text-sm text-slate-400 hover:text-amber-300">
                {move || format!("‹ {}", i18n.t(Text::Back))}
            </A>
            {move || match game.get() {
                None => view! {
                    <div class="flex justify-center py-20"><Spinner size=48/></div>
                }.into_any(),
                Some(None) => view! {
                    <p class="py-20 text-center text-slate-400">{move || i18n.t(Text::GameNotFound)}</p>
                }.into_any(),
                Some(Some(game)) => view! { <GameDetail game=game/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn GameDetail(game: Game) -> impl IntoView {
    let i18n = use_i18n();
    let localized = game.clone();
    let genres = game.clone();

    view! {
        <article class="mt-4">
            <img src=game.image.clone() alt=game.name.clone() class="w-full max-h-96 object-cover rounded-lg mb-6"/>
            <h1 class="text-3xl font-bold mb-2">{game.name.clone()}</h1>
            <div class="flex flex-wrap gap-2 mb-4">
                {move || genres.genres(i18n.language()).into_iter().map(|genre| view! {
                    <span class="px-2 py-0.5 rounded-full text-xs bg-slate-800 border border-slate-600">{genre}</span>
                }).collect::<Vec<_>>()}
            </div>
            <ul class="flex flex-wrap gap-4 text-sm text-slate-300 mb-6">
                {game.age.map(|age| view! { <li>{move || format!("{} {age}+", i18n.t(Text::Age))}</li> })}
                {game.max_players_count.map(|count| view! { <li>{move || format!("{}: {count}", i18n.t(Text::Players))}</li> })}
                <li>{move || if game.outside { i18n.t(Text::OutsideGame) } else { i18n.t(Text::InsideGame) }}</li>
            </ul>
            <p class="text-slate-200 mb-8 whitespace-pre-line">{move || localized.texts(i18n.language()).description}</p>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-8">
                {game.images.iter().map(|src| view! {
                    <img src=src.clone() alt="" class="w-full h-56 object-cover rounded-md"/>
                }).collect::<Vec<_>>()}
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {game.videos.iter().map(|src| view! {
                    <iframe src=src.clone() class="w-full aspect-video rounded-md" allowfullscreen=true></iframe>
                }).collect::<Vec<_>>()}
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::games::mock_games;

    #[test]
    fn games_resolve_by_index() {
        let games = mock_games();
        assert_eq!(find_game(&games, "0").map(|g| g.name), Some("VR Shooter".to_string()));
        assert!(find_game(&games, "1").is_none());
        assert!(find_game(&games, "shooter").is_none());
        assert!(find_game(&[], "0").is_none());
    }
}
