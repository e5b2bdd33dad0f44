use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{FlatRoutes, Route, Router},
    ParamSegment, StaticSegment,
};

use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::spinner::Spinner;
use crate::i18n::{provide_i18n, Language};
use crate::pages::booking::BookingPage;
use crate::pages::game_detail::GameDetailPage;
use crate::pages::games::GamesPage;
use crate::pages::home::HomePage;
use crate::settings::{PublicSettings, Settings};

/// Settings the browser half needs, as loaded by the server.
#[server(GetPublicSettings)]
pub async fn get_public_settings() -> Result<PublicSettings, ServerFnError> {
    Ok(PublicSettings::from(Settings::current()))
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="de">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Stylesheet id="leptos" href="/pkg/vr-arena-site.css"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico"/>
                <Link rel="preconnect" href="https://fonts.googleapis.com"/>
                <Link rel="preconnect" href="https://fonts.gstatic.com" crossorigin="anonymous"/>
                <Link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet"/>
                <MetaTags/>
            </head>
            <body class="bg-slate-950 text-slate-100">
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Resolved during SSR and serialized into the page, so the hydrated
    // bundle installs the same settings before anything renders.
    let public_settings = Resource::new(|| (), |_| get_public_settings());

    view! {
        <Title text="VR Arena"/>
        <Router>
            <Suspense fallback=|| view! {
                <div class="flex justify-center items-center min-h-screen"><Spinner size=48/></div>
            }>
                {move || Suspend::new(async move {
                    let settings = match public_settings.await {
                        Ok(public) => Settings::install(public.into_settings()),
                        Err(err) => {
                            log::warn!("Could not load site settings, using defaults: {}", err);
                            Settings::current()
                        }
                    };
                    view! { <Site language=settings.language()/> }.into_any()
                })}
            </Suspense>
        </Router>
    }
}

#[component]
fn Site(language: Language) -> impl IntoView {
    provide_i18n(language);

    view! {
        <Header/>
        <main class="max-w-6xl mx-auto px-4">
            <FlatRoutes fallback=|| "Page not found.">
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("booking") view=BookingPage/>
                <Route path=StaticSegment("games") view=GamesPage/>
                <Route path=(StaticSegment("games"), ParamSegment("id")) view=GameDetailPage/>
            </FlatRoutes>
        </main>
        <Footer/>
    }
}
