#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use vr_arena_site::app::*;
    use vr_arena_site::logging;
    use vr_arena_site::settings::Settings;

    let settings = match Settings::from_yaml("settings.yaml") {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("WARN: Could not load settings.yaml ({}), using defaults", err);
            Settings::default()
        }
    };
    logging::init_server(&settings.log_level);
    let settings = Settings::install(settings);
    log::info!("Using venue API at {}", settings.api_base_url);

    let conf = get_configuration(None)?;
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    log::info!("Listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // client-side main function is `hydrate` in lib.rs
}
