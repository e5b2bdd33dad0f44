use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(default = 48)] size: u32) -> impl IntoView {
    view! {
        <span
            class="inline-block animate-spin rounded-full border-4 border-amber-300 border-t-transparent"
            style=format!("width: {size}px; height: {size}px;")
        ></span>
    }
}
