use super::tab::Tab as TabComponent;
use crate::layout::global_context::{use_app_context, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Tab bar plus the content of every opened tab. Inactive tabs stay mounted
/// (hidden) so their filters and unsaved forms survive switching.
#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = use_app_context();

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent tab=tab /> }
                />
            </div>
            <div class="tab-content">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </div>
            <Show when=move || tabs_store.opened.with(|t| t.is_empty())>
                <div class="tabs-empty">"Escolha uma opção no menu para começar."</div>
            </Show>
        </div>
    }
}
