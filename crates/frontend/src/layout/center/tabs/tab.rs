use crate::layout::global_context::{use_app_context, Tab as TabData};
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store = use_app_context();

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| {
        let key = key.get_value();
        tabs_store.active.get().as_deref() == Some(key.as_str())
    });
    // Titles change after a first save; read the live one.
    let title = move || {
        let key = key.get_value();
        tabs_store.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key)
                .map(|t| t.title.clone())
                .unwrap_or_default()
        })
    };

    let on_click = move |_| tabs_store.activate_tab(&key.get_value());
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{title}</span>
            <button class="tab-close" title="Fechar" on:click=on_close>"×"</button>
        </div>
    }
}
