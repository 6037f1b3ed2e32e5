use crate::domain::a002_cliente::api::{list_clients, ClientQuery};
use crate::shared::api_client::ApiClient;
use crate::shared::superseding::Superseding;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a002_cliente::document::format_document;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Search-as-you-type client chooser. Blocked and inactive clients are listed
/// but cannot be picked.
#[component]
pub fn ClientPicker(on_pick: Callback<Client>, on_cancel: Callback<()>) -> impl IntoView {
    let client = ApiClient::from_context();
    let requests = Superseding::new();
    let search = RwSignal::new(String::new());
    let (items, set_items) = signal::<Vec<Client>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    let fetch = move |debounce: bool| {
        let client = client.clone();
        let token = requests.begin("picker");
        spawn_local(async move {
            if debounce {
                TimeoutFuture::new(client.config().ui.search_debounce_ms).await;
                if !requests.is_current("picker", token) {
                    return;
                }
            }
            set_loading.set(true);
            let query = ClientQuery::search(&search.get_untracked(), client.config().ui.page_size);
            let result = list_clients(&client, &query).await;
            if !requests.is_current("picker", token) {
                return;
            }
            match result {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f(false));

    view! {
        <div class="picker">
            <div class="picker__header">
                <h3>"Selecionar cliente"</h3>
                <input
                    type="search"
                    class="form__input"
                    placeholder="Nome, código ou CNPJ"
                    autofocus=true
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        fetch.with_value(|f| f(true));
                    }
                />
            </div>
            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Tiny />
            </Show>
            <ul class="picker__list">
                {move || items.get().into_iter().map(|c| {
                    let enabled = c.can_order();
                    let title = c.display_name().to_string();
                    let detail = format!("{} · {} · {}", c.codigo, format_document(&c.documento), c.city_label());
                    let picked = c.clone();
                    view! {
                        <li
                            class="picker__item"
                            class:picker__item--disabled=!enabled
                            on:click=move |_| {
                                if enabled {
                                    on_pick.run(picked.clone());
                                }
                            }
                        >
                            <strong>{title}</strong>
                            <small>{detail}</small>
                            {(!enabled).then(|| view! { <span class="badge badge--danger">"Bloqueado"</span> })}
                        </li>
                    }
                }).collect_view()}
            </ul>
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </div>
        </div>
    }
}
