use crate::domain::a003_produto::api::{get_product, list_products, ProductQuery};
use crate::shared::api_client::ApiClient;
use crate::shared::components::table::{format_brl, format_quantity};
use crate::shared::superseding::Superseding;
use contracts::domain::a003_produto::aggregate::Product;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Product chooser priced by `tabela`. The picked product is re-read by code
/// so its price tables and lots are complete.
#[component]
pub fn ProductPicker(
    #[prop(into)] tabela: Signal<String>,
    on_pick: Callback<Product>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let client = ApiClient::from_context();
    let requests = Superseding::new();
    let search = RwSignal::new(String::new());
    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    let fetch = {
        let client = client.clone();
        move |debounce: bool| {
            let client = client.clone();
            let token = requests.begin("busca");
            spawn_local(async move {
                if debounce {
                    TimeoutFuture::new(client.config().ui.search_debounce_ms).await;
                    if !requests.is_current("busca", token) {
                        return;
                    }
                }
                set_loading.set(true);
                let busca = search.get_untracked();
                let tabela = tabela.get_untracked();
                let query = ProductQuery {
                    busca: (!busca.trim().is_empty()).then(|| busca.trim().to_string()),
                    tabela: (!tabela.is_empty()).then_some(tabela),
                    limite: Some(client.config().ui.page_size),
                    ..Default::default()
                };
                let result = list_products(&client, &query).await;
                if !requests.is_current("busca", token) {
                    return;
                }
                match result {
                    Ok(list) => {
                        set_items.set(list.into_iter().filter(|p| p.ativo).collect());
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        }
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f(false));

    let pick = move |summary: Product| {
        let client = client.clone();
        let token = requests.begin("detalhe");
        spawn_local(async move {
            let full = match get_product(&client, &summary.codigo).await {
                Ok(p) if !p.codigo.is_empty() => p,
                Ok(_) => summary,
                Err(e) => {
                    log::warn!("product {} detail not loaded: {}", summary.codigo, e);
                    summary
                }
            };
            if requests.is_current("detalhe", token) {
                on_pick.run(full);
            }
        });
    };
    let pick = StoredValue::new(pick);

    view! {
        <div class="picker">
            <div class="picker__header">
                <h3>"Adicionar produto"</h3>
                <input
                    type="search"
                    class="form__input"
                    placeholder="Código, descrição ou EAN"
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
                {move || {
                    let tabela = tabela.get();
                    items.get().into_iter().map(|p| {
                        let price = format_brl(p.price_for_table(&tabela));
                        let stock = p.available_stock();
                        let detail = format!("{} · estoque {}", p.unidade, format_quantity(stock));
                        let label = p.label();
                        view! {
                            <li
                                class="picker__item"
                                class:picker__item--warning=stock <= 0.0
                                on:click=move |_| pick.with_value(|f| f(p.clone()))
                            >
                                <strong>{label}</strong>
                                <small>{detail}</small>
                                <span class="picker__price">{price}</span>
                            </li>
                        }
                    }).collect_view()
                }}
            </ul>
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Fechar"
                </Button>
            </div>
        </div>
    }
}
