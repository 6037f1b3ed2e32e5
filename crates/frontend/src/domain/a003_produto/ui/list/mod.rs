use crate::domain::a003_produto::api::{list_products, ProductQuery};
use crate::domain::a006_fornecedor::api::list_suppliers;
use crate::domain::a007_divisao::api::list_divisions;
use crate::domain::lookups::ui::LookupSelect;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{format_quantity, TableCellMoney};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::superseding::Superseding;
use contracts::domain::a003_produto::aggregate::Product;
use contracts::domain::a006_fornecedor::aggregate::Supplier;
use contracts::domain::a007_divisao::aggregate::Division;
use contracts::domain::lookups::LookupKind;
use contracts::shared::normalize::coerce_id;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const PAGE_LIMIT: usize = 200;

fn positive(id: i64) -> Option<i64> {
    (id > 0).then_some(id)
}

#[component]
pub fn ProductList() -> impl IntoView {
    let client = ApiClient::from_context();
    let requests = Superseding::new();

    let search = RwSignal::new(String::new());
    let supplier = RwSignal::new(String::new());
    let division = RwSignal::new(String::new());
    let table = RwSignal::new(String::new());

    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (suppliers, set_suppliers) = signal::<Vec<Supplier>>(Vec::new());
    let (divisions, set_divisions) = signal::<Vec<Division>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    {
        let client = client.clone();
        spawn_local(async move {
            match list_suppliers(&client).await {
                Ok(list) => set_suppliers.set(list),
                Err(e) => log::warn!("suppliers not loaded: {}", e),
            }
        });
    }

    // Divisions follow the chosen supplier; a stale answer must not replace
    // the list of the supplier chosen after it.
    let load_divisions = {
        let client = client.clone();
        move || {
            let client = client.clone();
            let token = requests.begin("divisoes");
            let fornecedor_id = positive(coerce_id(&supplier.get_untracked()));
            spawn_local(async move {
                let result = list_divisions(&client, fornecedor_id).await;
                if !requests.is_current("divisoes", token) {
                    return;
                }
                match result {
                    Ok(list) => set_divisions.set(list),
                    Err(e) => log::warn!("divisions not loaded: {}", e),
                }
            });
        }
    };
    let load_divisions = StoredValue::new(load_divisions);
    load_divisions.with_value(|f| f());

    let fetch = move |debounce: bool| {
        let client = client.clone();
        let token = requests.begin("produtos");
        spawn_local(async move {
            if debounce {
                TimeoutFuture::new(client.config().ui.search_debounce_ms).await;
                if !requests.is_current("produtos", token) {
                    return;
                }
            }
            set_loading.set(true);
            let busca = search.get_untracked();
            let tabela = table.get_untracked();
            let query = ProductQuery {
                busca: (!busca.trim().is_empty()).then(|| busca.trim().to_string()),
                fornecedor_id: positive(coerce_id(&supplier.get_untracked())),
                divisao_id: positive(coerce_id(&division.get_untracked())),
                tabela: (!tabela.is_empty()).then_some(tabela),
                limite: Some(PAGE_LIMIT),
            };
            let result = list_products(&client, &query).await;
            if !requests.is_current("produtos", token) {
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
        <PageFrame page_id="a003_produto--list" category=PAGE_CAT_LIST>
            <PageHeader title="Produtos">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.with_value(|f| f(false))>
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <input
                    type="search"
                    class="form__input page__search"
                    placeholder="Código, descrição ou EAN"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        fetch.with_value(|f| f(true));
                    }
                />
                <select
                    class="form__select"
                    prop:value=move || supplier.get()
                    on:change=move |ev| {
                        supplier.set(event_target_value(&ev));
                        division.set(String::new());
                        load_divisions.with_value(|f| f());
                        fetch.with_value(|f| f(false));
                    }
                >
                    <option value="">"Todos os fornecedores"</option>
                    {move || suppliers.get().into_iter().map(|s| view! {
                        <option value=s.id.to_string()>{s.nome}</option>
                    }).collect_view()}
                </select>
                <select
                    class="form__select"
                    prop:value=move || division.get()
                    on:change=move |ev| {
                        division.set(event_target_value(&ev));
                        fetch.with_value(|f| f(false));
                    }
                >
                    <option value="">"Todas as divisões"</option>
                    {move || divisions.get().into_iter().map(|d| view! {
                        <option value=d.id.to_string()>{d.descricao}</option>
                    }).collect_view()}
                </select>
                <LookupSelect
                    kind=LookupKind::TabelaPreco
                    value=table
                    on_change=Callback::new(move |v| {
                        table.set(v);
                        fetch.with_value(|f| f(false));
                    })
                    placeholder="Preço base"
                />
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small label="Carregando..." />
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=90.0>"Código"</TableHeaderCell>
                            <TableHeaderCell min_width=280.0>"Descrição"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>"Un."</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Marca"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"EAN"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Estoque"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Preço"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let tabela = table.get();
                            items.get().into_iter().map(|p| {
                                let price = p.price_for_table(&tabela);
                                let stock = p.available_stock();
                                view! {
                                    <TableRow class={if stock > 0.0 { "" } else { "table__row--muted" }}>
                                        <TableCell>{p.codigo.clone()}</TableCell>
                                        <TableCell>{p.descricao.clone()}</TableCell>
                                        <TableCell>{p.unidade.clone()}</TableCell>
                                        <TableCell>{p.marca.clone()}</TableCell>
                                        <TableCell>{p.ean.clone()}</TableCell>
                                        <TableCell class="text-right">{format_quantity(stock)}</TableCell>
                                        <TableCellMoney value=Signal::stored(Some(price)) />
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                    <p class="page__empty">"Nenhum produto encontrado."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
