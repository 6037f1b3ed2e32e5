use crate::domain::a002_cliente::ui::picker::ClientPicker;
use crate::domain::a004_pedido::api::{delete_order, get_order, list_orders, OrderQuery};
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::{new_order_route, TabRoute};
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{format_brl, TableCellMoney, TableHeaderCheckbox};
use crate::shared::date_utils::{format_date, to_input_date, today};
use crate::shared::export::{download_json, export_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::state::order_store::use_order_store;
use crate::shared::superseding::Superseding;
use chrono::{Datelike, Utc};
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::export::InvoicingExport;
use contracts::shared::api_error::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

struct OrderRow<'a>(&'a Order);

impl CsvExportable for OrderRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["Número", "Data", "Cliente", "Operação", "Tabela", "Origem", "Situação", "Total"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let o = self.0;
        vec![
            o.numero.clone(),
            format_date(&o.data),
            o.cliente_nome.clone(),
            o.operacao.clone(),
            o.tabela.clone(),
            o.pedido_origem.clone(),
            o.status_label().to_string(),
            format!("{:.2}", o.display_total()),
        ]
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn order_title(order: &Order) -> String {
    if order.numero.is_empty() {
        order.id.to_string()
    } else {
        order.numero.clone()
    }
}

#[component]
pub fn OrderList() -> impl IntoView {
    let client = ApiClient::from_context();
    let tabs = use_app_context();
    let store = use_order_store();
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let requests = Superseding::new();

    let first_of_month = today().with_day(1).unwrap_or_else(today);
    let date_from = RwSignal::new(first_of_month.format("%Y-%m-%d").to_string());
    let date_to = RwSignal::new(today().format("%Y-%m-%d").to_string());
    let search = RwSignal::new(String::new());
    let client_filter = RwSignal::new(None::<(i64, String)>);

    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal(false);

    let fetch = {
        let client = client.clone();
        move |debounce: bool| {
            let client = client.clone();
            let token = requests.begin("pedidos");
            spawn_local(async move {
                if debounce {
                    TimeoutFuture::new(client.config().ui.search_debounce_ms).await;
                    if !requests.is_current("pedidos", token) {
                        return;
                    }
                }
                set_loading.set(true);
                let busca = search.get_untracked();
                let query = OrderQuery {
                    data_inicio: Some(date_from.get_untracked()).filter(|d| !d.is_empty()),
                    data_fim: Some(date_to.get_untracked()).filter(|d| !d.is_empty()),
                    cliente_id: client_filter.get_untracked().map(|(id, _)| id),
                    busca: (!busca.trim().is_empty()).then(|| busca.trim().to_string()),
                };
                let result = list_orders(&client, &query).await;
                if !requests.is_current("pedidos", token) {
                    return;
                }
                match result {
                    Ok(list) => {
                        store.set_items(list);
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

    let open_order = move |order: &Order| {
        store.set_active(Some(order.id));
        let route = TabRoute::OrderDetail(order.id);
        tabs.open_tab(&route.key(), &route.label());
    };

    let new_order = move |_| {
        let route = new_order_route();
        tabs.open_tab(&route.key(), &route.label());
    };

    let duplicate = move |id: i64| {
        let route = TabRoute::OrderCopy(id);
        tabs.open_tab(&route.key(), &route.label());
    };

    let pick_client = move |_| {
        modal_stack.push_with_frame(
            Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
            None,
            move |handle| {
                let on_pick = Callback::new({
                    let handle = handle.clone();
                    move |c: Client| {
                        handle.close();
                        client_filter.set(Some((c.id, c.display_name().to_string())));
                        fetch.with_value(|f| f(false));
                    }
                });
                let on_cancel = Callback::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! { <ClientPicker on_pick=on_pick on_cancel=on_cancel /> }.into_any()
            },
        );
    };

    let delete_selected = {
        let client = client.clone();
        move |_| {
            let selected = store.selected_untracked();
            let (locked, deletable): (Vec<Order>, Vec<Order>) =
                selected.into_iter().partition(|o| o.is_locked());
            if deletable.is_empty() {
                notifier.error("Pedidos transmitidos ou faturados não podem ser excluídos");
                return;
            }
            if !confirm(&format!("Excluir {} pedido(s)?", deletable.len())) {
                return;
            }
            let client = client.clone();
            set_busy.set(true);
            spawn_local(async move {
                let mut deleted = 0;
                for order in deletable {
                    match delete_order(&client, order.id).await {
                        Ok(()) => {
                            store.remove(order.id);
                            tabs.close_tab(&TabRoute::OrderDetail(order.id).key());
                            deleted += 1;
                        }
                        Err(e) => {
                            log::warn!("order {} not deleted: {}", order.id, e);
                            notifier.error(format!("Pedido {}: {}", order_title(&order), e));
                        }
                    }
                }
                if deleted > 0 {
                    notifier.success(format!("{} pedido(s) excluído(s)", deleted));
                }
                if !locked.is_empty() {
                    notifier.error(format!(
                        "{} pedido(s) transmitido(s) ou faturado(s) mantido(s)",
                        locked.len()
                    ));
                }
                set_busy.set(false);
            });
        }
    };

    // The list rows may come without lines; each export re-reads its order.
    let export_selected = move |_| {
        let selected = store.selected_untracked();
        if selected.is_empty() {
            notifier.error("Selecione ao menos um pedido");
            return;
        }
        let client = client.clone();
        set_busy.set(true);
        spawn_local(async move {
            for summary in selected {
                let result = get_order(&client, summary.id).await.and_then(|order| {
                    let doc = InvoicingExport::from_order(&order, Utc::now());
                    doc.to_pretty_json()
                        .map(|json| (doc.file_name(), json))
                        .map_err(|e| ApiError::Decode(e.to_string()))
                });
                match result.map_err(|e| e.to_string()).and_then(|(name, json)| {
                    download_json(&json, &name).map(|_| name)
                }) {
                    Ok(name) => log::info!("exported {}", name),
                    Err(e) => notifier.error(format!("Pedido {}: {}", order_title(&summary), e)),
                }
            }
            set_busy.set(false);
        });
    };

    let export_csv_all = move |_| {
        let items = store.items();
        let rows: Vec<OrderRow> = items.iter().map(OrderRow).collect();
        if let Err(e) = export_csv(&rows, "pedidos.csv") {
            notifier.error(e);
        }
    };

    let total_count = Signal::derive(move || store.state.with(|s| s.items.len()));
    let selected_count = Signal::derive(move || store.selected_count());
    let listed_total = Memo::new(move |_| {
        store.state.with(|s| s.items.iter().map(|o| o.display_total()).sum::<f64>())
    });

    view! {
        <PageFrame page_id="a004_pedido--list" category=PAGE_CAT_LIST>
            <PageHeader title="Pedidos">
                <Button appearance=ButtonAppearance::Primary on_click=new_order>
                    {icon("plus")}
                    " Novo pedido"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.with_value(|f| f(false))>
                    {icon("refresh")}
                    " Atualizar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || busy.get() || selected_count.get() == 0)
                    on_click=export_selected
                >
                    {icon("download")}
                    " Exportar"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=export_csv_all>
                    {icon("download")}
                    " CSV"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || busy.get() || selected_count.get() == 0)
                    on_click=delete_selected
                >
                    {icon("delete")}
                    {move || format!(" Excluir ({})", selected_count.get())}
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <label class="form__label">"De"</label>
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || date_from.get()
                    on:change=move |ev| {
                        date_from.set(to_input_date(&event_target_value(&ev)));
                        fetch.with_value(|f| f(false));
                    }
                />
                <label class="form__label">"Até"</label>
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || date_to.get()
                    on:change=move |ev| {
                        date_to.set(to_input_date(&event_target_value(&ev)));
                        fetch.with_value(|f| f(false));
                    }
                />
                <input
                    type="search"
                    class="form__input page__search"
                    placeholder="Número, cliente ou origem"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        fetch.with_value(|f| f(true));
                    }
                />
                {move || match client_filter.get() {
                    Some((_, name)) => view! {
                        <span class="filter-chip">
                            {name}
                            <button class="filter-chip__remove" on:click=move |_| {
                                client_filter.set(None);
                                fetch.with_value(|f| f(false));
                            }>"×"</button>
                        </span>
                    }
                    .into_any(),
                    None => view! {
                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=pick_client>
                            {icon("users")}
                            " Cliente"
                        </Button>
                    }
                    .into_any(),
                }}
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
                            <TableHeaderCheckbox
                                total=total_count
                                selected=selected_count
                                on_toggle=Callback::new(move |_| store.toggle_all())
                            />
                            <TableHeaderCell min_width=90.0>"Número"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Data"</TableHeaderCell>
                            <TableHeaderCell min_width=240.0>"Cliente"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Operação"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Situação"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Total"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || store.items().into_iter().map(|order| {
                            let id = order.id;
                            let active = store.active_id() == Some(id);
                            let row_class = match (active, order.is_locked()) {
                                (true, _) => "table__row--active",
                                (false, true) => "table__row--muted",
                                (false, false) => "",
                            };
                            let for_open = order.clone();
                            let title = order_title(&order);
                            let data = format_date(&order.data);
                            let cliente_nome = order.cliente_nome.clone();
                            let operacao = order.operacao.clone();
                            let status = order.status_label();
                            let total = order.display_total();
                            view! {
                                <TableRow class=row_class>
                                    <TableCell class="fixed-checkbox-column">
                                        <input
                                            type="checkbox"
                                            class="table__checkbox"
                                            prop:checked=move || store.is_selected(id)
                                            on:click=|ev| ev.stop_propagation()
                                            on:change=move |_| store.toggle(id)
                                        />
                                    </TableCell>
                                    <TableCell>
                                        <a href="#" class="table__link" on:click=move |ev| {
                                            ev.prevent_default();
                                            open_order(&for_open);
                                        }>{title}</a>
                                    </TableCell>
                                    <TableCell>{data}</TableCell>
                                    <TableCell>{cliente_nome}</TableCell>
                                    <TableCell>{operacao}</TableCell>
                                    <TableCell>{status}</TableCell>
                                    <TableCellMoney value=Signal::stored(Some(total)) bold=true />
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| duplicate(id)
                                        >
                                            {icon("copy")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>

                <div class="table__totals">
                    <span>{move || format!("{} pedido(s)", total_count.get())}</span>
                    <strong>{move || format_brl(listed_total.get())}</strong>
                </div>

                <Show when=move || !loading.get() && total_count.get() == 0>
                    <p class="page__empty">"Nenhum pedido no período."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
