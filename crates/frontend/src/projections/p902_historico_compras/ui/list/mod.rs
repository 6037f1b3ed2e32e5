//! What a client bought, newest first, with totals.

use crate::domain::a002_cliente::api::get_client;
use crate::projections::p902_historico_compras::api::list_purchases;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{format_brl, format_quantity, TableCellMoney};
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_REPORT;
use chrono::Months;
use contracts::projections::p902_historico_compras::dto::{PurchaseRecord, PurchaseSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Period filter options, in months; 0 means everything.
const PERIODS: [(u32, &str); 4] = [(3, "3 meses"), (6, "6 meses"), (12, "12 meses"), (0, "Tudo")];

#[component]
pub fn PurchaseHistoryList(cliente_id: i64) -> impl IntoView {
    let client = ApiClient::from_context();
    let (items, set_items) = signal::<Vec<PurchaseRecord>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (subtitle, set_subtitle) = signal(String::new());
    let months = RwSignal::new(6u32);

    {
        let client = client.clone();
        spawn_local(async move {
            if let Ok(c) = get_client(&client, cliente_id).await {
                set_subtitle.set(c.display_name().to_string());
            }
        });
    }

    let load = move || {
        let client = client.clone();
        let since = match months.get_untracked() {
            0 => None,
            m => today()
                .checked_sub_months(Months::new(m))
                .map(|d| d.format("%Y-%m-%d").to_string()),
        };
        set_loading.set(true);
        spawn_local(async move {
            match list_purchases(&client, cliente_id, since).await {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };
    let load = StoredValue::new(load);
    load.with_value(|f| f());

    let summary = Memo::new(move |_| PurchaseSummary::compute(&items.get()));

    view! {
        <PageFrame page_id="p902_historico_compras--report" category=PAGE_CAT_REPORT>
            <PageHeader title="Histórico de compras" subtitle=subtitle>
                <select
                    class="form__select"
                    on:change=move |ev| {
                        months.set(event_target_value(&ev).parse().unwrap_or(0));
                        load.with_value(|f| f());
                    }
                >
                    {PERIODS.iter().map(|(m, label)| view! {
                        <option value=m.to_string() selected=move || months.get() == *m>{*label}</option>
                    }).collect_view()}
                </select>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load.with_value(|f| f())>
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}

                <div class="summary-cards">
                    <div class="summary-card">
                        <span class="summary-card__label">"Total comprado"</span>
                        <strong>{move || format_brl(summary.get().valor_total)}</strong>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Pedidos"</span>
                        <strong>{move || summary.get().pedidos}</strong>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Produtos distintos"</span>
                        <strong>{move || summary.get().produtos}</strong>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Última compra"</span>
                        <strong>{move || summary.get().ultima_compra
                            .map(|d| d.format("%d/%m/%Y").to_string())
                            .unwrap_or_else(|| "—".to_string())}</strong>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small label="Carregando..." />
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=100.0>"Data"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Pedido"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Código"</TableHeaderCell>
                            <TableHeaderCell min_width=240.0>"Produto"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Qtd."</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Preço"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Total"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|p| view! {
                            <TableRow>
                                <TableCell>{format_date(&p.data)}</TableCell>
                                <TableCell>{p.pedido_id.clone()}</TableCell>
                                <TableCell>{p.produto_codigo.clone()}</TableCell>
                                <TableCell>{p.produto_descricao.clone()}</TableCell>
                                <TableCell class="text-right">{format_quantity(p.quantidade)}</TableCell>
                                <TableCellMoney value=Signal::stored(Some(p.preco)) />
                                <TableCellMoney value=Signal::stored(Some(p.total)) bold=true />
                            </TableRow>
                        }).collect_view()}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                    <p class="page__empty">"Nenhuma compra no período."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
