//! Contas a receber of one client, with the overdue summary on top.

use crate::domain::a002_cliente::api::get_client;
use crate::projections::p901_contas_receber::api::list_receivables;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{format_brl, TableCellMoney};
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_REPORT;
use contracts::domain::a002_cliente::document::format_document;
use contracts::projections::p901_contas_receber::dto::{Receivable, ReceivableSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ReceivablesList(cliente_id: i64) -> impl IntoView {
    let client = ApiClient::from_context();
    let (items, set_items) = signal::<Vec<Receivable>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (subtitle, set_subtitle) = signal(String::new());
    let only_open = RwSignal::new(true);
    let reference_day = today();

    {
        let client = client.clone();
        spawn_local(async move {
            if let Ok(c) = get_client(&client, cliente_id).await {
                set_subtitle.set(format!("{} · {}", c.display_name(), format_document(&c.documento)));
            }
        });
    }

    let load = move || {
        let client = client.clone();
        set_loading.set(true);
        spawn_local(async move {
            match list_receivables(&client, cliente_id, only_open.get_untracked()).await {
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

    let summary = Memo::new(move |_| ReceivableSummary::compute(&items.get(), reference_day));

    view! {
        <PageFrame page_id="p901_contas_receber--report" category=PAGE_CAT_REPORT>
            <PageHeader title="Contas a receber" subtitle=subtitle>
                <label class="form__inline-check">
                    <input
                        type="checkbox"
                        prop:checked=move || only_open.get()
                        on:change=move |ev| {
                            only_open.set(event_target_checked(&ev));
                            load.with_value(|f| f());
                        }
                    />
                    " Somente em aberto"
                </label>
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
                        <span class="summary-card__label">"Em aberto"</span>
                        <strong>{move || format_brl(summary.get().em_aberto)}</strong>
                    </div>
                    <div class="summary-card summary-card--danger">
                        <span class="summary-card__label">"Vencido"</span>
                        <strong>{move || format_brl(summary.get().vencido)}</strong>
                        <span>{move || {
                            let s = summary.get();
                            match s.titulos_vencidos {
                                0 => "Nenhum título vencido".to_string(),
                                n => format!("{} título(s), maior atraso {} dia(s)", n, s.maior_atraso_dias),
                            }
                        }}</span>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Pago"</span>
                        <strong>{move || format_brl(summary.get().pago)}</strong>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small label="Carregando..." />
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=120.0>"Documento"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>"Parcela"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Emissão"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Vencimento"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Valor"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Saldo"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Forma"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Situação"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|r| {
                            let status = r.status_label(reference_day);
                            let atraso = r.days_overdue(reference_day);
                            let status_text = if atraso > 0 {
                                format!("{} ({}d)", status, atraso)
                            } else {
                                status.to_string()
                            };
                            view! {
                                <TableRow class={if atraso > 0 { "table__row--overdue" } else { "" }}>
                                    <TableCell>{r.documento.clone()}</TableCell>
                                    <TableCell>{r.parcela.clone()}</TableCell>
                                    <TableCell>{format_date(&r.emissao)}</TableCell>
                                    <TableCell>{format_date(&r.vencimento)}</TableCell>
                                    <TableCellMoney value=Signal::stored(Some(r.valor)) />
                                    <TableCellMoney value=Signal::stored(Some(r.saldo)) bold=true />
                                    <TableCell>{r.forma_pagamento.clone()}</TableCell>
                                    <TableCell>{status_text}</TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                    <p class="page__empty">"Nenhum título encontrado."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
