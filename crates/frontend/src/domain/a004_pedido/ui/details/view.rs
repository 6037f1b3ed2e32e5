use super::lines::OrderLines;
use super::view_model::OrderDetailsViewModel;
use crate::domain::a002_cliente::ui::picker::ClientPicker;
use crate::domain::a003_produto::ui::picker::ProductPicker;
use crate::domain::a004_pedido::api::get_order;
use crate::domain::a005_representante::api::list_representatives;
use crate::domain::lookups::ui::LookupSelect;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::{detail_tab_label, TabRoute};
use crate::shared::api_client::ApiClient;
use crate::shared::components::table::{format_brl, format_money};
use crate::shared::export::download_json;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::state::order_store::use_order_store;
use chrono::Utc;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a003_produto::aggregate::Product;
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::export::InvoicingExport;
use contracts::domain::a004_pedido::payload::OrderForm;
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::lookups::LookupKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn header_select(
    vm: &OrderDetailsViewModel,
    label: &'static str,
    kind: LookupKind,
    get: fn(&OrderForm) -> String,
    set: fn(&mut OrderForm, String),
) -> impl IntoView {
    let form = vm.form;
    let locked = vm.locked;
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <LookupSelect
                kind=kind
                value=Signal::derive(move || form.with(get))
                on_change=Callback::new(move |v| form.update(|f| set(f, v)))
                disabled=Signal::derive(move || locked.get())
            />
        </div>
    }
}

#[component]
pub fn OrderDetails(
    #[prop(optional)] id: Option<i64>,
    #[prop(optional)] copy_from: Option<i64>,
    tab_key: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let client = ApiClient::from_context();
    let tabs = use_app_context();
    let store = use_order_store();
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();

    let vm = OrderDetailsViewModel::new(client.clone());
    match (id, copy_from) {
        (Some(id), _) => {
            store.set_active(Some(id));
            vm.load(id);
        }
        (None, Some(source)) => vm.load_copy(source),
        (None, None) => {}
    }

    let form = vm.form;
    let locked = vm.locked;
    let saving = vm.saving;
    let status = vm.status;
    let loading = vm.loading;
    let error = vm.error;

    let (representatives, set_representatives) = signal::<Vec<Representative>>(Vec::new());
    {
        let client = client.clone();
        spawn_local(async move {
            match list_representatives(&client).await {
                Ok(list) => set_representatives.set(list),
                Err(e) => log::warn!("representatives not loaded: {}", e),
            }
        });
    }

    let pick_client = {
        let vm = vm.clone();
        move |_| {
            let vm = vm.clone();
            modal_stack.push_with_frame(
                Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
                None,
                move |handle| {
                    let vm = vm.clone();
                    let on_pick = Callback::new({
                        let handle = handle.clone();
                        move |c: Client| {
                            vm.set_client(&c);
                            handle.close();
                        }
                    });
                    let on_cancel = Callback::new({
                        let handle = handle.clone();
                        move |_| handle.close()
                    });
                    view! { <ClientPicker on_pick=on_pick on_cancel=on_cancel /> }.into_any()
                },
            );
        }
    };

    // The picker stays open so several products can be added in a row.
    let pick_product = {
        let vm = vm.clone();
        move |_| {
            let vm = vm.clone();
            modal_stack.push_with_frame(
                Some("max-width: min(820px, 95vw); width: min(820px, 95vw);".to_string()),
                None,
                move |handle| {
                    let vm = vm.clone();
                    let tabela = Signal::derive(move || form.with(|f| f.tabela.clone()));
                    let on_pick = Callback::new(move |p: Product| {
                        if vm.add_product(&p, 1.0, 0.0) {
                            notifier.success(format!("{} adicionado", p.label()));
                        } else if let Some(reason) = vm.error.get_untracked() {
                            notifier.error(reason);
                        }
                    });
                    let on_cancel = Callback::new({
                        let handle = handle.clone();
                        move |_| handle.close()
                    });
                    view! { <ProductPicker tabela=tabela on_pick=on_pick on_cancel=on_cancel /> }
                        .into_any()
                },
            );
        }
    };

    let on_saved = Callback::new({
        let tab_key = tab_key.clone();
        move |order: Order| {
            let route = TabRoute::OrderDetail(order.id);
            let identifier = if order.numero.is_empty() {
                order.id.to_string()
            } else {
                order.numero.clone()
            };
            let title = detail_tab_label("Pedido", &identifier);
            if tab_key == route.key() {
                tabs.update_tab_title(&tab_key, &title);
            } else {
                tabs.rekey_tab(&tab_key, &route.key(), &title);
            }
            store.upsert(order.clone());
            store.set_active(Some(order.id));
            notifier.success(format!("Pedido {} salvo", identifier));
        }
    });

    let save = {
        let vm = vm.clone();
        move |_| vm.save_command(on_saved)
    };

    let export = {
        let vm = vm.clone();
        let client = client.clone();
        move |_| {
            let Some(id) = vm.order_id.get_untracked() else {
                notifier.error("Salve o pedido antes de exportar");
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                let result = match get_order(&client, id).await {
                    Ok(order) => {
                        let doc = InvoicingExport::from_order(&order, Utc::now());
                        doc.to_pretty_json()
                            .map_err(|e| e.to_string())
                            .and_then(|json| download_json(&json, &doc.file_name()))
                    }
                    Err(e) => Err(e.to_string()),
                };
                if let Err(e) = result {
                    notifier.error(e);
                }
            });
        }
    };

    let duplicate = {
        let vm = vm.clone();
        move |_| {
            if let Some(id) = vm.order_id.get_untracked() {
                let route = TabRoute::OrderCopy(id);
                tabs.open_tab(&route.key(), &route.label());
            }
        }
    };

    let heading = {
        let vm = vm.clone();
        move || match (vm.order_id.get(), vm.numero.get()) {
            (Some(id), numero) if numero.is_empty() => format!("Pedido {}", id),
            (Some(_), numero) => format!("Pedido {}", numero),
            (None, _) if copy_from.is_some() => "Cópia de pedido".to_string(),
            (None, _) => "Novo pedido".to_string(),
        }
    };
    let has_id = {
        let order_id = vm.order_id;
        Signal::derive(move || order_id.get().is_some())
    };
    let totals = {
        let vm = vm.clone();
        Memo::new(move |_| vm.totals())
    };

    view! {
        <PageFrame page_id="a004_pedido--detail" category=PAGE_CAT_DETAIL>
            <div class="details-header">
                <h2>{heading}</h2>
                <span class="badge">{move || status.get()}</span>
                {move || form.with(|f| f.pedido_origem.clone()).map(|o| view! {
                    <small class="details-header__origin">{o}</small>
                })}
                <div class="details-header__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || locked.get() || saving.get())
                        on_click=save
                    >
                        {icon("save")}
                        " Salvar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary disabled=Signal::derive(move || !has_id.get()) on_click=export>
                        {icon("download")}
                        " Exportar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary disabled=Signal::derive(move || !has_id.get()) on_click=duplicate>
                        {icon("copy")}
                        " Duplicar"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Fechar"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}
            <Show when=move || locked.get()>
                <MessageBar intent=MessageBarIntent::Warning>
                    "Pedido transmitido ou faturado: somente leitura."
                </MessageBar>
            </Show>
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small label="Carregando..." />
            </Show>

            <div class="details-form details-form--grid">
                <div class="form__group form__group--wide">
                    <label class="form__label">"Cliente"</label>
                    <div class="form__picker">
                        <span class="form__picker-value">
                            {move || {
                                let name = form.with(|f| f.cliente_nome.clone());
                                if name.is_empty() { "Nenhum cliente selecionado".to_string() } else { name }
                            }}
                        </span>
                        <Button
                            size=ButtonSize::Small
                            disabled=Signal::derive(move || locked.get())
                            on_click=pick_client
                        >
                            {icon("search")}
                            " Selecionar"
                        </Button>
                    </div>
                </div>
                <div class="form__group">
                    <label class="form__label">"Data"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || form.with(|f| f.data.clone())
                        prop:disabled=move || locked.get()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.data = value);
                        }
                    />
                </div>
                {header_select(&vm, "Operação", LookupKind::Operacao, |f| f.operacao.clone(), |f, v| f.operacao = v)}
                {header_select(&vm, "Tabela de preço", LookupKind::TabelaPreco, |f| f.tabela.clone(), |f, v| f.tabela = v)}
                {header_select(&vm, "Prazo", LookupKind::PrazoPagamento, |f| f.prazo_id.clone(), |f, v| f.prazo_id = v)}
                {header_select(&vm, "Forma de pagamento", LookupKind::FormaPagamento, |f| f.forma_pagamento_id.clone(), |f, v| f.forma_pagamento_id = v)}
                <div class="form__group">
                    <label class="form__label">"Representante"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.with(|f| f.representante_id.clone())
                        prop:disabled=move || locked.get()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.representante_id = value);
                        }
                    >
                        <option value="">"Selecione"</option>
                        {move || {
                            let current = form.with(|f| f.representante_id.clone());
                            representatives.get().into_iter().map(|r| {
                                let value = r.id.to_string();
                                let selected = value == current;
                                view! { <option value=value selected=selected>{r.label()}</option> }
                            }).collect_view()
                        }}
                    </select>
                </div>
                <div class="form__group form__group--wide">
                    <label class="form__label">"Observação"</label>
                    <textarea
                        class="form__textarea"
                        rows="2"
                        prop:value=move || form.with(|f| f.observacao.clone())
                        prop:disabled=move || locked.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.observacao = value);
                        }
                    />
                </div>
            </div>

            <div class="details-section">
                <div class="details-section__header">
                    <h3>"Itens"</h3>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || locked.get())
                        on_click=pick_product
                    >
                        {icon("plus")}
                        " Adicionar produto"
                    </Button>
                </div>
                <OrderLines vm=vm.clone() />
            </div>

            <div class="order-totals">
                <div>
                    <span>"Bruto"</span>
                    <strong>{move || format_brl(totals.get().bruto)}</strong>
                </div>
                <div>
                    <span>"Descontos"</span>
                    <strong>{move || {
                        let t = totals.get();
                        format!("{} ({}%)", format_brl(t.descontos), format_money(t.descontos_perc))
                    }}</strong>
                </div>
                <div class="order-totals__net">
                    <span>"Líquido"</span>
                    <strong>{move || format_brl(totals.get().liquido)}</strong>
                </div>
            </div>
        </PageFrame>
    }
}
