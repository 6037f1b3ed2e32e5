//! tab.key -> view. Every tab the console can open is listed here.

use super::tab_labels::TabRoute;
use crate::domain::a002_cliente::ui::list::ClientList;
use crate::domain::a003_produto::ui::list::ProductList;
use crate::domain::a004_pedido::ui::details::OrderDetails;
use crate::domain::a004_pedido::ui::list::OrderList;
use crate::domain::a005_representante::ui::list::RepresentativeList;
use crate::domain::a008_itinerario::ui::list::ItineraryList;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p901_contas_receber::ui::list::ReceivablesList;
use crate::projections::p902_historico_compras::ui::list::PurchaseHistoryList;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let Some(route) = TabRoute::parse(key) else {
        log::warn!("unknown tab key: {}", key);
        return view! { <div class="placeholder">"Página não encontrada"</div> }.into_any();
    };

    let tab_key = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&tab_key));

    match route {
        TabRoute::Orders => view! { <OrderList /> }.into_any(),
        TabRoute::OrderNew(_) => view! {
            <OrderDetails tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        TabRoute::OrderDetail(id) => view! {
            <OrderDetails id=id tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        TabRoute::OrderCopy(source) => view! {
            <OrderDetails copy_from=source tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        TabRoute::Clients => view! { <ClientList /> }.into_any(),
        TabRoute::Products => view! { <ProductList /> }.into_any(),
        TabRoute::Representatives => view! { <RepresentativeList /> }.into_any(),
        TabRoute::Itineraries => view! { <ItineraryList /> }.into_any(),
        TabRoute::Receivables(cliente_id) => {
            view! { <ReceivablesList cliente_id=cliente_id /> }.into_any()
        }
        TabRoute::Purchases(cliente_id) => {
            view! { <PurchaseHistoryList cliente_id=cliente_id /> }.into_any()
        }
    }
}
