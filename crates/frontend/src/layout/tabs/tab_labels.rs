//! Tab keys and titles.
//!
//! List tabs use the aggregate's `full_name()`; record tabs append the id
//! to a prefix. The key alone is enough to rebuild a tab from `?active=`.

use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a003_produto::aggregate::Product;
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::a008_itinerario::aggregate::Itinerary;
use contracts::domain::common::AggregateRoot;

pub const ORDERS: &str = "a004_pedidos";
pub const CLIENTS: &str = "a002_clientes";
pub const PRODUCTS: &str = "a003_produtos";
pub const REPRESENTATIVES: &str = "a005_representantes";
pub const ITINERARIES: &str = "a008_itinerarios";

const ORDER_NEW: &str = "a004_pedido_new_";
const ORDER_DETAIL: &str = "a004_pedido_detail_";
const ORDER_COPY: &str = "a004_pedido_copy_";
const RECEIVABLES: &str = "p901_contas_receber_";
const PURCHASES: &str = "p902_historico_compras_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRoute {
    Orders,
    /// Each new-order tab gets its own suffix so several drafts can be open.
    OrderNew(String),
    OrderDetail(i64),
    OrderCopy(i64),
    Clients,
    Products,
    Representatives,
    Itineraries,
    Receivables(i64),
    Purchases(i64),
}

impl TabRoute {
    pub fn parse(key: &str) -> Option<Self> {
        let route = match key {
            ORDERS => Self::Orders,
            CLIENTS => Self::Clients,
            PRODUCTS => Self::Products,
            REPRESENTATIVES => Self::Representatives,
            ITINERARIES => Self::Itineraries,
            k => {
                if let Some(suffix) = k.strip_prefix(ORDER_NEW) {
                    if suffix.is_empty() {
                        return None;
                    }
                    Self::OrderNew(suffix.to_string())
                } else if let Some(id) = id_after(k, ORDER_DETAIL) {
                    Self::OrderDetail(id)
                } else if let Some(id) = id_after(k, ORDER_COPY) {
                    Self::OrderCopy(id)
                } else if let Some(id) = id_after(k, RECEIVABLES) {
                    Self::Receivables(id)
                } else if let Some(id) = id_after(k, PURCHASES) {
                    Self::Purchases(id)
                } else {
                    return None;
                }
            }
        };
        Some(route)
    }

    pub fn key(&self) -> String {
        match self {
            Self::Orders => ORDERS.to_string(),
            Self::OrderNew(suffix) => format!("{ORDER_NEW}{suffix}"),
            Self::OrderDetail(id) => format!("{ORDER_DETAIL}{id}"),
            Self::OrderCopy(id) => format!("{ORDER_COPY}{id}"),
            Self::Clients => CLIENTS.to_string(),
            Self::Products => PRODUCTS.to_string(),
            Self::Representatives => REPRESENTATIVES.to_string(),
            Self::Itineraries => ITINERARIES.to_string(),
            Self::Receivables(id) => format!("{RECEIVABLES}{id}"),
            Self::Purchases(id) => format!("{PURCHASES}{id}"),
        }
    }

    /// Generic title; openers usually pass a more specific one.
    pub fn label(&self) -> String {
        match self {
            Self::Orders => Order::list_name().to_string(),
            Self::OrderNew(_) => "Novo pedido".to_string(),
            Self::OrderDetail(id) => detail_tab_label(Order::element_name(), &id.to_string()),
            Self::OrderCopy(id) => format!("Cópia do pedido {id}"),
            Self::Clients => Client::list_name().to_string(),
            Self::Products => Product::list_name().to_string(),
            Self::Representatives => Representative::list_name().to_string(),
            Self::Itineraries => Itinerary::list_name().to_string(),
            Self::Receivables(id) => format!("Contas a receber · {id}"),
            Self::Purchases(id) => format!("Histórico de compras · {id}"),
        }
    }
}

fn id_after(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix)?
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
}

/// A fresh draft key for the "Novo pedido" action.
pub fn new_order_route() -> TabRoute {
    TabRoute::OrderNew(uuid::Uuid::new_v4().simple().to_string())
}

/// Title for a key, falling back to the key itself.
pub fn tab_label_for_key(key: &str) -> String {
    TabRoute::parse(key)
        .map(|r| r.label())
        .unwrap_or_else(|| key.to_string())
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keys_follow_aggregate_names() {
        assert_eq!(ORDERS, Order::full_name());
        assert_eq!(CLIENTS, Client::full_name());
        assert_eq!(PRODUCTS, Product::full_name());
        assert_eq!(REPRESENTATIVES, Representative::full_name());
        assert_eq!(ITINERARIES, Itinerary::full_name());
    }

    #[test]
    fn test_keys_parse_back() {
        let routes = [
            TabRoute::Orders,
            TabRoute::OrderNew("abc".into()),
            TabRoute::OrderDetail(42),
            TabRoute::OrderCopy(42),
            TabRoute::Clients,
            TabRoute::Receivables(7),
            TabRoute::Purchases(7),
        ];
        for route in routes {
            assert_eq!(TabRoute::parse(&route.key()), Some(route));
        }
    }

    #[test]
    fn test_bad_keys() {
        assert_eq!(TabRoute::parse("a004_pedido_detail_x"), None);
        assert_eq!(TabRoute::parse("a004_pedido_detail_0"), None);
        assert_eq!(TabRoute::parse("a004_pedido_new_"), None);
        assert_eq!(TabRoute::parse("desconhecido"), None);
        assert_eq!(tab_label_for_key("desconhecido"), "desconhecido");
    }

    #[test]
    fn test_new_order_routes_are_distinct() {
        assert_ne!(new_order_route().key(), new_order_route().key());
        assert_eq!(detail_tab_label("Pedido", "123"), "Pedido · 123");
    }
}
