use chrono::NaiveDate;
use contracts::domain::a003_produto::aggregate::{Product, ProductPrice};
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::composition::{add_line, compute_totals, remove_line, update_line};
use contracts::domain::a004_pedido::export::InvoicingExport;
use contracts::domain::a004_pedido::list_state::OrderListState;
use contracts::domain::a004_pedido::payload::{
    build_create_payload, build_update_payload, duplicate_order, validate_order, OrderForm,
};
use contracts::shared::normalize::{normalize_list, normalize_one, FromRaw};
use serde_json::json;

const TOLERANCE: f64 = 1e-6;

fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            codigo: "CAF500".to_string(),
            descricao: "Café 500g".to_string(),
            preco: 104.3164,
            ..Default::default()
        },
        Product {
            id: 2,
            codigo: "ACU1K".to_string(),
            descricao: "Açúcar 1kg".to_string(),
            preco: 5.0,
            precos: vec![ProductPrice {
                tabela: "ATAC".to_string(),
                descricao: "Atacado".to_string(),
                preco: 4.5,
            }],
            ..Default::default()
        },
    ]
}

#[test]
fn compose_edit_and_submit() {
    let products = catalog();
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let mut form = OrderForm::new_for(7, today);
    form.cliente_id = "15".to_string();
    form.operacao = "V".to_string();
    form.tabela = "ATAC".to_string();
    form.rota_id = "abc".to_string();

    let mut lines = Vec::new();
    lines.push(add_line(products.first(), &form.tabela, 2.0, 8.9309).unwrap());
    lines.push(add_line(products.get(1), &form.tabela, 10.0, 0.0).unwrap());
    assert!(add_line(None, &form.tabela, 1.0, 0.0).is_err());
    assert!(add_line(products.get(1), &form.tabela, 0.0, 0.0).is_err());

    assert!((lines[0].total - 190.0).abs() < 0.01);
    assert!((lines[1].preco - 4.5).abs() < TOLERANCE);

    lines = update_line(&lines, 1, 20.0, 10.0).unwrap();
    let totals = compute_totals(&lines);
    assert!((totals.liquido - (totals.bruto - totals.descontos)).abs() < TOLERANCE);

    assert!(validate_order(&form, &lines).is_ok());
    let payload = build_create_payload(&form, &lines);
    assert_eq!(payload.empresa_id, 7);
    assert_eq!(payload.cliente_id, 15);
    assert_eq!(payload.rota_id, 0);
    assert_eq!(payload.itens.len(), 2);
    assert!(payload.pedido_origem.starts_with("ADS-"));
    assert!((payload.valor_total - totals.liquido).abs() < TOLERANCE);

    let body = serde_json::to_value(build_update_payload(99, &form, &lines)).unwrap();
    assert_eq!(body["id"], 99);
    assert_eq!(body["empresaId"], 7);
    assert_eq!(body["itens"][1]["ordem"], 2);

    let remaining = remove_line(&lines, 0);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].produto_codigo, "ACU1K");
    assert!(validate_order(&form, &remove_line(&remaining, 0)).is_err());
}

#[test]
fn loaded_order_duplicates_and_exports() {
    let payload = json!({
        "data": {
            "pedidoId": 41,
            "numeroPedido": "000041",
            "dataPedido": "2026-02-10T13:00:00",
            "operacao": "V",
            "clienteId": 15,
            "clienteNome": "Mercado Boa Vista",
            "pedidoOrigem": "ADS-20260210130000-000123",
            "transmitido": "S",
            "itens": [
                { "produtoCodigo": "B", "qtd": "3", "precoUnitario": "2,50", "ordem": 2 },
                { "produtoCodigo": "A", "qtd": 1, "preco": 10, "descontoPercentual": 10, "ordem": 1 }
            ]
        }
    });
    let order: Order = normalize_one(&payload);
    assert!(order.is_locked());
    assert!((order.display_total() - 16.5).abs() < TOLERANCE);

    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let (form, lines) = duplicate_order(&order, 7, today);
    assert_eq!(form.data, "2026-03-02");
    assert_eq!(form.pedido_origem, None);
    assert_eq!(lines[0].produto_codigo, "A");

    let export = InvoicingExport::from_order(&order, chrono::Utc::now());
    assert_eq!(export.file_name(), "pedido-000041.json");
    let text = export.to_pretty_json().unwrap();
    assert!(text.contains("\n"));
    assert!(text.contains("Mercado Boa Vista"));
}

#[test]
fn edited_order_keeps_line_order_after_save_and_reload() {
    let stored: Order = normalize_one(&json!({
        "data": {
            "pedidoId": 52,
            "clienteId": 15,
            "itens": [
                { "produtoCodigo": "B", "qtd": 1, "preco": 3, "ordem": 6 },
                { "produtoCodigo": "A", "qtd": 2, "preco": 5, "ordem": 5 }
            ]
        }
    }));
    let form = OrderForm::from_order(&stored, 7);
    let mut lines = stored.itens.clone();
    lines.push(add_line(catalog().first(), &form.tabela, 1.0, 0.0).unwrap());

    let sent = build_update_payload(stored.id, &form, &lines);
    let numbered: Vec<(&str, i32)> = sent
        .pedido
        .itens
        .iter()
        .map(|l| (l.produto_codigo.as_str(), l.ordem))
        .collect();
    assert_eq!(numbered, vec![("A", 1), ("B", 2), ("CAF500", 3)]);

    let reloaded = Order::from_raw(&serde_json::to_value(&sent).unwrap());
    let codes: Vec<&str> = reloaded.itens.iter().map(|l| l.produto_codigo.as_str()).collect();
    assert_eq!(codes, vec!["A", "B", "CAF500"]);
}

#[test]
fn list_state_follows_reloads() {
    let page = json!({ "data": { "data": [ { "id": 1 }, { "id": 2 }, { "id": 3 } ] } });
    let mut state = OrderListState::default();
    state.set_items(normalize_list(&page));
    state.select(1);
    state.select(3);
    state.deselect(2);
    assert_eq!(state.selected_orders().len(), 2);

    state.set_items(normalize_list(&json!([{ "id": 3 }])));
    assert!(!state.is_selected(1));
    assert!(state.is_selected(3));

    state.set_items(vec![Order::from_raw(&json!(null))]);
    assert_eq!(state.items.len(), 1);
    assert!(state.selected_orders().is_empty());
}
