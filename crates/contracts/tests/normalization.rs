use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a006_fornecedor::aggregate::Supplier;
use contracts::domain::a007_divisao::aggregate::Division;
use contracts::domain::lookups::{normalize_lookup, LookupKind};
use contracts::shared::natural_sort::sort_lookup;
use contracts::shared::normalize::{normalize_list, FromRaw};
use serde_json::{json, Value};

#[test]
fn order_without_optional_fields_is_fully_defaulted() {
    for raw in [json!({}), Value::Null, json!("texto"), json!({ "itens": "x" })] {
        let order = Order::from_raw(&raw);
        assert_eq!(order, Order::default());
        assert_eq!(order.display_total(), 0.0);
    }
}

#[test]
fn naming_variants_converge() {
    let snake = json!({
        "cliente_id": 9,
        "razao_social": "Padaria Estrela",
        "nome_fantasia": "Estrela",
        "cnpj_cpf": "11.222.333/0001-81",
        "cidade_nome": "Campinas",
        "uf": "SP",
        "limite_credito": "1.500,00",
        "is_bloqueado": "N"
    });
    let camel = json!({
        "clienteId": "9",
        "razaoSocial": "Padaria Estrela",
        "nomeFantasia": "Estrela",
        "cnpjCpf": "11.222.333/0001-81",
        "cidadeNome": "Campinas",
        "estado": "SP",
        "limiteCredito": 1500,
        "isBloqueado": false
    });
    assert_eq!(Client::from_raw(&snake), Client::from_raw(&camel));
}

#[test]
fn every_lookup_kind_sorts_deterministically() {
    let payload = json!({ "data": [
        { "id": "10", "codigo": "10", "descricao": "Item" },
        { "id": "2", "codigo": "2", "descricao": "item" },
        { "id": "1", "codigo": "1", "descricao": "ítem" }
    ]});
    for kind in LookupKind::ALL {
        let first = normalize_lookup(kind, &payload);
        let again = normalize_lookup(kind, &payload);
        assert_eq!(first, again, "{:?}", kind);
        let ids: Vec<&str> = first.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"], "{:?}", kind);
    }
}

#[test]
fn supplier_and_division_lists_sort_regardless_of_input_order() {
    let forward = json!([
        { "id": 3, "codigo": "F3", "nome": "Nestlé" },
        { "id": 1, "codigo": "F1", "nome": "Ambev" },
        { "id": 2, "codigo": "F2", "nome": "nestle" }
    ]);
    let mut a: Vec<Supplier> = normalize_list(&forward);
    let mut b: Vec<Supplier> = a.iter().rev().cloned().collect();
    sort_lookup(&mut a);
    sort_lookup(&mut b);
    assert_eq!(a, b);
    assert_eq!(a[0].nome, "Ambev");

    let mut divisions: Vec<Division> = normalize_list(&json!([
        { "divisaoId": 20, "descricao": "Bebidas 10" },
        { "divisaoId": 21, "descricao": "Bebidas 9" }
    ]));
    sort_lookup(&mut divisions);
    assert_eq!(divisions[0].id, 21);
}
