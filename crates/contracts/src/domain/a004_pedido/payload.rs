//! Order form state and the create/update bodies sent to the backend.

use super::aggregate::Order;
use super::composition::{compute_totals, ordered_lines, LineItem};
use crate::shared::normalize::coerce_id;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of client-generated origin tags
pub const ORIGIN_PREFIX: &str = "ADS";

/// Header fields of the order composition screen, as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    pub empresa_id: String,
    pub data: String,
    pub operacao: String,
    pub cliente_id: String,
    pub cliente_nome: String,
    pub representante_id: String,
    pub tabela: String,
    pub prazo_id: String,
    pub forma_pagamento_id: String,
    pub rota_id: String,
    pub segmento_id: String,
    pub cidade_id: String,
    pub observacao: String,
    pub pedido_origem: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub produto_id: i64,
    pub produto_codigo: String,
    pub quantidade: f64,
    pub preco_unitario: f64,
    pub desconto_percentual: f64,
    pub preco_liquido: f64,
    pub valor_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
    pub ordem: i32,
}

/// Body of `POST /api/pedidos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub empresa_id: i64,
    pub data_pedido: String,
    pub operacao: String,
    pub cliente_id: i64,
    pub representante_id: i64,
    pub tabela_preco: String,
    pub prazo_pagamento_id: i64,
    pub forma_pagamento_id: i64,
    pub rota_id: i64,
    pub segmento_id: i64,
    pub cidade_id: i64,
    pub observacao: String,
    pub pedido_origem: String,
    pub valor_bruto: f64,
    pub valor_desconto: f64,
    pub valor_total: f64,
    pub itens: Vec<OrderLineRequest>,
}

/// Body of `PUT /api/pedidos/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateRequest {
    pub id: i64,
    #[serde(flatten)]
    pub pedido: OrderCreateRequest,
}

/// `ADS-<UTC timestamp>-<6 digits>` for a given instant and random draw.
pub fn origin_tag_at(now: DateTime<Utc>, random: u32) -> String {
    format!(
        "{}-{}-{:06}",
        ORIGIN_PREFIX,
        now.format("%Y%m%d%H%M%S"),
        random % 1_000_000
    )
}

pub fn generate_origin_tag() -> String {
    let random = (uuid::Uuid::new_v4().as_u128() % 1_000_000) as u32;
    origin_tag_at(Utc::now(), random)
}

fn line_request(position: usize, line: &LineItem) -> OrderLineRequest {
    OrderLineRequest {
        produto_id: line.produto_id,
        produto_codigo: line.produto_codigo.clone(),
        quantidade: line.quantidade,
        preco_unitario: line.preco,
        desconto_percentual: line.desconto_percentual,
        preco_liquido: line.liquido,
        valor_total: line.total,
        observacao: line.observacao.clone().filter(|o| !o.trim().is_empty()),
        ordem: position as i32 + 1,
    }
}

/// Maps the form and lines to the backend create body.
///
/// Identifier fields are coerced to integers (0 when blank), and an origin
/// tag is generated unless the form already carries one.
pub fn build_create_payload(form: &OrderForm, lines: &[LineItem]) -> OrderCreateRequest {
    let ordered = ordered_lines(lines);
    let totals = compute_totals(&ordered);
    let pedido_origem = form
        .pedido_origem
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_origin_tag);

    OrderCreateRequest {
        empresa_id: coerce_id(&form.empresa_id),
        data_pedido: form.data.trim().to_string(),
        operacao: form.operacao.trim().to_string(),
        cliente_id: coerce_id(&form.cliente_id),
        representante_id: coerce_id(&form.representante_id),
        tabela_preco: form.tabela.trim().to_string(),
        prazo_pagamento_id: coerce_id(&form.prazo_id),
        forma_pagamento_id: coerce_id(&form.forma_pagamento_id),
        rota_id: coerce_id(&form.rota_id),
        segmento_id: coerce_id(&form.segmento_id),
        cidade_id: coerce_id(&form.cidade_id),
        observacao: form.observacao.trim().to_string(),
        pedido_origem,
        valor_bruto: totals.bruto,
        valor_desconto: totals.descontos,
        valor_total: totals.liquido,
        itens: ordered
            .iter()
            .enumerate()
            .map(|(i, line)| line_request(i, line))
            .collect(),
    }
}

pub fn build_update_payload(id: i64, form: &OrderForm, lines: &[LineItem]) -> OrderUpdateRequest {
    OrderUpdateRequest {
        id,
        pedido: build_create_payload(form, lines),
    }
}

/// Checks performed before submitting; the message goes to the operator.
pub fn validate_order(form: &OrderForm, lines: &[LineItem]) -> Result<(), &'static str> {
    if coerce_id(&form.cliente_id) <= 0 {
        return Err("Selecione o cliente do pedido");
    }
    if form.operacao.trim().is_empty() {
        return Err("Selecione a operação");
    }
    if lines.is_empty() {
        return Err("Adicione ao menos um item ao pedido");
    }
    Ok(())
}

fn id_text(id: i64) -> String {
    if id > 0 {
        id.to_string()
    } else {
        String::new()
    }
}

impl OrderForm {
    /// Empty form for a new order on `today`.
    pub fn new_for(empresa_id: i64, today: NaiveDate) -> Self {
        Self {
            empresa_id: id_text(empresa_id),
            data: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// Form pre-filled from a loaded order, for editing.
    pub fn from_order(order: &Order, empresa_id: i64) -> Self {
        Self {
            empresa_id: id_text(empresa_id),
            data: order.data.split('T').next().unwrap_or_default().to_string(),
            operacao: order.operacao.clone(),
            cliente_id: id_text(order.cliente_id),
            cliente_nome: order.cliente_nome.clone(),
            representante_id: id_text(order.representante_id),
            tabela: order.tabela.clone(),
            prazo_id: id_text(order.prazo_id),
            forma_pagamento_id: id_text(order.forma_pagamento_id),
            rota_id: id_text(order.rota_id),
            segmento_id: id_text(order.segmento_id),
            cidade_id: id_text(order.cidade_id),
            observacao: order.observacao.clone(),
            pedido_origem: (!order.pedido_origem.is_empty()).then(|| order.pedido_origem.clone()),
        }
    }
}

/// A new, unsaved copy of `order` dated `today`.
///
/// The origin tag is cleared so the copy is not mistaken for a resubmission.
pub fn duplicate_order(order: &Order, empresa_id: i64, today: NaiveDate) -> (OrderForm, Vec<LineItem>) {
    let mut form = OrderForm::from_order(order, empresa_id);
    form.data = today.format("%Y-%m-%d").to_string();
    form.pedido_origem = None;

    let lines = ordered_lines(&order.itens)
        .into_iter()
        .map(|mut line| {
            line.recalculate();
            line
        })
        .collect();
    (form, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_produto::aggregate::Product;
    use crate::domain::a004_pedido::composition::add_line;
    use chrono::TimeZone;

    fn lines() -> Vec<LineItem> {
        let product = Product {
            id: 3,
            codigo: "P3".to_string(),
            preco: 50.0,
            ..Default::default()
        };
        vec![
            add_line(Some(&product), "", 2.0, 10.0).unwrap(),
            add_line(Some(&product), "", 1.0, 0.0).unwrap(),
        ]
    }

    #[test]
    fn test_origin_tag_format() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 13, 4, 5).unwrap();
        assert_eq!(origin_tag_at(now, 42), "ADS-20240502130405-000042");
        assert_eq!(origin_tag_at(now, 1_234_567), "ADS-20240502130405-234567");
    }

    #[test]
    fn test_generated_tag_shape() {
        let tag = generate_origin_tag();
        let parts: Vec<&str> = tag.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ADS");
        assert_eq!(parts[1].len(), 14);
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_create_payload_coerces_ids() {
        let form = OrderForm {
            empresa_id: "2".to_string(),
            cliente_id: "15".to_string(),
            rota_id: "".to_string(),
            segmento_id: "abc".to_string(),
            prazo_id: " 4 ".to_string(),
            operacao: "V1".to_string(),
            ..Default::default()
        };
        let payload = build_create_payload(&form, &lines());
        assert_eq!(payload.empresa_id, 2);
        assert_eq!(payload.cliente_id, 15);
        assert_eq!(payload.rota_id, 0);
        assert_eq!(payload.segmento_id, 0);
        assert_eq!(payload.prazo_pagamento_id, 4);
        assert_eq!(payload.forma_pagamento_id, 0);
        assert_eq!(payload.cidade_id, 0);
        assert!(payload.pedido_origem.starts_with("ADS-"));
        assert_eq!(payload.valor_bruto, 150.0);
        assert_eq!(payload.valor_desconto, 10.0);
        assert_eq!(payload.valor_total, 140.0);
        assert_eq!(payload.itens[0].ordem, 1);
        assert_eq!(payload.itens[1].ordem, 2);
    }

    #[test]
    fn test_supplied_origin_kept() {
        let form = OrderForm {
            pedido_origem: Some("ADS-20240101000000-123456".to_string()),
            ..Default::default()
        };
        let payload = build_create_payload(&form, &[]);
        assert_eq!(payload.pedido_origem, "ADS-20240101000000-123456");
        assert_eq!(payload.valor_total, 0.0);
    }

    #[test]
    fn test_update_payload_json_shape() {
        let payload = build_update_payload(77, &OrderForm::default(), &lines());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], 77);
        assert_eq!(json["empresaId"], 0);
        assert!(json["itens"].is_array());
        assert_eq!(json["itens"][0]["precoUnitario"], 50.0);
        assert!(json["itens"][0].get("observacao").is_none());
    }

    #[test]
    fn test_validate_order() {
        let form = OrderForm {
            cliente_id: "1".to_string(),
            operacao: "V1".to_string(),
            ..Default::default()
        };
        assert!(validate_order(&form, &lines()).is_ok());
        assert_eq!(validate_order(&form, &[]), Err("Adicione ao menos um item ao pedido"));
        assert_eq!(
            validate_order(&OrderForm::default(), &lines()),
            Err("Selecione o cliente do pedido")
        );
    }

    #[test]
    fn test_duplicate_order() {
        let order = Order {
            id: 9,
            numero: "000009".to_string(),
            data: "2023-01-10T00:00:00".to_string(),
            cliente_id: 5,
            pedido_origem: "ADS-20230110000000-000001".to_string(),
            itens: lines(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (form, copied) = duplicate_order(&order, 1, today);
        assert_eq!(form.data, "2024-06-01");
        assert_eq!(form.cliente_id, "5");
        assert_eq!(form.pedido_origem, None);
        assert_eq!(copied, order.itens);
    }
}
