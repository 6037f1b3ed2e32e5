use crate::shared::normalize::{parse_backend_date, Aliases, FromRaw, RawFields};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "titulo_id", "tituloId"];
const DOCUMENTO: Aliases = &["documento", "numero_documento", "numeroDocumento", "titulo", "numero"];
const PARCELA: Aliases = &["parcela", "sequencia"];
const EMISSAO: Aliases = &["emissao", "data_emissao", "dataEmissao"];
const VENCIMENTO: Aliases = &["vencimento", "data_vencimento", "dataVencimento"];
const PAGAMENTO: Aliases = &["pagamento", "data_pagamento", "dataPagamento", "baixa", "data_baixa"];
const VALOR: Aliases = &["valor", "valor_titulo", "valorTitulo", "valor_original"];
const VALOR_PAGO: Aliases = &["valor_pago", "valorPago", "valor_baixa", "valorBaixa"];
const SALDO: Aliases = &["saldo", "valor_aberto", "valorAberto", "valor_saldo"];
const FORMA: Aliases = &["forma_pagamento", "formaPagamento", "especie", "tipo"];

/// Título a receber de um cliente
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: i64,
    pub documento: String,
    pub parcela: String,
    pub emissao: String,
    pub vencimento: String,
    pub pagamento: String,
    pub valor: f64,
    pub valor_pago: f64,
    /// Open balance; derived from valor - valor_pago when absent
    pub saldo: f64,
    pub forma_pagamento: String,
}

impl FromRaw for Receivable {
    fn from_raw(raw: &Value) -> Self {
        let valor = raw.number(VALOR);
        let valor_pago = raw.number(VALOR_PAGO);
        let pagamento = raw.text(PAGAMENTO);
        let saldo = raw.opt_number(SALDO).unwrap_or_else(|| {
            if valor_pago == 0.0 && !pagamento.is_empty() {
                0.0
            } else {
                (valor - valor_pago).max(0.0)
            }
        });
        Self {
            id: raw.int(ID),
            documento: raw.text(DOCUMENTO),
            parcela: raw.text(PARCELA),
            emissao: raw.text(EMISSAO),
            vencimento: raw.text(VENCIMENTO),
            pagamento,
            valor,
            valor_pago,
            saldo,
            forma_pagamento: raw.text(FORMA),
        }
    }
}

impl Receivable {
    pub fn is_open(&self) -> bool {
        self.saldo > 0.0
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_backend_date(&self.vencimento)
    }

    /// Open and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date().is_some_and(|due| due < today)
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.due_date() {
            Some(due) if self.is_open() && due < today => (today - due).num_days(),
            _ => 0,
        }
    }

    pub fn status_label(&self, today: NaiveDate) -> &'static str {
        if !self.is_open() {
            "Pago"
        } else if self.is_overdue(today) {
            "Vencido"
        } else {
            "Em aberto"
        }
    }
}

/// Итоги по títulos do cliente na data de referência
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceivableSummary {
    pub em_aberto: f64,
    pub vencido: f64,
    pub pago: f64,
    pub titulos_vencidos: usize,
    pub maior_atraso_dias: i64,
}

impl ReceivableSummary {
    pub fn compute(items: &[Receivable], today: NaiveDate) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.pago += item.valor_pago;
            if item.is_open() {
                acc.em_aberto += item.saldo;
                if item.is_overdue(today) {
                    acc.vencido += item.saldo;
                    acc.titulos_vencidos += 1;
                    acc.maior_atraso_dias = acc.maior_atraso_dias.max(item.days_overdue(today));
                }
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary() {
        let items: Vec<Receivable> = [
            json!({ "valor": "1.000,00", "dataVencimento": "2026-01-10" }),
            json!({ "valor": 200.0, "valor_pago": 50.0, "vencimento": "20/01/2026" }),
            json!({ "valor": 300.0, "valorPago": 300.0, "vencimento": "2026-01-01", "dataPagamento": "2026-01-01" }),
            json!({ "valor": 80.0, "vencimento": "2026-03-01" }),
        ]
        .iter()
        .map(Receivable::from_raw)
        .collect();

        let summary = ReceivableSummary::compute(&items, day(2026, 2, 1));
        assert!((summary.em_aberto - 1230.0).abs() < 1e-9);
        assert!((summary.vencido - 1150.0).abs() < 1e-9);
        assert!((summary.pago - 350.0).abs() < 1e-9);
        assert_eq!(summary.titulos_vencidos, 2);
        assert_eq!(summary.maior_atraso_dias, 22);
        assert_eq!(items[2].status_label(day(2026, 2, 1)), "Pago");
        assert_eq!(items[3].status_label(day(2026, 2, 1)), "Em aberto");
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let item = Receivable::from_raw(&json!({ "valor": 10, "vencimento": "2026-02-01" }));
        assert!(!item.is_overdue(day(2026, 2, 1)));
        assert_eq!(ReceivableSummary::compute(&[], day(2026, 2, 1)), ReceivableSummary::default());
    }

    #[test]
    fn test_paid_without_amount_closed() {
        let item = Receivable::from_raw(&json!({ "valor": 10, "data_baixa": "2026-01-05" }));
        assert!(!item.is_open());
    }
}
