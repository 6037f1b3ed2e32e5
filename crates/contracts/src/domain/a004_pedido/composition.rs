//! Line items and order totals.
//!
//! Amounts are kept unrounded; rounding happens only when formatting for
//! display.

use crate::domain::a003_produto::aggregate::Product;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const PRODUTO_ID: Aliases = &["produto_id", "produtoId", "id_produto", "produto.id"];
const PRODUTO_CODIGO: Aliases = &[
    "produto_codigo",
    "produtoCodigo",
    "codigo_produto",
    "codigoProduto",
    "codprod",
    "produto.codigo",
    "codigo",
];
const DESCRICAO: Aliases = &[
    "produto_descricao",
    "produtoDescricao",
    "descricao",
    "produto.descricao",
    "nome",
];
const UNIDADE: Aliases = &["unidade", "un", "produto.unidade"];
const QUANTIDADE: Aliases = &["quantidade", "qtd", "qtde", "quantity"];
const PRECO: Aliases = &["preco", "preco_unitario", "precoUnitario", "preco_tabela", "precoTabela", "valor_unitario", "valorUnitario"];
const DESCONTO: Aliases = &[
    "desconto_percentual",
    "descontoPercentual",
    "perc_desconto",
    "percDesconto",
    "desconto",
];
const OBSERVACAO: Aliases = &["observacao", "obs", "item_observacao", "itemObservacao"];
const ORDEM: Aliases = &["ordem", "sequencia", "seq", "item"];

// ============================================================================
// Line item
// ============================================================================

/// Item do pedido
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub produto_id: i64,
    pub produto_codigo: String,
    pub descricao: String,
    pub unidade: String,
    pub quantidade: f64,
    /// Unit list price
    pub preco: f64,
    pub desconto_percentual: f64,
    /// Net unit price: `total / quantidade`
    pub liquido: f64,
    /// `preco * quantidade * (1 - desconto_percentual / 100)`
    pub total: f64,
    pub observacao: Option<String>,
    pub ordem: Option<i32>,
}

impl LineItem {
    pub fn new(product: &Product, quantidade: f64, preco: f64, desconto_percentual: f64) -> Self {
        let mut line = Self {
            produto_id: product.id,
            produto_codigo: product.codigo.clone(),
            descricao: product.descricao.clone(),
            unidade: product.unidade.clone(),
            quantidade,
            preco,
            desconto_percentual,
            ..Default::default()
        };
        line.recalculate();
        line
    }

    /// Refreshes the derived `total` and `liquido` fields.
    pub fn recalculate(&mut self) {
        self.total = self.preco * self.quantidade * (1.0 - self.desconto_percentual / 100.0);
        self.liquido = if self.quantidade > 0.0 {
            self.total / self.quantidade
        } else {
            0.0
        };
    }

    /// Gross value before discount
    pub fn bruto(&self) -> f64 {
        self.preco * self.quantidade
    }

    pub fn desconto_valor(&self) -> f64 {
        self.bruto() * self.desconto_percentual / 100.0
    }
}

impl FromRaw for LineItem {
    fn from_raw(raw: &Value) -> Self {
        let mut line = Self {
            produto_id: raw.int(PRODUTO_ID),
            produto_codigo: raw.text(PRODUTO_CODIGO),
            descricao: raw.text(DESCRICAO),
            unidade: raw.text(UNIDADE).to_uppercase(),
            quantidade: raw.number(QUANTIDADE),
            preco: raw.number(PRECO),
            desconto_percentual: raw.number(DESCONTO),
            liquido: 0.0,
            total: 0.0,
            observacao: raw.opt_text(OBSERVACAO),
            ordem: raw.opt_int(ORDEM).map(|v| v as i32),
        };
        line.recalculate();
        line
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Reason a line was not added; shown to the operator as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    ProductMissing,
    QuantityNotPositive,
    DiscountOutOfRange,
    PriceMissing,
    IndexOutOfRange,
}

impl LineRejection {
    pub fn message(&self) -> &'static str {
        match self {
            LineRejection::ProductMissing => "Selecione um produto",
            LineRejection::QuantityNotPositive => "Informe uma quantidade maior que zero",
            LineRejection::DiscountOutOfRange => "Desconto deve estar entre 0% e 100%",
            LineRejection::PriceMissing => "Produto sem preço na tabela selecionada",
            LineRejection::IndexOutOfRange => "Item não encontrado no pedido",
        }
    }
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn check_amounts(quantidade: f64, desconto_percentual: f64) -> Result<(), LineRejection> {
    if !(quantidade > 0.0) || !quantidade.is_finite() {
        return Err(LineRejection::QuantityNotPositive);
    }
    if !(0.0..=100.0).contains(&desconto_percentual) {
        return Err(LineRejection::DiscountOutOfRange);
    }
    Ok(())
}

// ============================================================================
// Operations
// ============================================================================

/// Builds a line for `product` priced from `tabela`.
pub fn add_line(
    product: Option<&Product>,
    tabela: &str,
    quantidade: f64,
    desconto_percentual: f64,
) -> Result<LineItem, LineRejection> {
    let product = product.ok_or(LineRejection::ProductMissing)?;
    check_amounts(quantidade, desconto_percentual)?;
    let preco = product.price_for_table(tabela);
    if !(preco > 0.0) {
        return Err(LineRejection::PriceMissing);
    }
    Ok(LineItem::new(product, quantidade, preco, desconto_percentual))
}

/// Positional removal. Other lines keep their relative order and `ordem`.
pub fn remove_line(lines: &[LineItem], index: usize) -> Vec<LineItem> {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| line.clone())
        .collect()
}

/// Changes quantity and discount of an existing line.
pub fn update_line(
    lines: &[LineItem],
    index: usize,
    quantidade: f64,
    desconto_percentual: f64,
) -> Result<Vec<LineItem>, LineRejection> {
    if index >= lines.len() {
        return Err(LineRejection::IndexOutOfRange);
    }
    check_amounts(quantidade, desconto_percentual)?;
    let mut updated = lines.to_vec();
    let line = &mut updated[index];
    line.quantidade = quantidade;
    line.desconto_percentual = desconto_percentual;
    line.recalculate();
    Ok(updated)
}

/// Outcome of an inline edit: the lines to render and, when the edit was
/// rejected, why. A rejected edit renders the committed lines again so the
/// inputs drop the refused text.
pub fn apply_line_edit(
    lines: &[LineItem],
    index: usize,
    quantidade: f64,
    desconto_percentual: f64,
) -> (Vec<LineItem>, Option<LineRejection>) {
    match update_line(lines, index, quantidade, desconto_percentual) {
        Ok(updated) => (updated, None),
        Err(rejection) => (lines.to_vec(), Some(rejection)),
    }
}

/// Display order of lines.
///
/// Without any `ordem` the array order stands. Otherwise lines sort by
/// `(ordem, insertion index)`; lines lacking `ordem` go after numbered ones.
pub fn ordered_lines(lines: &[LineItem]) -> Vec<LineItem> {
    if lines.iter().all(|l| l.ordem.is_none()) {
        return lines.to_vec();
    }
    let mut indexed: Vec<(usize, &LineItem)> = lines.iter().enumerate().collect();
    indexed.sort_by_key(|(i, line)| (line.ordem.unwrap_or(i32::MAX), *i));
    indexed.into_iter().map(|(_, line)| line.clone()).collect()
}

// ============================================================================
// Totals
// ============================================================================

/// Order-level aggregate, always derived from the lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub bruto: f64,
    pub descontos: f64,
    /// Percentage of `bruto`; 0 when `bruto` is 0
    pub descontos_perc: f64,
    pub liquido: f64,
}

pub fn compute_totals(lines: &[LineItem]) -> Totals {
    let (bruto, descontos, liquido) = lines.iter().fold((0.0, 0.0, 0.0), |(b, d, l), line| {
        (b + line.bruto(), d + line.desconto_valor(), l + line.total)
    });
    let descontos_perc = if bruto != 0.0 {
        descontos / bruto * 100.0
    } else {
        0.0
    };
    Totals {
        bruto,
        descontos,
        descontos_perc,
        liquido,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn product(preco: f64) -> Product {
        Product {
            id: 1,
            codigo: "P1".to_string(),
            descricao: "Arroz 5kg".to_string(),
            preco,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_line() {
        let line = add_line(Some(&product(104.3164)), "", 2.0, 8.9309).unwrap();
        assert!((line.total - 190.00).abs() < 0.005, "total = {}", line.total);
        assert!((line.liquido - 95.00).abs() < 0.005, "liquido = {}", line.liquido);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(add_line(None, "", 1.0, 0.0), Err(LineRejection::ProductMissing));
        let p = product(10.0);
        assert_eq!(add_line(Some(&p), "", 0.0, 0.0), Err(LineRejection::QuantityNotPositive));
        assert_eq!(add_line(Some(&p), "", -3.0, 0.0), Err(LineRejection::QuantityNotPositive));
        assert_eq!(add_line(Some(&p), "", f64::NAN, 0.0), Err(LineRejection::QuantityNotPositive));
        assert_eq!(add_line(Some(&p), "", 1.0, 120.0), Err(LineRejection::DiscountOutOfRange));
        assert_eq!(add_line(Some(&product(0.0)), "", 1.0, 0.0), Err(LineRejection::PriceMissing));
    }

    #[test]
    fn test_totals_empty() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.descontos_perc, 0.0);
    }

    #[test]
    fn test_totals_identity() {
        let lines = vec![
            add_line(Some(&product(104.3164)), "", 2.0, 8.9309).unwrap(),
            add_line(Some(&product(3.333)), "", 7.0, 0.0).unwrap(),
            add_line(Some(&product(59.9)), "", 12.0, 33.3333).unwrap(),
            add_line(Some(&product(0.01)), "", 1000.0, 100.0).unwrap(),
        ];
        let totals = compute_totals(&lines);
        assert!((totals.liquido - (totals.bruto - totals.descontos)).abs() < TOLERANCE);
        assert!(totals.descontos_perc > 0.0 && totals.descontos_perc < 100.0);
    }

    #[test]
    fn test_remove_line_keeps_order() {
        let p = product(1.0);
        let lines: Vec<LineItem> = (1..=3)
            .map(|q| add_line(Some(&p), "", q as f64, 0.0).unwrap())
            .collect();
        let remaining = remove_line(&lines, 1);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].quantidade, 1.0);
        assert_eq!(remaining[1].quantidade, 3.0);
        assert_eq!(remove_line(&lines, 9).len(), 3);
    }

    #[test]
    fn test_update_line() {
        let lines = vec![add_line(Some(&product(10.0)), "", 1.0, 0.0).unwrap()];
        let updated = update_line(&lines, 0, 4.0, 50.0).unwrap();
        assert_eq!(updated[0].total, 20.0);
        assert_eq!(updated[0].liquido, 5.0);
        assert_eq!(update_line(&lines, 3, 1.0, 0.0), Err(LineRejection::IndexOutOfRange));
    }

    #[test]
    fn test_rejected_edit_keeps_committed_values() {
        let lines = vec![add_line(Some(&product(10.0)), "", 3.0, 5.0).unwrap()];
        let (shown, rejection) = apply_line_edit(&lines, 0, 0.0, 5.0);
        assert_eq!(shown, lines);
        assert!(rejection.is_some());

        let (shown, rejection) = apply_line_edit(&lines, 0, 3.0, 120.0);
        assert_eq!(shown[0].desconto_percentual, 5.0);
        assert!(rejection.is_some());

        let (shown, rejection) = apply_line_edit(&lines, 0, 4.0, 5.0);
        assert_eq!(shown[0].quantidade, 4.0);
        assert_eq!(rejection, None);
    }

    #[test]
    fn test_ordered_lines() {
        let p = product(1.0);
        let mut lines: Vec<LineItem> = (0..4)
            .map(|q| add_line(Some(&p), "", (q + 1) as f64, 0.0).unwrap())
            .collect();
        lines[0].ordem = Some(2);
        lines[1].ordem = Some(1);
        lines[2].ordem = None;
        lines[3].ordem = Some(1);
        let quantities: Vec<f64> = ordered_lines(&lines).iter().map(|l| l.quantidade).collect();
        assert_eq!(quantities, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_from_raw_recomputes_total() {
        let raw = serde_json::json!({
            "produtoCodigo": "P1",
            "qtd": "3",
            "precoUnitario": 10,
            "percDesconto": "10",
            "valorTotal": 999
        });
        let line = LineItem::from_raw(&raw);
        assert!((line.total - 27.0).abs() < TOLERANCE);
        assert!((line.liquido - 9.0).abs() < TOLERANCE);
    }
}
