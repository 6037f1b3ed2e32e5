use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "produto_id", "produtoId", "id_produto"];
const CODIGO: Aliases = &["codigo", "produto_codigo", "produtoCodigo", "cod_produto", "codprod", "sku"];
const DESCRICAO: Aliases = &["descricao", "produto_descricao", "produtoDescricao", "nome", "name"];
const UNIDADE: Aliases = &["unidade", "un", "unidade_medida", "unidadeMedida"];
const EAN: Aliases = &["ean", "codigo_barras", "codigoBarras", "gtin"];
const MARCA: Aliases = &["marca", "fabricante"];
const FORNECEDOR_ID: Aliases = &["fornecedor_id", "fornecedorId", "id_fornecedor"];
const DIVISAO_ID: Aliases = &["divisao_id", "divisaoId", "id_divisao", "departamento_id"];
const PRECO: Aliases = &["preco", "preco_venda", "precoVenda", "preco_tabela", "precoTabela", "valor"];
const ESTOQUE: Aliases = &["estoque", "saldo", "estoque_disponivel", "estoqueDisponivel", "quantidade"];
const ATIVO: Aliases = &["ativo", "is_ativo", "isAtivo"];
const PRECOS: Aliases = &["precos", "tabelas", "tabelas_preco", "tabelasPreco", "prices"];
const LOTES: Aliases = &["lotes", "estoque_lotes", "estoqueLotes", "lots"];

const TABELA: Aliases = &["tabela", "tabela_codigo", "tabelaCodigo", "codigo_tabela", "codigo", "id"];
const TABELA_DESCRICAO: Aliases = &["descricao", "tabela_descricao", "tabelaDescricao", "nome"];
const LOTE: Aliases = &["lote", "numero_lote", "numeroLote", "codigo"];
const VALIDADE: Aliases = &["validade", "data_validade", "dataValidade", "vencimento"];

/// Preço do produto numa tabela de preço
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    pub tabela: String,
    pub descricao: String,
    pub preco: f64,
}

impl FromRaw for ProductPrice {
    fn from_raw(raw: &Value) -> Self {
        Self {
            tabela: raw.text(TABELA),
            descricao: raw.text(TABELA_DESCRICAO),
            preco: raw.number(PRECO),
        }
    }
}

/// Lote de estoque
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLot {
    pub lote: String,
    pub validade: String,
    pub quantidade: f64,
}

impl FromRaw for StockLot {
    fn from_raw(raw: &Value) -> Self {
        Self {
            lote: raw.text(LOTE),
            validade: raw.text(VALIDADE),
            quantidade: raw.number(ESTOQUE),
        }
    }
}

/// Produto do catálogo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub unidade: String,
    pub ean: String,
    pub marca: String,
    pub fornecedor_id: i64,
    pub divisao_id: i64,
    /// Base price, used when the order's price table has no entry
    pub preco: f64,
    pub estoque: f64,
    pub ativo: bool,
    pub precos: Vec<ProductPrice>,
    pub lotes: Vec<StockLot>,
}

impl Product {
    /// Unit price for `tabela`, falling back to the base price.
    pub fn price_for_table(&self, tabela: &str) -> f64 {
        let tabela = tabela.trim();
        if tabela.is_empty() {
            return self.preco;
        }
        self.precos
            .iter()
            .find(|p| p.tabela.eq_ignore_ascii_case(tabela) && p.preco > 0.0)
            .map(|p| p.preco)
            .unwrap_or(self.preco)
    }

    /// Lots win over the product-level stock figure when present.
    pub fn available_stock(&self) -> f64 {
        if self.lotes.is_empty() {
            self.estoque
        } else {
            self.lotes.iter().map(|l| l.quantidade).sum()
        }
    }

    pub fn label(&self) -> String {
        if self.codigo.is_empty() {
            self.descricao.clone()
        } else {
            format!("{} - {}", self.codigo, self.descricao)
        }
    }
}

impl FromRaw for Product {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            descricao: raw.text(DESCRICAO),
            unidade: raw.text(UNIDADE).to_uppercase(),
            ean: raw.text(EAN),
            marca: raw.text(MARCA),
            fornecedor_id: raw.int(FORNECEDOR_ID),
            divisao_id: raw.int(DIVISAO_ID),
            preco: raw.number(PRECO),
            estoque: raw.number(ESTOQUE),
            ativo: raw.flag_or(ATIVO, true),
            precos: raw.records(PRECOS).iter().map(ProductPrice::from_raw).collect(),
            lotes: raw.records(LOTES).iter().map(StockLot::from_raw).collect(),
        }
    }
}

impl AggregateRoot for Product {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.codigo.clone()
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        &self.descricao
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "produtos"
    }

    fn element_name() -> &'static str {
        "Produto"
    }

    fn list_name() -> &'static str {
        "Produtos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Product {
        Product::from_raw(&json!({
            "produtoId": 9,
            "produtoCodigo": "7891000",
            "descricao": "Café 500g",
            "un": "pc",
            "precoVenda": "12,90",
            "estoque": 40,
            "tabelasPreco": [
                { "tabelaCodigo": "T2", "preco": 11.5 },
                { "tabelaCodigo": "T3", "preco": 0 }
            ],
            "lotes": [
                { "lote": "L1", "validade": "2025-01-31", "saldo": 10 },
                { "numeroLote": "L2", "dataValidade": "2025-03-31", "quantidade": "5" }
            ]
        }))
    }

    #[test]
    fn test_normalization() {
        let product = sample();
        assert_eq!(product.id, 9);
        assert_eq!(product.codigo, "7891000");
        assert_eq!(product.unidade, "PC");
        assert_eq!(product.preco, 12.9);
        assert_eq!(product.precos.len(), 2);
        assert_eq!(product.lotes[1].lote, "L2");
        assert!(product.ativo);
    }

    #[test]
    fn test_price_for_table() {
        let product = sample();
        assert_eq!(product.price_for_table("t2"), 11.5);
        // zero price in a table means "not priced there"
        assert_eq!(product.price_for_table("T3"), 12.9);
        assert_eq!(product.price_for_table("T9"), 12.9);
        assert_eq!(product.price_for_table(""), 12.9);
    }

    #[test]
    fn test_stock_from_lots() {
        let product = sample();
        assert_eq!(product.available_stock(), 15.0);
        let no_lots = Product { estoque: 4.0, ..Default::default() };
        assert_eq!(no_lots.available_stock(), 4.0);
    }
}
