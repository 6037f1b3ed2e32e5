pub mod a001_empresa;
pub mod a002_cliente;
pub mod a003_produto;
pub mod a004_pedido;
pub mod a005_representante;
pub mod a006_fornecedor;
pub mod a007_divisao;
pub mod a008_itinerario;
pub mod common;
pub mod lookups;
