pub mod p901_contas_receber;
pub mod p902_historico_compras;
