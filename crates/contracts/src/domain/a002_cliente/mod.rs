pub mod aggregate;
pub mod cnpj_lookup;
pub mod document;
pub mod form;
