pub mod empresa_select;
pub mod login;
