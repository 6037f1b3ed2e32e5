pub mod number_format;
pub mod table_cell_money;
pub mod table_header_checkbox;

pub use number_format::*;
pub use table_cell_money::TableCellMoney;
pub use table_header_checkbox::TableHeaderCheckbox;
