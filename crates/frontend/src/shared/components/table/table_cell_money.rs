//! Money cell: right-aligned, pt-BR formatted, optional sign colouring.

use super::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,
    /// Prefix `R$`.
    #[prop(optional)]
    show_currency: bool,
    /// Negative values in red (balances, discounts).
    #[prop(optional)]
    color_negative: bool,
    #[prop(optional)] bold: bool,
) -> impl IntoView {
    let text = move || match value.get() {
        Some(v) if show_currency => format!("R$ {}", format_money(v)),
        Some(v) => format_money(v),
        None => "—".to_string(),
    };

    let style = move || {
        let mut styles = Vec::new();
        if color_negative && value.get().is_some_and(|v| v < 0.0) {
            styles.push("color: var(--color-error-700)");
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=style>{text}</span>
        </TableCell>
    }
}
