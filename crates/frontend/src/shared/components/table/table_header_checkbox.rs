//! Select-all checkbox for table headers, with the indeterminate state.

use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)] total: Signal<usize>,
    #[prop(into)] selected: Signal<usize>,
    /// Runs on every click; the owner decides between all and none.
    on_toggle: Callback<()>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();
    let all = move || total.get() > 0 && selected.get() == total.get();
    let partial = move || selected.get() > 0 && selected.get() < total.get();

    Effect::new(move |_| {
        let indeterminate = partial();
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=all
                on:change=move |_| on_toggle.run(())
            />
        </TableHeaderCell>
    }
}
