use super::view_model::OrderDetailsViewModel;
use crate::shared::components::table::{format_money, format_quantity, TableCellMoney};
use crate::shared::icons::icon;
use contracts::shared::normalize::parse_decimal;
use leptos::prelude::*;
use thaw::*;

/// Editable lines. Quantity and discount are committed on change; a
/// rejected value leaves the line as it was and shows the reason.
#[component]
pub fn OrderLines(vm: OrderDetailsViewModel) -> impl IntoView {
    let lines = vm.lines;
    let locked = vm.locked;

    view! {
        <Table class="order-lines">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=40.0>"#"</TableHeaderCell>
                    <TableHeaderCell min_width=90.0>"Código"</TableHeaderCell>
                    <TableHeaderCell min_width=260.0>"Produto"</TableHeaderCell>
                    <TableHeaderCell min_width=50.0>"Un."</TableHeaderCell>
                    <TableHeaderCell min_width=90.0>"Qtd."</TableHeaderCell>
                    <TableHeaderCell min_width=100.0>"Preço"</TableHeaderCell>
                    <TableHeaderCell min_width=80.0>"Desc. %"</TableHeaderCell>
                    <TableHeaderCell min_width=100.0>"Líquido"</TableHeaderCell>
                    <TableHeaderCell min_width=110.0>"Total"</TableHeaderCell>
                    <TableHeaderCell min_width=40.0>""</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {move || lines.get().into_iter().enumerate().map(|(index, line)| {
                    let vm_qty = vm.clone();
                    let vm_disc = vm.clone();
                    let vm_remove = vm.clone();
                    let quantidade = line.quantidade;
                    let desconto = line.desconto_percentual;
                    view! {
                        <TableRow>
                            <TableCell>{index + 1}</TableCell>
                            <TableCell>{line.produto_codigo.clone()}</TableCell>
                            <TableCell>{line.descricao.clone()}</TableCell>
                            <TableCell>{line.unidade.clone()}</TableCell>
                            <TableCell>
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    class="form__input form__input--number"
                                    prop:value=format_quantity(quantidade)
                                    prop:disabled=move || locked.get()
                                    on:change=move |ev| {
                                        let value = parse_decimal(&event_target_value(&ev)).unwrap_or(0.0);
                                        vm_qty.update_line(index, value, desconto);
                                    }
                                />
                            </TableCell>
                            <TableCellMoney value=Signal::stored(Some(line.preco)) />
                            <TableCell>
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    class="form__input form__input--number"
                                    prop:value=format_money(desconto)
                                    prop:disabled=move || locked.get()
                                    on:change=move |ev| {
                                        let value = parse_decimal(&event_target_value(&ev)).unwrap_or(0.0);
                                        vm_disc.update_line(index, quantidade, value);
                                    }
                                />
                            </TableCell>
                            <TableCellMoney value=Signal::stored(Some(line.liquido)) />
                            <TableCellMoney value=Signal::stored(Some(line.total)) bold=true />
                            <TableCell>
                                <Show when=move || !locked.get()>
                                    {
                                        let vm_remove = vm_remove.clone();
                                        view! {
                                            <button
                                                class="button button--icon"
                                                title="Remover item"
                                                on:click=move |_| vm_remove.remove_line(index)
                                            >
                                                {icon("delete")}
                                            </button>
                                        }
                                    }
                                </Show>
                            </TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>
        <Show when=move || lines.with(|l| l.is_empty())>
            <p class="page__empty">"Nenhum item. Use \"Adicionar produto\"."</p>
        </Show>
    }
}
