//! Sidebar menu: order entry first, reference data below.

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::{new_order_route, tab_label_for_key, CLIENTS, ITINERARIES, ORDERS, PRODUCTS, REPRESENTATIVES};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    /// (tab key, icon)
    items: Vec<(&'static str, &'static str)>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "vendas",
            label: "Vendas",
            icon: "orders",
            items: vec![(ORDERS, "orders"), (CLIENTS, "customers")],
        },
        MenuGroup {
            id: "cadastros",
            label: "Cadastros",
            icon: "database",
            items: vec![(PRODUCTS, "products"), (REPRESENTATIVES, "users")],
        },
        MenuGroup {
            id: "roteiro",
            label: "Roteiro",
            icon: "route",
            items: vec![(ITINERARIES, "route")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let expanded_groups = RwSignal::new(vec!["vendas", "cadastros", "roteiro"]);

    let new_order = move |_| {
        let route = new_order_route();
        ctx.open_tab(&route.key(), &route.label());
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__item app-sidebar__item--primary" on:click=new_order>
                <div class="app-sidebar__item-content">
                    {icon("plus")}
                    <span>"Novo pedido"</span>
                </div>
            </div>

            {get_menu_groups().into_iter().map(|group| {
                let gid = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| expanded_groups.update(|items| {
                                if let Some(pos) = items.iter().position(|x| *x == gid) {
                                    items.remove(pos);
                                } else {
                                    items.push(gid);
                                }
                            })
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid)>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    let label_for_click = label.clone();
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, &label_for_click)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
