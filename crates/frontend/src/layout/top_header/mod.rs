//! Top bar: sidebar toggle, brand, operator, company and session actions.

use crate::domain::lookups::store::use_lookups;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::state::order_store::use_order_store;
use crate::system::auth::context::use_session;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let modal_stack = use_modal_stack();
    let orders = use_order_store();
    let lookups = use_lookups();

    let user_name = move || {
        session
            .user
            .get()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Operador".to_string())
    };
    let empresa_name = move || {
        session
            .empresa
            .get()
            .map(|e| e.display_name().to_string())
            .unwrap_or_default()
    };

    // Everything on screen belongs to the company being left.
    let leave_company = move || {
        modal_stack.clear();
        ctx.close_all();
        orders.reset();
        lookups.clear();
    };

    let change_empresa = move |_| {
        leave_company();
        session.change_empresa();
    };
    let logout = move |_| {
        leave_company();
        session.logout();
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Ocultar menu" } else { "Mostrar menu" }
                >
                    {move || if ctx.left_open.get() { icon("panel-left-close") } else { icon("panel-left-open") }}
                </button>
                <span class="top-header__title">"Televendas"</span>
            </div>

            <div class="top-header__actions">
                <button class="top-header__company" on:click=change_empresa title="Trocar empresa">
                    {icon("building")}
                    <span>{empresa_name}</span>
                </button>
                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_name}</span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Sair">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
