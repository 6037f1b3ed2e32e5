use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::guard::SessionGate;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Restores the active tab from ?active=... once per mount.
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

/// Every screen of the console needs a token and a selected company.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <SessionGate require_empresa=true>
            <MainLayout />
        </SessionGate>
    }
}
