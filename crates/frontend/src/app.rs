use crate::domain::lookups::store::LookupStore;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::{load_config, ConfigContext};
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::notify::{NotificationHost, Notifier};
use crate::shared::state::order_store::OrderStore;
use crate::system::auth::context::SessionContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    // Runtime configuration: built-in defaults until /televendas.toml arrives.
    let config = ConfigContext::new();
    provide_context(config);
    spawn_local(async move {
        config.set(load_config().await);
    });

    // Session restored from browser storage; every service reads it from context.
    provide_context(SessionContext::restore());

    // Tabs, the order list/selection and cached lookups live for the whole app.
    provide_context(AppGlobalContext::new());
    provide_context(OrderStore::new());
    provide_context(LookupStore::new());
    provide_context(ModalStackService::new());
    provide_context(Notifier::new());

    view! {
        <AppRoutes />
        <ModalHost />
        <NotificationHost />
    }
}
