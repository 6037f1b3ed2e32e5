use contracts::system::session::{guard, GuardDecision};
use leptos::prelude::*;

use super::context::use_session;
use crate::system::pages::empresa_select::EmpresaSelectPage;
use crate::system::pages::login::LoginPage;

/// Renders children only for a logged-in operator (and, when required, a
/// selected company); otherwise the login or company screen.
#[component]
pub fn SessionGate(
    #[prop(optional)] require_empresa: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let decision = Memo::new(move |_| guard(&session.snapshot(), require_empresa));

    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::RedirectLogin => view! { <LoginPage /> }.into_any(),
        GuardDecision::RedirectEmpresaSelect => view! { <EmpresaSelectPage /> }.into_any(),
    }
}
