use crate::domain::a001_empresa::api;
use crate::shared::api_client::ApiClient;
use crate::system::auth::context::use_session;
use contracts::domain::a001_empresa::aggregate::Empresa;
use contracts::domain::a002_cliente::document::format_document;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Company selection, shown after login until a company is chosen.
#[component]
pub fn EmpresaSelectPage() -> impl IntoView {
    let session = use_session();
    let client = ApiClient::from_context();
    let (items, set_items) = signal::<Vec<Empresa>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match api::list_empresas(&client).await {
            Ok(list) => {
                // A single company needs no choice.
                if let [only] = list.as_slice() {
                    session.select_empresa(only.clone());
                }
                set_items.set(list);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    let user_name = move || {
        session
            .user
            .get()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="login-container">
            <div class="login-box empresa-select">
                <h1>"Televendas"</h1>
                <h2>{move || format!("Olá, {}. Selecione a empresa", user_name())}</h2>

                {move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}

                <Show when=move || loading.get()>
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner size=SpinnerSize::Small />
                        <span>"Carregando empresas..."</span>
                    </Flex>
                </Show>

                <Show when=move || !loading.get() && error.get().is_none() && items.get().is_empty()>
                    <p>"Nenhuma empresa disponível para este usuário."</p>
                </Show>

                <div class="empresa-select__list">
                    {move || items.get().into_iter().map(|empresa| {
                        let label = empresa.display_name().to_string();
                        let cnpj = format_document(&empresa.cnpj);
                        view! {
                            <button
                                class="empresa-select__item"
                                on:click=move |_| session.select_empresa(empresa.clone())
                            >
                                <strong>{label}</strong>
                                <span>{cnpj}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>

                <button class="btn-secondary" on:click=move |_| session.logout()>
                    "Sair"
                </button>
            </div>
        </div>
    }
}
