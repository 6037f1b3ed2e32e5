use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_client::ApiClient;
use crate::system::auth::{api, context::use_session};
use contracts::system::auth::LoginRequest;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let session = use_session();
    let client = ApiClient::from_context();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = LoginRequest {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        if let Err(message) = request.validate() {
            set_error_message.set(Some(message.to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let base = client.base();
        spawn_local(async move {
            match api::login(&base, request.username, request.password).await {
                Ok(response) => {
                    // The gate switches to company selection on its own.
                    session.login(response);
                }
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Televendas"</h1>
                <h2>"Acesso ao sistema"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Usuário"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
