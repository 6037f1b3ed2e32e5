use super::view_model::ClientDetailsViewModel;
use crate::domain::a005_representante::api::list_representatives;
use crate::domain::lookups::ui::LookupSelect;
use crate::shared::api_client::ApiClient;
use crate::shared::icons::icon;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a002_cliente::form::ClientForm;
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::lookups::LookupKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

type Getter = fn(&ClientForm) -> String;
type Setter = fn(&mut ClientForm, String);

fn text_field(
    form: RwSignal<ClientForm>,
    label: &'static str,
    get: Getter,
    set: Setter,
    maxlength: Option<u32>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                type="text"
                class="form__input"
                maxlength=maxlength.map(|m| m.to_string())
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </div>
    }
}

#[component]
pub fn ClientDetails(
    #[prop(optional)] id: Option<i64>,
    on_saved: Callback<Client>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let client = ApiClient::from_context();
    let vm = ClientDetailsViewModel::new(client.clone());
    vm.load_if_needed(id);
    let form = vm.form;
    let loading = vm.loading;

    let (representatives, set_representatives) = signal::<Vec<Representative>>(Vec::new());
    spawn_local(async move {
        match list_representatives(&client).await {
            Ok(list) => set_representatives.set(list),
            Err(e) => log::warn!("representatives not loaded: {}", e),
        }
    });

    let title = {
        let vm = vm.clone();
        move || if vm.is_edit_mode() { "Editar cliente" } else { "Novo cliente" }
    };

    view! {
        <div class="details-container client-details">
            <div class="details-header">
                <h3>{title}</h3>
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </div>

            {
                let error = vm.error;
                move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })
            }

            <div class="details-form details-form--grid">
                <div class="form__group">
                    <label class="form__label">"CNPJ / CPF"</label>
                    <input
                        type="text"
                        class="form__input"
                        maxlength="18"
                        prop:value=move || form.with(|f| f.documento.clone())
                        on:input={
                            let vm = vm.clone();
                            move |ev| vm.set_document(event_target_value(&ev))
                        }
                    />
                    {
                        let status = vm.cnpj_status;
                        move || status.get().map(|s| view! { <small class="form__hint">{s}</small> })
                    }
                </div>
                {text_field(form, "Código", |f| f.codigo.clone(), |f, v| f.codigo = v, Some(20))}
                {text_field(form, "Razão social", |f| f.razao_social.clone(), |f, v| f.razao_social = v, None)}
                {text_field(form, "Nome fantasia", |f| f.nome_fantasia.clone(), |f, v| f.nome_fantasia = v, None)}
                {text_field(form, "Inscrição estadual", |f| f.inscricao_estadual.clone(), |f, v| f.inscricao_estadual = v, Some(20))}
                {text_field(form, "E-mail", |f| f.email.clone(), |f, v| f.email = v, None)}
                {text_field(form, "Telefone", |f| f.telefone.clone(), |f, v| f.telefone = v, Some(20))}
                {text_field(form, "CEP", |f| f.cep.clone(), |f, v| f.cep = v, Some(9))}
                {text_field(form, "Logradouro", |f| f.logradouro.clone(), |f, v| f.logradouro = v, None)}
                {text_field(form, "Número", |f| f.numero.clone(), |f, v| f.numero = v, Some(10))}
                {text_field(form, "Complemento", |f| f.complemento.clone(), |f, v| f.complemento = v, None)}
                {text_field(form, "Bairro", |f| f.bairro.clone(), |f, v| f.bairro = v, None)}
                {text_field(form, "Cidade", |f| f.cidade.clone(), |f, v| f.cidade = v, None)}
                {text_field(form, "UF", |f| f.uf.clone(), |f, v| f.uf = v.to_uppercase(), Some(2))}
                {text_field(form, "Limite de crédito", |f| f.limite_credito.clone(), |f, v| f.limite_credito = v, Some(16))}

                <div class="form__group">
                    <label class="form__label">"Rota"</label>
                    <LookupSelect
                        kind=LookupKind::Rota
                        value=Signal::derive(move || form.with(|f| f.rota_id.clone()))
                        on_change=Callback::new(move |v| form.update(|f| f.rota_id = v))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Segmento"</label>
                    <LookupSelect
                        kind=LookupKind::Segmento
                        value=Signal::derive(move || form.with(|f| f.segmento_id.clone()))
                        on_change=Callback::new(move |v| form.update(|f| f.segmento_id = v))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Representante"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.with(|f| f.representante_id.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.representante_id = value);
                        }
                    >
                        <option value="">"Selecione"</option>
                        {move || {
                            let current = form.with(|f| f.representante_id.clone());
                            representatives.get().into_iter().map(|r| {
                                let value = r.id.to_string();
                                let selected = value == current;
                                view! { <option value=value selected=selected>{r.label()}</option> }
                            }).collect_view()
                        }}
                    </select>
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive({
                        let saving = vm.saving;
                        move || saving.get()
                    })
                    on_click={
                        let vm = vm.clone();
                        move |_| vm.save_command(on_saved)
                    }
                >
                    {icon("save")}
                    " Salvar"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Cancelar"
                </Button>
            </div>
        </div>
    }
}
