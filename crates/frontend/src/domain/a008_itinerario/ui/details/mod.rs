use crate::domain::a002_cliente::ui::picker::ClientPicker;
use crate::domain::a005_representante::api::list_representatives;
use crate::domain::a008_itinerario::api::create_itinerary;
use crate::shared::api_client::ApiClient;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::a008_itinerario::aggregate::{Itinerary, ItineraryForm, WEEKDAYS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// New itinerary: representative, weekday and the ordered client visits.
#[component]
pub fn ItineraryDetails(
    /// Preselected representative id
    #[prop(optional)]
    representante_id: Option<i64>,
    on_saved: Callback<Itinerary>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let client = ApiClient::from_context();
    let modal_stack = use_modal_stack();
    let form = RwSignal::new(ItineraryForm {
        representante_id: representante_id.map(|id| id.to_string()).unwrap_or_default(),
        dia_semana: 1,
        ..Default::default()
    });
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let (representatives, set_representatives) = signal::<Vec<Representative>>(Vec::new());
    {
        let client = client.clone();
        spawn_local(async move {
            match list_representatives(&client).await {
                Ok(list) => set_representatives.set(list.into_iter().filter(|r| r.ativo).collect()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }

    let add_client = move |_| {
        modal_stack.push_with_frame(
            Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
            None,
            move |handle| {
                let on_pick = Callback::new({
                    let handle = handle.clone();
                    move |c: Client| {
                        let mut added = false;
                        form.update(|f| added = f.push_client(c.id, c.display_name().to_string()));
                        if !added {
                            error.set(Some(format!("{} já está no itinerário", c.display_name())));
                        }
                        handle.close();
                    }
                });
                let on_cancel = Callback::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! { <ClientPicker on_pick=on_pick on_cancel=on_cancel /> }.into_any()
            },
        );
    };

    let save = move |_| {
        let current = form.get_untracked();
        if let Err(msg) = current.validate() {
            error.set(Some(msg.to_string()));
            return;
        }
        let client = client.clone();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match create_itinerary(&client, &current).await {
                Ok(saved) => {
                    log::info!("itinerary {} created", saved.id);
                    on_saved.run(saved);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="details-container itinerary-details">
            <div class="details-header">
                <h3>"Novo itinerário"</h3>
            </div>
            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <div class="details-form details-form--grid">
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
                <div class="form__group">
                    <label class="form__label">"Descrição"</label>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || form.with(|f| f.descricao.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.descricao = value);
                        }
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Dia da semana"</label>
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            let day = event_target_value(&ev).parse::<u8>().unwrap_or(0);
                            form.update(|f| f.dia_semana = day);
                        }
                    >
                        {WEEKDAYS.iter().enumerate().map(|(i, label)| {
                            let day = i as u8;
                            view! {
                                <option value=day.to_string() selected=move || form.with(|f| f.dia_semana == day)>
                                    {*label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Data (opcional)"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || form.with(|f| f.data.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.data = value);
                        }
                    />
                </div>
            </div>

            <div class="details-section">
                <div class="details-section__header">
                    <h4>"Visitas"</h4>
                    <Button size=ButtonSize::Small on_click=add_client>
                        {icon("plus")}
                        " Adicionar cliente"
                    </Button>
                </div>
                <ol class="visit-list">
                    {move || form.with(|f| f.clientes.clone()).into_iter().enumerate().map(|(index, (_, nome))| view! {
                        <li class="visit-list__item">
                            <span>{nome}</span>
                            <button
                                class="button button--icon"
                                title="Subir"
                                disabled=index == 0
                                on:click=move |_| form.update(|f| f.move_up(index))
                            >
                                {icon("arrow-up")}
                            </button>
                            <button
                                class="button button--icon"
                                title="Remover"
                                on:click=move |_| form.update(|f| f.remove_client(index))
                            >
                                {icon("delete")}
                            </button>
                        </li>
                    }).collect_view()}
                </ol>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=save
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
