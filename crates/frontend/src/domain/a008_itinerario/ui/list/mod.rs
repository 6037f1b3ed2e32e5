use crate::domain::a005_representante::api::list_representatives;
use crate::domain::a008_itinerario::api::{delete_itinerary, list_itineraries};
use crate::domain::a008_itinerario::ui::details::ItineraryDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::TabRoute;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::superseding::Superseding;
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::a008_itinerario::aggregate::{Itinerary, Visit};
use contracts::shared::normalize::coerce_id;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ItineraryList() -> impl IntoView {
    let client = ApiClient::from_context();
    let tabs = use_app_context();
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let requests = Superseding::new();

    let representative = RwSignal::new(String::new());
    let (representatives, set_representatives) = signal::<Vec<Representative>>(Vec::new());
    let (items, set_items) = signal::<Vec<Itinerary>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = {
        let client = client.clone();
        move || {
            let representante_id = coerce_id(&representative.get_untracked());
            if representante_id <= 0 {
                requests.cancel("itinerarios");
                set_items.set(Vec::new());
                return;
            }
            let client = client.clone();
            let token = requests.begin("itinerarios");
            set_loading.set(true);
            spawn_local(async move {
                let result = list_itineraries(&client, representante_id).await;
                if !requests.is_current("itinerarios", token) {
                    return;
                }
                match result {
                    Ok(list) => {
                        set_items.set(list);
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        }
    };
    let fetch = StoredValue::new(fetch);

    {
        let client = client.clone();
        spawn_local(async move {
            match list_representatives(&client).await {
                Ok(list) => {
                    // A single representative needs no choice.
                    if let [only] = list.as_slice() {
                        representative.set(only.id.to_string());
                        fetch.with_value(|f| f());
                    }
                    set_representatives.set(list);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    }

    let open_new = move |_| {
        let preselected = Some(coerce_id(&representative.get_untracked())).filter(|id| *id > 0);
        modal_stack.push_with_frame(
            Some("max-width: min(820px, 95vw); width: min(820px, 95vw);".to_string()),
            Some("itinerary-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new({
                    let handle = handle.clone();
                    move |saved: Itinerary| {
                        handle.close();
                        notifier.success(format!("Itinerário {} criado", saved.descricao));
                        fetch.with_value(|f| f());
                    }
                });
                let on_cancel = Callback::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                match preselected {
                    Some(id) => view! {
                        <ItineraryDetails representante_id=id on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                    None => view! {
                        <ItineraryDetails on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                }
            },
        );
    };

    let remove = move |itinerary: Itinerary| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Excluir o itinerário \"{}\"?", itinerary.descricao))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let client = client.clone();
        spawn_local(async move {
            match delete_itinerary(&client, itinerary.id).await {
                Ok(()) => {
                    set_items.update(|list| list.retain(|i| i.id != itinerary.id));
                    notifier.success("Itinerário excluído");
                }
                Err(e) => notifier.error(e.to_string()),
            }
        });
    };
    let remove = StoredValue::new(remove);

    let open_history = move |visit: &Visit| {
        let route = TabRoute::Purchases(visit.cliente_id);
        tabs.open_tab(&route.key(), &route.label());
    };

    view! {
        <PageFrame page_id="a008_itinerario--list" category=PAGE_CAT_LIST>
            <PageHeader title="Itinerários">
                <select
                    class="form__select"
                    prop:value=move || representative.get()
                    on:change=move |ev| {
                        representative.set(event_target_value(&ev));
                        fetch.with_value(|f| f());
                    }
                >
                    <option value="">"Representante"</option>
                    {move || representatives.get().into_iter().map(|r| view! {
                        <option value=r.id.to_string()>{r.label()}</option>
                    }).collect_view()}
                </select>
                <Button appearance=ButtonAppearance::Primary on_click=open_new>
                    {icon("plus")}
                    " Novo itinerário"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.with_value(|f| f())>
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small label="Carregando..." />
                </Show>
                <Show when=move || representative.with(|r| r.is_empty())>
                    <p class="page__empty">"Selecione um representante."</p>
                </Show>

                <div class="itinerary-grid">
                    {move || items.get().into_iter().map(|it| {
                        let pending = it.pending_visits();
                        let total = it.visitas.len();
                        let for_delete = it.clone();
                        view! {
                            <div class="itinerary-card">
                                <div class="itinerary-card__header">
                                    <strong>{it.descricao.clone()}</strong>
                                    <span class="badge">{it.weekday_label()}</span>
                                    {(!it.data.is_empty()).then(|| view! {
                                        <small>{format_date(&it.data)}</small>
                                    })}
                                    <button
                                        class="button button--icon"
                                        title="Excluir"
                                        on:click=move |_| remove.with_value(|f| f(for_delete.clone()))
                                    >
                                        {icon("delete")}
                                    </button>
                                </div>
                                <small>{format!("{} visita(s), {} pendente(s)", total, pending)}</small>
                                <ol class="visit-list">
                                    {it.visitas.iter().map(|v| {
                                        let visit = v.clone();
                                        view! {
                                            <li class="visit-list__item" class:visit-list__item--done=v.visitado>
                                                <a href="#" on:click=move |ev| {
                                                    ev.prevent_default();
                                                    open_history(&visit);
                                                }>{v.cliente_nome.clone()}</a>
                                                <small>{v.cidade.clone()}</small>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ol>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </div>
        </PageFrame>
    }
}
