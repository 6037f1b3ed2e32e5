use crate::domain::a005_representante::api::list_representatives;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a005_representante::aggregate::Representative;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn matches(r: &Representative, needle: &str) -> bool {
    needle.is_empty()
        || r.nome.to_lowercase().contains(needle)
        || r.codigo.to_lowercase().contains(needle)
        || r.email.to_lowercase().contains(needle)
}

#[component]
pub fn RepresentativeList() -> impl IntoView {
    let client = ApiClient::from_context();
    let (items, set_items) = signal::<Vec<Representative>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let filter = RwSignal::new(String::new());
    let show_inactive = RwSignal::new(false);

    let fetch = move || {
        let client = client.clone();
        set_loading.set(true);
        spawn_local(async move {
            match list_representatives(&client).await {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f());

    // The list is small; filtering stays local.
    let visible = Memo::new(move |_| {
        let needle = filter.get().trim().to_lowercase();
        let inactive = show_inactive.get();
        items.with(|list| {
            list.iter()
                .filter(|r| (inactive || r.ativo) && matches(r, &needle))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <PageFrame page_id="a005_representante--list" category=PAGE_CAT_LIST>
            <PageHeader title="Representantes">
                <input
                    type="search"
                    class="form__input page__search"
                    placeholder="Filtrar"
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
                <label class="form__inline-check">
                    <input
                        type="checkbox"
                        prop:checked=move || show_inactive.get()
                        on:change=move |ev| show_inactive.set(event_target_checked(&ev))
                    />
                    " Mostrar inativos"
                </label>
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

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=90.0>"Código"</TableHeaderCell>
                            <TableHeaderCell min_width=240.0>"Nome"</TableHeaderCell>
                            <TableHeaderCell min_width=200.0>"E-mail"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"Telefone"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Situação"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|r| view! {
                            <TableRow class=if r.ativo { "" } else { "table__row--muted" }>
                                <TableCell>{r.codigo}</TableCell>
                                <TableCell>{r.nome}</TableCell>
                                <TableCell>{r.email}</TableCell>
                                <TableCell>{r.telefone}</TableCell>
                                <TableCell>{if r.ativo { "Ativo" } else { "Inativo" }}</TableCell>
                            </TableRow>
                        }).collect_view()}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && visible.with(|v| v.is_empty())>
                    <p class="page__empty">"Nenhum representante."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
