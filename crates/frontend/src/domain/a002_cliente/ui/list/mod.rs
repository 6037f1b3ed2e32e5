use crate::domain::a002_cliente::api::{list_clients, ClientQuery};
use crate::domain::a002_cliente::ui::details::ClientDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::TabRoute;
use crate::shared::api_client::ApiClient;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::format_brl;
use crate::shared::export::{export_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::superseding::Superseding;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a002_cliente::document::format_document;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const PAGE_LIMIT: usize = 200;

struct ClientRow<'a>(&'a Client);

impl CsvExportable for ClientRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["Código", "Razão social", "Nome fantasia", "CNPJ/CPF", "Cidade", "Telefone", "E-mail"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let c = self.0;
        vec![
            c.codigo.clone(),
            c.razao_social.clone(),
            c.nome_fantasia.clone(),
            format_document(&c.documento),
            c.city_label(),
            c.telefone.clone(),
            c.email.clone(),
        ]
    }
}

#[component]
pub fn ClientList() -> impl IntoView {
    let client = ApiClient::from_context();
    let tabs = use_app_context();
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let requests = Superseding::new();

    let search = RwSignal::new(String::new());
    let (items, set_items) = signal::<Vec<Client>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    // Latest keystroke wins; older responses are dropped on arrival.
    let fetch = move |debounce: bool| {
        let client = client.clone();
        let token = requests.begin("clientes");
        spawn_local(async move {
            if debounce {
                TimeoutFuture::new(client.config().ui.search_debounce_ms).await;
                if !requests.is_current("clientes", token) {
                    return;
                }
            }
            set_loading.set(true);
            let query = ClientQuery::search(&search.get_untracked(), PAGE_LIMIT);
            let result = list_clients(&client, &query).await;
            if !requests.is_current("clientes", token) {
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
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f(false));

    let open_details = move |id: Option<i64>| {
        modal_stack.push_with_frame(
            Some("max-width: min(960px, 95vw); width: min(960px, 95vw);".to_string()),
            Some("client-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new({
                    let handle = handle.clone();
                    move |saved: Client| {
                        handle.close();
                        notifier.success(format!("Cliente {} salvo", saved.display_name()));
                        fetch.with_value(|f| f(false));
                    }
                });
                let on_cancel = Callback::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                match id {
                    Some(id) => view! {
                        <ClientDetails id=id on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                    None => view! {
                        <ClientDetails on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                }
            },
        );
    };

    let open_route = move |route: TabRoute| tabs.open_tab(&route.key(), &route.label());

    let export = move |_| {
        let rows = items.get_untracked();
        let rows: Vec<ClientRow> = rows.iter().map(ClientRow).collect();
        if let Err(e) = export_csv(&rows, "clientes.csv") {
            notifier.error(e);
        }
    };

    view! {
        <PageFrame page_id="a002_cliente--list" category=PAGE_CAT_LIST>
            <PageHeader title="Clientes">
                <input
                    type="search"
                    class="form__input page__search"
                    placeholder="Nome, código ou CNPJ"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        fetch.with_value(|f| f(true));
                    }
                />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")}
                    " Novo cliente"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.with_value(|f| f(false))>
                    {icon("refresh")}
                    " Atualizar"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=export>
                    {icon("download")}
                    " CSV"
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
                            <TableHeaderCell min_width=80.0>"Código"</TableHeaderCell>
                            <TableHeaderCell min_width=260.0>"Cliente"</TableHeaderCell>
                            <TableHeaderCell min_width=150.0>"CNPJ/CPF"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Cidade"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Limite"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Situação"</TableHeaderCell>
                            <TableHeaderCell min_width=180.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|c| {
                            let id = c.id;
                            let name = c.display_name().to_string();
                            let situacao = if !c.ativo {
                                "Inativo"
                            } else if c.bloqueado {
                                "Bloqueado"
                            } else {
                                "Ativo"
                            };
                            let row_class = if c.can_order() { "" } else { "table__row--muted" };
                            let codigo = c.codigo.clone();
                            let razao_social = c.razao_social.clone();
                            let documento = format_document(&c.documento);
                            let city = c.city_label();
                            let limite = format_brl(c.limite_credito);
                            view! {
                                <TableRow class=row_class>
                                    <TableCell>{codigo}</TableCell>
                                    <TableCell>
                                        <a href="#" class="table__link" on:click=move |ev| {
                                            ev.prevent_default();
                                            open_details(Some(id));
                                        }>{name}</a>
                                        <div class="table__sub">{razao_social}</div>
                                    </TableCell>
                                    <TableCell>{documento}</TableCell>
                                    <TableCell>{city}</TableCell>
                                    <TableCell class="text-right">{limite}</TableCell>
                                    <TableCell>{situacao}</TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| open_route(TabRoute::Receivables(id))
                                        >
                                            {icon("payments")}
                                            " Títulos"
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| open_route(TabRoute::Purchases(id))
                                        >
                                            {icon("history")}
                                            " Compras"
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                    <p class="page__empty">"Nenhum cliente encontrado."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
