use crate::domain::a004_pedido::api::{get_order, save_order};
use crate::shared::api_client::ApiClient;
use crate::shared::date_utils::today;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a003_produto::aggregate::Product;
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::composition::{
    add_line, apply_line_edit, compute_totals, ordered_lines, remove_line, LineItem, Totals,
};
use contracts::domain::a004_pedido::payload::{
    duplicate_order, generate_origin_tag, validate_order, OrderForm,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn id_text(id: i64) -> String {
    if id > 0 {
        id.to_string()
    } else {
        String::new()
    }
}

#[derive(Clone)]
pub struct OrderDetailsViewModel {
    pub form: RwSignal<OrderForm>,
    pub lines: RwSignal<Vec<LineItem>>,
    /// Backend id once the order exists
    pub order_id: RwSignal<Option<i64>>,
    pub numero: RwSignal<String>,
    pub status: RwSignal<&'static str>,
    pub locked: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    client: ApiClient,
}

impl OrderDetailsViewModel {
    pub fn new(client: ApiClient) -> Self {
        let empresa_id = client.empresa_id().unwrap_or_default();
        Self {
            form: RwSignal::new(OrderForm::new_for(empresa_id, today())),
            lines: RwSignal::new(Vec::new()),
            order_id: RwSignal::new(None),
            numero: RwSignal::new(String::new()),
            status: RwSignal::new("Novo"),
            locked: RwSignal::new(false),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            client,
        }
    }

    pub fn totals(&self) -> Totals {
        self.lines.with(|l| compute_totals(l))
    }

    pub fn is_edit_mode(&self) -> bool {
        self.order_id.get().is_some()
    }

    fn apply_order(&self, order: &Order) {
        let empresa_id = self.client.empresa_id().unwrap_or_default();
        self.form.set(OrderForm::from_order(order, empresa_id));
        self.lines.set(ordered_lines(&order.itens));
        self.order_id.set(Some(order.id));
        self.numero.set(order.numero.clone());
        self.status.set(order.status_label());
        self.locked.set(order.is_locked());
    }

    pub fn load(&self, id: i64) {
        let vm = self.clone();
        vm.loading.set(true);
        spawn_local(async move {
            match get_order(&vm.client, id).await {
                Ok(order) => vm.apply_order(&order),
                Err(e) => vm.error.set(Some(format!("Erro ao carregar: {}", e))),
            }
            vm.loading.set(false);
        });
    }

    /// Loads `source` and turns it into an unsaved draft dated today.
    pub fn load_copy(&self, source: i64) {
        let vm = self.clone();
        vm.loading.set(true);
        spawn_local(async move {
            match get_order(&vm.client, source).await {
                Ok(order) => {
                    let empresa_id = vm.client.empresa_id().unwrap_or_default();
                    let (form, lines) = duplicate_order(&order, empresa_id, today());
                    vm.form.set(form);
                    vm.lines.set(lines);
                    log::info!("order {} copied into a draft", source);
                }
                Err(e) => vm.error.set(Some(format!("Erro ao copiar: {}", e))),
            }
            vm.loading.set(false);
        });
    }

    /// Fills the header from the chosen client; fields already chosen by the
    /// operator stay.
    pub fn set_client(&self, c: &Client) {
        self.form.update(|f| {
            f.cliente_id = id_text(c.id);
            f.cliente_nome = c.display_name().to_string();
            f.cidade_id = id_text(c.cidade_id);
            if f.representante_id.is_empty() {
                f.representante_id = id_text(c.representante_id);
            }
            if f.rota_id.is_empty() {
                f.rota_id = id_text(c.rota_id);
            }
            if f.segmento_id.is_empty() {
                f.segmento_id = id_text(c.segmento_id);
            }
        });
    }

    pub fn add_product(&self, product: &Product, quantidade: f64, desconto: f64) -> bool {
        let tabela = self.form.with_untracked(|f| f.tabela.clone());
        match add_line(Some(product), &tabela, quantidade, desconto) {
            Ok(line) => {
                self.lines.update(|l| l.push(line));
                self.error.set(None);
                true
            }
            Err(rejection) => {
                self.error.set(Some(rejection.message().to_string()));
                false
            }
        }
    }

    pub fn update_line(&self, index: usize, quantidade: f64, desconto: f64) {
        let current = self.lines.get_untracked();
        let (shown, rejection) = apply_line_edit(&current, index, quantidade, desconto);
        // Always re-set: the rows rebuild and the inputs show committed values.
        self.lines.set(shown);
        self.error.set(rejection.map(|r| r.message().to_string()));
    }

    pub fn remove_line(&self, index: usize) {
        let current = self.lines.get_untracked();
        self.lines.set(remove_line(&current, index));
    }

    pub fn save_command(&self, on_saved: Callback<Order>) {
        if self.locked.get_untracked() {
            self.error
                .set(Some("Pedido transmitido ou faturado não pode ser alterado".to_string()));
            return;
        }
        let lines = self.lines.get_untracked();
        if let Err(msg) = self.form.with_untracked(|f| validate_order(f, &lines)) {
            self.error.set(Some(msg.to_string()));
            return;
        }
        // The tag is fixed before the first attempt so a retry after a
        // transport error is recognised as the same order.
        self.form.update(|f| {
            if f.pedido_origem.is_none() {
                f.pedido_origem = Some(generate_origin_tag());
            }
        });

        let form = self.form.get_untracked();
        let id = self.order_id.get_untracked();
        let vm = self.clone();
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match save_order(&vm.client, id, &form, &lines).await {
                Ok(order) => {
                    log::info!("order {} saved ({} lines)", order.id, order.itens.len());
                    vm.apply_order(&order);
                    on_saved.run(order);
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            vm.saving.set(false);
        });
    }
}
