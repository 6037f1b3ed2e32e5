use crate::domain::a002_cliente::api::{get_client, lookup_cnpj, save_client};
use crate::shared::api_client::ApiClient;
use crate::shared::superseding::Superseding;
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a002_cliente::document::{is_valid_cnpj, only_digits};
use contracts::domain::a002_cliente::form::ClientForm;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const CNPJ_KEY: &str = "cnpj";

#[derive(Clone)]
pub struct ClientDetailsViewModel {
    pub form: RwSignal<ClientForm>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    /// Status line under the document field while the registry answers.
    pub cnpj_status: RwSignal<Option<String>>,
    client: ApiClient,
    requests: Superseding,
}

impl ClientDetailsViewModel {
    pub fn new(client: ApiClient) -> Self {
        Self {
            form: RwSignal::new(ClientForm::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            loading: RwSignal::new(false),
            cnpj_status: RwSignal::new(None),
            client,
            requests: Superseding::new(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.is_edit_mode())
    }

    pub fn load_if_needed(&self, id: Option<i64>) {
        let Some(id) = id else { return };
        let vm = self.clone();
        vm.loading.set(true);
        spawn_local(async move {
            match get_client(&vm.client, id).await {
                Ok(c) => vm.form.set(ClientForm::from_client(&c)),
                Err(e) => vm.error.set(Some(format!("Erro ao carregar: {}", e))),
            }
            vm.loading.set(false);
        });
    }

    /// Updates the document; a complete, valid CNPJ schedules a registry
    /// lookup. Typing again supersedes the pending one.
    pub fn set_document(&self, value: String) {
        self.form.update(|f| f.documento = value.clone());
        let digits = only_digits(&value);
        if digits.len() != 14 || !is_valid_cnpj(&digits) {
            self.requests.cancel(CNPJ_KEY);
            self.cnpj_status.set(None);
            return;
        }

        let token = self.requests.begin(CNPJ_KEY);
        let vm = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(vm.client.config().cnpj.debounce_ms).await;
            if !vm.requests.is_current(CNPJ_KEY, token) {
                return;
            }
            vm.cnpj_status.set(Some("Consultando CNPJ...".to_string()));
            let result = lookup_cnpj(&vm.client, &digits).await;
            if !vm.requests.is_current(CNPJ_KEY, token) {
                return;
            }
            match result {
                Ok(found) => {
                    let mut filled = 0;
                    vm.form.update(|f| filled = found.apply_to(f));
                    vm.cnpj_status.set(Some(match filled {
                        0 => "CNPJ consultado, nenhum campo alterado".to_string(),
                        n => format!("{} campo(s) preenchido(s) pela consulta", n),
                    }));
                }
                Err(e) => {
                    log::info!("cnpj {} not enriched: {}", digits, e);
                    vm.cnpj_status.set(Some(format!("Consulta indisponível: {}", e)));
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<Client>) {
        let current = self.form.get_untracked();
        if let Err(msg) = current.validate() {
            self.error.set(Some(msg.to_string()));
            return;
        }
        // A late registry answer must not overwrite what is being saved.
        self.requests.cancel(CNPJ_KEY);

        let vm = self.clone();
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match save_client(&vm.client, &current).await {
                Ok(saved) => {
                    log::info!("client {} saved", saved.id);
                    on_saved.run(saved);
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            vm.saving.set(false);
        });
    }
}
