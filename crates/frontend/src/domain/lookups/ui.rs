use super::store::use_lookups;
use crate::shared::api_client::ApiClient;
use contracts::domain::lookups::LookupKind;
use leptos::prelude::*;

/// `<select>` over one lookup kind. The value is the item id as text; an
/// empty value means "not chosen".
#[component]
pub fn LookupSelect(
    kind: LookupKind,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    /// Shown for the empty option, defaults to "Selecione".
    #[prop(optional)]
    placeholder: Option<&'static str>,
) -> impl IntoView {
    let lookups = use_lookups();
    lookups.ensure(&ApiClient::from_context(), kind);
    let placeholder = placeholder.unwrap_or("Selecione");

    view! {
        <select
            class="form__select"
            prop:value=move || value.get()
            prop:disabled=move || disabled.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            {move || {
                let current = value.get();
                lookups.items(kind).into_iter().map(|item| {
                    let selected = item.id == current;
                    view! {
                        <option value=item.id.clone() selected=selected>{item.label()}</option>
                    }
                }).collect_view()
            }}
        </select>
    }
}
