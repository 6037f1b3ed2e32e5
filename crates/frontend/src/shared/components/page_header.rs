use leptos::prelude::*;

/// Header of list and report pages: title, optional subtitle, actions.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// Usually a record count or the client being consulted.
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {move || subtitle.get().filter(|s| !s.is_empty()).map(|s| view! {
                    <div class="page__subtitle">{s}</div>
                })}
            </div>
            <div class="page__header-actions">{children()}</div>
        </div>
    }
}
