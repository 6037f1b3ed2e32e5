//! Short-lived notices shown in a corner stack (saved, deleted, failures).

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        match kind {
            NoticeKind::Success => log::info!("{}", text),
            NoticeKind::Error => log::warn!("{}", text),
        }
        self.notices.update(|n| n.push(Notice { id, kind, text }));

        let notices = self.notices;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            notices.try_update(|n| n.retain(|x| x.id != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|x| x.id != id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided in context")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="notification-host">
            <For
                each=move || notifier.notices.get()
                key=|n| n.id
                children=move |notice| {
                    let intent = match notice.kind {
                        NoticeKind::Success => MessageBarIntent::Success,
                        NoticeKind::Error => MessageBarIntent::Error,
                    };
                    let id = notice.id;
                    view! {
                        <div class="notification-host__item" on:click=move |_| notifier.dismiss(id)>
                            <MessageBar intent=intent>{notice.text}</MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
