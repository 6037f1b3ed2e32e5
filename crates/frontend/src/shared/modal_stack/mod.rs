//! Стек модальных окон: client form, product picker, order details.
//!
//! Escape and overlay clicks close only the topmost entry.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type Builder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: Builder,
    modal_style: Option<String>,
    modal_class: Option<String>,
    can_close: Option<CloseGuard>,
}

impl ModalEntry {
    fn closable(&self) -> bool {
        self.can_close.as_ref().map(|f| f()).unwrap_or(true)
    }
}

/// Returned by the push methods; lets the modal content close itself.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    // Removal waits a tick so the DOM event that triggered it finishes
    // dispatching before its handler is dropped.
    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    fn push_entry(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        can_close: Option<CloseGuard>,
        builder: Builder,
    ) -> ModalHandle {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder,
                modal_style,
                modal_class,
                can_close,
            })
        });
        ModalHandle { id, svc: *self }
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(None, None, None, Arc::new(builder))
    }

    /// Push with style/class overrides for the modal surface.
    pub fn push_with_frame<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(modal_style, modal_class, None, Arc::new(builder))
    }

    /// Like `push_with_frame`; while `can_close` returns false, Escape and
    /// overlay clicks leave the modal open (a save in flight, for example).
    pub fn push_with_frame_guard<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        can_close: CloseGuard,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(modal_style, modal_class, Some(can_close), Arc::new(builder))
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    fn pop_deferred(&self) {
        self.defer(|svc| {
            svc.stack.update(|s| {
                s.pop();
            })
        });
    }

    /// Drops every modal; used when the company changes.
    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal_stack() -> ModalStackService {
    use_context::<ModalStackService>().expect("ModalStackService not provided in context")
}

/// Renders the stack. Mounted once at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modal_stack();

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if key != "Escape" {
                return;
            }
            let closable = svc
                .stack
                .with_untracked(|s| s.last().map(ModalEntry::closable));
            if closable == Some(true) {
                svc.pop_deferred();
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // Lives as long as the app.
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let z_index = 1000 + idx as i32;
                    let on_close = {
                        let entry = entry.clone();
                        Callback::new(move |_| {
                            if entry.closable() {
                                svc.close_deferred(entry.id);
                            }
                        })
                    };
                    let content = (entry.builder)(ModalHandle { id: entry.id, svc });
                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_style=entry.modal_style.clone().unwrap_or_default()
                            modal_class=entry.modal_class.clone().unwrap_or_default()
                        >
                            {content}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
