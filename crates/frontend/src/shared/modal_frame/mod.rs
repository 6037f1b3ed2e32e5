use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus surface. Content brings its own header and actions, so a
/// details screen looks the same in a modal and in a tab.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    #[prop(optional)] z_index: Option<i32>,
    #[prop(optional, into)] modal_class: String,
    #[prop(optional, into)] modal_style: String,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    let pressed_on_overlay = RwSignal::new(false);

    let on_overlay = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    // Press and release must both land on the overlay; a text selection
    // dragged out of the surface does not close the modal.
    let handle_mouse_down = move |ev: ev::MouseEvent| pressed_on_overlay.set(on_overlay(&ev));
    let handle_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && on_overlay(&ev);
        pressed_on_overlay.set(false);
        if close {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_class = if modal_class.is_empty() {
        "modal".to_string()
    } else {
        format!("modal {modal_class}")
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_mouse_down
            on:click=handle_click
        >
            <div
                class=surface_class
                style=format!("position: relative; {modal_style}")
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}
