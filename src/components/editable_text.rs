//! Editable Text Component
//!
//! Double-click to edit in place. Enter or blur commits, Escape cancels.

use leptos::html::Input;
use leptos::prelude::*;

#[component]
pub fn EditableText(
    #[prop(into)] text: String,
    #[prop(into)] class: String,
    /// Called only when the trimmed text actually changed
    #[prop(into)]
    on_commit: Callback<String>,
) -> impl IntoView {
    let original = StoredValue::new(text);
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let input_ref = NodeRef::<Input>::new();

    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let commit = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let value = draft.get_untracked();
        if value.trim() != original.get_value().trim() {
            on_commit.run(value);
        }
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || {
                view! {
                    <span
                        class=class.clone()
                        title="Clique duas vezes para editar"
                        on:dblclick=move |ev| {
                            ev.stop_propagation();
                            set_draft.set(original.get_value());
                            set_editing.set(true);
                        }
                    >
                        {original.get_value()}
                    </span>
                }
            }
        >
            <input
                class="inline-edit"
                type="text"
                node_ref=input_ref
                prop:value=move || draft.get()
                on:click=|ev| ev.stop_propagation()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => {
                        ev.prevent_default();
                        commit();
                    }
                    "Escape" => set_editing.set(false),
                    _ => {}
                }
                on:blur=move |_| commit()
            />
        </Show>
    }
}
