//! New Entry Form Component
//!
//! Single text input that submits on Enter or on its button.

use leptos::prelude::*;

#[component]
pub fn NewEntryForm(
    #[prop(into)] class: String,
    #[prop(into)] placeholder: String,
    #[prop(into)] button_label: String,
    /// Receives the raw text; blank input is filtered by the controllers
    #[prop(into)]
    on_submit: Callback<String>,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = text.get_untracked();
        if value.trim().is_empty() {
            return;
        }
        set_text.set(String::new());
        on_submit.run(value);
    };

    view! {
        <form class=class on:submit=submit>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || text.get().trim().is_empty()>
                {button_label}
            </button>
        </form>
    }
}
