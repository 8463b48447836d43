//! Empty State Component
//!
//! Home page content when there is nothing to show in the task panel.

use leptos::prelude::*;

use super::NewEntryForm;
use crate::context::use_app_context;

/// No lists exist yet: invite the user to create the first one
#[component]
pub fn NoListsState() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="empty-state">
            <h2>"Bem-vindo ao ListaPro"</h2>
            <p>"Você ainda não tem nenhuma lista. Crie a primeira para começar."</p>
            <NewEntryForm
                class="new-list-form large"
                placeholder="Nome da lista"
                button_label="Criar lista"
                on_submit=Callback::new(move |name: String| ctx.create_list(name))
            />
        </div>
    }
}

/// Lists exist but none is selected
#[component]
pub fn SelectListPrompt() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Selecione uma lista"</h2>
            <p>"Escolha uma lista na barra lateral para ver suas tarefas."</p>
        </div>
    }
}
