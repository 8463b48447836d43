//! Task Panel Component
//!
//! Tasks of the selected list. Backed by its own `TaskListController`, which
//! is disposed when the panel unmounts so late responses are dropped.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use listapro_client::{ChangeNotifier, SnapshotListener, TaskListController};

use super::{EditableText, NewEntryForm};
use crate::api::Api;
use crate::context::use_app_context;
use crate::models::{Task, TaskId, TaskList};
use crate::store::{store_list_name, use_app_store};

#[component]
pub fn TaskPanel(list: TaskList) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list_id = list.id;

    let tasks = RwSignal::new(list.tasks.clone());
    let loading = RwSignal::new(false);

    let on_snapshot: SnapshotListener<Task> = Rc::new(move |snapshot| {
        tasks.set(snapshot.items.clone());
        loading.set(snapshot.loading);
    });
    let on_lists_change: ChangeNotifier = Rc::new(move || ctx.reload_lists());
    let controller = TaskListController::new(ctx.api(), &list)
        .with_listener(on_snapshot)
        .with_lists_change(on_lists_change);

    let token = controller.cancellation_token();
    on_cleanup(move || token.cancel());

    let controller: StoredValue<Rc<TaskListController<Api>>, LocalStorage> =
        StoredValue::new_local(Rc::new(controller));

    let initial = controller.get_value();
    spawn_local(async move {
        let _ = initial.load().await;
    });

    let create_task = Callback::new(move |text: String| {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.create_task(&text).await;
        });
    });
    let toggle_task = Callback::new(move |id: TaskId| {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.toggle_task(id).await;
        });
    });
    let rename_task = Callback::new(move |(id, text): (TaskId, String)| {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.rename_task(id, &text).await;
        });
    });
    let delete_task = Callback::new(move |id: TaskId| {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.delete_task(id).await;
        });
    });

    let progress = move || {
        tasks.with(|tasks| {
            let done = tasks.iter().filter(|task| task.is_completed).count();
            format!("{}/{} concluídas", done, tasks.len())
        })
    };

    view! {
        <section class="task-panel">
            <header class="task-panel-header">
                <h1>{move || store_list_name(&store, list_id).unwrap_or_default()}</h1>
                <span class="task-progress">{progress}</span>
            </header>

            <NewEntryForm
                class="new-task-form"
                placeholder="Adicionar nova tarefa..."
                button_label="Adicionar"
                on_submit=create_task
            />

            <Show when=move || loading.get() && tasks.with(Vec::is_empty)>
                <p class="task-message">"Carregando tarefas..."</p>
            </Show>
            <Show when=move || !loading.get() && tasks.with(Vec::is_empty)>
                <p class="task-message">"Nenhuma tarefa ainda. Adicione uma acima!"</p>
            </Show>

            <ul class="task-list">
                <For
                    each=move || tasks.get()
                    key=|task| (task.id, task.text.clone(), task.is_completed)
                    children=move |task| {
                        view! {
                            <TaskRow
                                task=task
                                on_toggle=toggle_task
                                on_rename=rename_task
                                on_delete=delete_task
                            />
                        }
                    }
                />
            </ul>
        </section>
    }
}

#[component]
fn TaskRow(
    task: Task,
    on_toggle: Callback<TaskId>,
    on_rename: Callback<(TaskId, String)>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let id = task.id;
    let completed = task.is_completed;

    view! {
        <li class=if completed { "task-item completed" } else { "task-item" }>
            <input
                type="checkbox"
                prop:checked=completed
                on:change=move |_| on_toggle.run(id)
            />
            <EditableText
                text=task.text
                class="task-text"
                on_commit=Callback::new(move |text: String| on_rename.run((id, text)))
            />
            <button class="delete-btn" title="Excluir tarefa" on:click=move |_| on_delete.run(id)>
                "×"
            </button>
        </li>
    }
}
