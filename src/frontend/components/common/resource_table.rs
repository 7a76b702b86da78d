//! Generic list screen for one resource: table, create/edit form, delete.

use crate::backend::api::{Record, ResourceKind};
use crate::backend::utils::runtime;
use crate::frontend::services::context::use_services;
use crate::frontend::services::hooks::use_fetch_data;
use dioxus::prelude::*;
use serde_json::Value;

/// What the form below the table is doing.
#[derive(Debug, Clone, PartialEq)]
enum FormMode {
    Hidden,
    Create,
    Edit(String),
}

#[component]
pub fn ResourcePage(kind: ResourceKind) -> Element {
    let services = use_services();
    let fetch = use_fetch_data::<Value>(kind.list_endpoint());
    let state = fetch.state();
    let page = kind.normalize(state.data.clone());

    let mut form_mode = use_signal(|| FormMode::Hidden);
    let mut draft = use_signal(String::new);
    let mut action_error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = {
        let client = services.client.clone();
        let fetch = fetch.clone();
        move |_: MouseEvent| {
            let body = match serde_json::from_str::<Value>(&draft.read()) {
                Ok(body @ Value::Object(_)) => body,
                Ok(_) => {
                    action_error.set(Some("Enter a JSON object".to_string()));
                    return;
                }
                Err(e) => {
                    action_error.set(Some(format!("Invalid JSON: {e}")));
                    return;
                }
            };

            let mode = form_mode();
            let client = client.clone();
            let fetch = fetch.clone();
            busy.set(true);
            action_error.set(None);
            spawn(async move {
                let result = runtime::run(async move {
                    match mode {
                        FormMode::Edit(id) => client.update(kind, &id, &body).await,
                        _ => client.create(kind, &body).await,
                    }
                })
                .await;
                busy.set(false);
                match result {
                    Ok(Ok(_)) => {
                        form_mode.set(FormMode::Hidden);
                        draft.set(String::new());
                        fetch.refetch();
                    }
                    Ok(Err(e)) => action_error.set(Some(e.to_string())),
                    Err(e) => action_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let columns = kind.columns();
    let label = kind.label();
    let empty_message = format!("No {} yet.", label.to_lowercase());
    let form_title = match form_mode() {
        FormMode::Edit(id) => format!("Edit {id}"),
        _ => format!("New {label}"),
    };
    let rows: Vec<(String, Vec<String>, Record)> = page
        .items
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let key = record.id.clone().unwrap_or_else(|| index.to_string());
            let cells = columns.iter().map(|column| record.display(column)).collect();
            (key, cells, record.clone())
        })
        .collect();
    let pagination = page.total_pages.map(|total_pages| {
        format!(
            "Page {} of {total_pages}, {} total",
            page.page.unwrap_or(1),
            page.total
        )
    });

    rsx! {
        div { class: "resource-toolbar",
            h2 { "{label}" }
            div {
                button {
                    class: "button button-secondary",
                    disabled: state.is_loading,
                    onclick: {
                        let fetch = fetch.clone();
                        move |_| fetch.refetch()
                    },
                    if state.is_loading { "Loading..." } else { "Refresh" }
                }
                " "
                button {
                    class: "button",
                    onclick: move |_| {
                        draft.set("{\n}".to_string());
                        action_error.set(None);
                        form_mode.set(FormMode::Create);
                    },
                    "New"
                }
            }
        }

        if let Some(error) = state.error.as_ref() {
            div { class: "error-message", "{error}" }
        }
        if let Some(error) = action_error() {
            div { class: "error-message", "{error}" }
        }

        if form_mode() != FormMode::Hidden {
            div { class: "form create-form",
                h3 { "{form_title}" }
                textarea {
                    value: "{draft}",
                    oninput: move |e| draft.set(e.value()),
                }
                div {
                    button {
                        class: "button",
                        disabled: busy(),
                        onclick: submit,
                        if busy() { "Saving..." } else { "Save" }
                    }
                    " "
                    button {
                        class: "button button-secondary",
                        onclick: move |_| form_mode.set(FormMode::Hidden),
                        "Cancel"
                    }
                }
            }
        }

        if page.is_empty() && !state.is_loading && state.error.is_none() {
            div { class: "status-message", "{empty_message}" }
        } else {
            table { class: "resource-table",
                thead {
                    tr {
                        for column in columns.iter() {
                            th { key: "{column}", "{column}" }
                        }
                        th {}
                    }
                }
                tbody {
                    for (key, cells, record) in rows {
                        tr { key: "{key}",
                            for cell in cells {
                                td { "{cell}" }
                            }
                            td {
                                RowActions {
                                    kind,
                                    record,
                                    on_edit: move |record: Record| {
                                        if let Some(id) = record.id.clone() {
                                            let text = serde_json::to_string_pretty(&record.fields)
                                                .unwrap_or_default();
                                            draft.set(text);
                                            action_error.set(None);
                                            form_mode.set(FormMode::Edit(id));
                                        }
                                    },
                                    on_deleted: {
                                        let fetch = fetch.clone();
                                        move |_| fetch.refetch()
                                    },
                                    on_error: move |message: String| action_error.set(Some(message)),
                                }
                            }
                        }
                    }
                }
            }
            if let Some(pagination) = pagination {
                div { class: "pagination", "{pagination}" }
            }
        }
    }
}

#[component]
fn RowActions(
    kind: ResourceKind,
    record: Record,
    on_edit: EventHandler<Record>,
    on_deleted: EventHandler<()>,
    on_error: EventHandler<String>,
) -> Element {
    let services = use_services();
    let mut deleting = use_signal(|| false);
    let has_id = record.id.is_some();

    let edit_target = record.clone();
    let delete = move |_: MouseEvent| {
        let client = services.client.clone();
        let record = record.clone();
        deleting.set(true);
        spawn(async move {
            let result = runtime::run(async move { client.delete_record(kind, &record).await }).await;
            deleting.set(false);
            match result {
                Ok(Ok(_)) => on_deleted.call(()),
                Ok(Err(e)) => on_error.call(e.to_string()),
                Err(e) => on_error.call(e.to_string()),
            }
        });
    };

    rsx! {
        button {
            class: "button button-secondary",
            disabled: !has_id,
            onclick: move |_| on_edit.call(edit_target.clone()),
            "Edit"
        }
        " "
        button {
            class: "button button-danger",
            disabled: !has_id || deleting(),
            onclick: delete,
            if deleting() { "Deleting..." } else { "Delete" }
        }
    }
}
