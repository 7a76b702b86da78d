//! Compose and send email or push notifications.

use crate::backend::api::{EmailDraft, PushDraft};
use crate::backend::utils::runtime;
use crate::frontend::services::context::use_services;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Email,
    Push,
}

/// Splits a comma- or newline-separated recipient list.
fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn SendNotification() -> Element {
    let services = use_services();
    let mut channel = use_signal(|| Channel::Email);
    let mut title = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut recipients = use_signal(String::new);
    let mut status = use_signal(|| None::<Result<String, String>>);
    let mut sending = use_signal(|| false);

    let send = move |e: FormEvent| {
        e.prevent_default();
        if title.read().trim().is_empty() || message.read().trim().is_empty() {
            status.set(Some(Err("Title and message are required".to_string())));
            return;
        }

        let client = services.client.clone();
        let target = channel();
        let title_value = title.read().trim().to_string();
        let message_value = message.read().clone();
        let recipients_value = parse_recipients(&recipients.read());

        sending.set(true);
        status.set(None);
        spawn(async move {
            let result = runtime::run(async move {
                match target {
                    Channel::Email => {
                        client
                            .send_email(&EmailDraft {
                                subject: title_value,
                                message: message_value,
                                recipients: recipients_value,
                            })
                            .await
                    }
                    Channel::Push => {
                        client
                            .send_push(&PushDraft {
                                title: title_value,
                                message: message_value,
                            })
                            .await
                    }
                }
            })
            .await;
            sending.set(false);
            match result {
                Ok(Ok(_)) => {
                    title.set(String::new());
                    message.set(String::new());
                    recipients.set(String::new());
                    status.set(Some(Ok("Notification sent".to_string())));
                }
                Ok(Err(e)) => status.set(Some(Err(e.to_string()))),
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
        });
    };

    let is_email = channel() == Channel::Email;

    rsx! {
        h2 { "Send notification" }
        form { class: "form", onsubmit: send,
            select {
                value: if is_email { "email" } else { "push" },
                onchange: move |e| {
                    channel.set(if e.value() == "push" { Channel::Push } else { Channel::Email });
                },
                option { value: "email", "Email" }
                option { value: "push", "Push" }
            }
            input {
                r#type: "text",
                placeholder: if is_email { "Subject" } else { "Title" },
                value: "{title}",
                oninput: move |e| title.set(e.value()),
            }
            textarea {
                placeholder: "Message",
                value: "{message}",
                oninput: move |e| message.set(e.value()),
            }
            if is_email {
                textarea {
                    placeholder: "Recipients (comma separated, empty for all customers)",
                    value: "{recipients}",
                    oninput: move |e| recipients.set(e.value()),
                }
            }
            match status() {
                Some(Ok(text)) => rsx! { div { class: "status-message", "{text}" } },
                Some(Err(text)) => rsx! { div { class: "error-message", "{text}" } },
                None => rsx! {},
            }
            button {
                class: "button",
                r#type: "submit",
                disabled: sending(),
                if sending() { "Sending..." } else { "Send" }
            }
        }
    }
}
