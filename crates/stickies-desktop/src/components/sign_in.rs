//! Sign-in / sign-up gate

use dioxus::prelude::*;

use stickies_core::auth::SignUpOutcome;

use crate::state::AppState;

/// Authentication gate shown until a session exists.
///
/// The identity protocol itself lives in the core client; this form only
/// collects credentials and surfaces the outcome.
#[component]
pub fn SignIn() -> Element {
    let mut state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let not_configured = state.identity.read().is_none();

    let mut sign_in = move || {
        if submitting() {
            return;
        }
        let Some(identity) = state.identity.read().clone() else {
            return;
        };
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        submitting.set(true);
        spawn(async move {
            match identity.sign_in(&email_value, &password_value).await {
                Ok(session) => state.session.set(Some(session)),
                Err(error) => notice.set(Some(error.to_string())),
            }
            submitting.set(false);
        });
    };

    let sign_up = move |_| {
        if submitting() {
            return;
        }
        let Some(identity) = state.identity.read().clone() else {
            return;
        };
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        submitting.set(true);
        spawn(async move {
            match identity.sign_up(&email_value, &password_value).await {
                Ok(SignUpOutcome::SignedIn(session)) => state.session.set(Some(session)),
                Ok(SignUpOutcome::ConfirmationRequired) => notice.set(Some(
                    "Check your inbox to confirm your account, then sign in.".to_string(),
                )),
                Err(error) => notice.set(Some(error.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "sign-in",
            style: "
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
                background: #f3f4f6;
            ",

            div {
                style: "
                    background: #ffffff;
                    border-radius: 8px;
                    box-shadow: 0 2px 8px rgba(0,0,0,0.2);
                    padding: 32px;
                    width: 320px;
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                ",

                div {
                    style: "font-weight: 600; font-size: 18px; text-align: center;",
                    "Sign in to Stickies"
                }

                if not_configured {
                    div {
                        style: "color: #dc2626; font-size: 13px;",
                        "Identity service is not configured. Set STICKIES_IDENTITY_URL and STICKIES_IDENTITY_CLIENT_KEY."
                    }
                }

                input {
                    placeholder: "Enter your email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Enter your password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            sign_in();
                        }
                    },
                }

                if let Some(message) = notice() {
                    div {
                        style: "color: #b45309; font-size: 13px;",
                        "{message}"
                    }
                }

                button {
                    style: "
                        background: #2563eb;
                        color: #ffffff;
                        border: none;
                        border-radius: 4px;
                        padding: 8px;
                        cursor: pointer;
                    ",
                    disabled: submitting() || not_configured,
                    onclick: move |_| sign_in(),
                    "Sign In"
                }
                button {
                    style: "
                        background: transparent;
                        border: 1px solid #9ca3af;
                        border-radius: 4px;
                        padding: 8px;
                        cursor: pointer;
                    ",
                    disabled: submitting() || not_configured,
                    onclick: sign_up,
                    "Create a new account"
                }
            }
        }
    }
}
