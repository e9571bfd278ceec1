//! Top bar with app title and sign-out

use dioxus::prelude::*;

use super::actions::sign_out;
use crate::state::AppState;

#[component]
pub fn HeaderBar() -> Element {
    let state = use_context::<AppState>();
    let email = state
        .session
        .read()
        .as_ref()
        .and_then(|session| session.user.email.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "header-bar",
            style: "
                background: #2563eb;
                color: #ffffff;
                padding: 12px 16px;
                display: flex;
                justify-content: space-between;
                align-items: center;
            ",

            div {
                style: "font-weight: 600; font-size: 18px;",
                "Stickies"
            }

            div {
                style: "display: flex; align-items: center; gap: 12px;",

                if !email.is_empty() {
                    span { style: "font-size: 13px; opacity: 0.85;", "{email}" }
                }

                button {
                    style: "
                        background: #ef4444;
                        color: #ffffff;
                        border: none;
                        border-radius: 4px;
                        padding: 6px 14px;
                        cursor: pointer;
                    ",
                    onclick: move |_| sign_out(&state),
                    "Sign Out"
                }
            }
        }
    }
}
