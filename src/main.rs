//! Recruit Portal - invitation-based registration front-end
//!
//! A Dioxus application for a recruitment portal: invited candidates land
//! on the registration screen via a tokenized link, complete their account,
//! and sign in. The identity/invitation backend is an external HTTP service
//! reached through the API client in `api`.

mod api;
mod components;
mod models;
mod routes;
mod state;

use dioxus::prelude::*;
use routes::Route;
use state::AUTH_STATE;

fn main() {
    // On wasm, just run the app
    #[cfg(target_arch = "wasm32")]
    {
        run_app();
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recruit_portal=info".parse().unwrap()))
            .init();

        // Load environment variables
        dotenvy::dotenv().ok();

        run_app();
    }
}

fn run_app() {
    // Get API URL - on wasm use window location, on native use env var
    #[cfg(target_arch = "wasm32")]
    let api_url = {
        // On web, use the same origin as the page (for same-origin API requests)
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string())
    };

    #[cfg(not(target_arch = "wasm32"))]
    let api_url = std::env::var("API_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    // Initialize API client
    api::init_api_client(&api_url);

    // Launch the Dioxus app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global styles
        style { {include_str!("../assets/styles.css")} }

        Router::<Route> {}
    }
}

#[component]
pub fn HomePage() -> Element {
    let auth_state = AUTH_STATE.read();
    let email = auth_state.email().unwrap_or("there").to_string();

    let logout = move |_| {
        spawn(async move {
            api::auth::logout().await;
            state::clear_auth();
        });
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md text-center",
                span { class: "text-5xl", "\u{1F4BC}" }
                h1 { class: "text-2xl font-bold mt-4", "Welcome, {email}" }
                p { class: "text-gray-500 mt-2", "You are signed in to Recruit Portal." }
                button {
                    class: "mt-6 px-4 py-2 text-gray-600 hover:bg-gray-100 rounded-lg border",
                    onclick: logout,
                    "Logout"
                }
            }
        }
    }
}

#[component]
pub fn LoginPage() -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let mut login = move |_| {
        let email_val = email();
        let pass = password();

        if email_val.is_empty() || pass.is_empty() {
            error.set(Some("Please enter email and password".to_string()));
            return;
        }

        is_loading.set(true);
        error.set(None);

        spawn(async move {
            match api::auth::login(&email_val, &pass).await {
                Ok(response) => {
                    state::set_auth(response.user, response.token);
                }
                Err(e) => {
                    error.set(Some(format!("Login failed: {}", e)));
                }
            }
            is_loading.set(false);
        });
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md",
                // Logo
                div { class: "text-center mb-8",
                    span { class: "text-5xl", "\u{1F4BC}" }
                    h1 { class: "text-2xl font-bold mt-4", "Recruit Portal" }
                    p { class: "text-gray-500", "Sign in to continue" }
                }

                // Error message
                if let Some(err) = error.read().as_ref() {
                    div { class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4",
                        "{err}"
                    }
                }

                // Form
                form {
                    onsubmit: move |e| {
                        e.prevent_default();
                        login(e);
                    },

                    div { class: "mb-4",
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Email" }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                            r#type: "email",
                            placeholder: "your.email@example.com",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                    }

                    div { class: "mb-6",
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Password" }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                            r#type: "password",
                            placeholder: "Enter your password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }
                    }

                    button {
                        class: "w-full py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 font-medium disabled:opacity-50",
                        r#type: "submit",
                        disabled: *is_loading.read(),
                        if *is_loading.read() { "Signing in..." } else { "Sign In" }
                    }
                }

                // Registration is invitation-only
                div { class: "mt-6 text-center text-sm text-gray-500",
                    "Accounts are created by invitation. Check your email for a registration link."
                }
            }
        }
    }
}
