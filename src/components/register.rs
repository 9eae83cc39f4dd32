use dioxus::prelude::*;

use crate::api;
use crate::components::common::{ErrorMessage, LoadingSpinner};
use crate::routes::Route;
use crate::state::registration::{Field, RegistrationScreen, ScreenState};

/// Invitation-gated registration screen. The token arrives via the route;
/// the screen validates it once on entry, then shows exactly one of four
/// views: validating spinner, invalid-invitation panel, the form, or the
/// success panel.
#[component]
pub fn RegistrationPage(token: String) -> Element {
    let mut screen = use_signal(move || RegistrationScreen::new(token));

    // Validate the invitation once on mount. If the screen is torn down
    // before the call resolves, the spawned task is dropped with it.
    use_effect(move || {
        spawn(async move {
            let request = screen.write().validation_request();
            let Some(request) = request else { return };

            let result = api::auth::validate_invitation(&request).await;
            if let Err(err) = &result {
                tracing::warn!("Invitation validation failed: {}", err);
            }
            screen.write().resolve_validation(result);
        });
    });

    let state = screen.read().state().clone();

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100 py-8",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md",
                // Logo
                div { class: "text-center mb-6",
                    span { class: "text-5xl", "\u{1F4BC}" }
                    h1 { class: "text-2xl font-bold mt-4", "Recruit Portal" }
                }

                match state {
                    ScreenState::Validating => rsx! { ValidatingView {} },
                    ScreenState::TokenInvalid(reason) => rsx! { InvalidInvitationView { reason } },
                    ScreenState::Success => rsx! { SuccessView {} },
                    ScreenState::FormActive | ScreenState::Submitting => rsx! {
                        InvitationForm { screen }
                    },
                }
            }
        }
    }
}

#[component]
fn ValidatingView() -> Element {
    rsx! {
        div { class: "text-center",
            LoadingSpinner {}
            p { class: "text-gray-500", "Validating your invitation..." }
        }
    }
}

#[component]
fn InvalidInvitationView(reason: String) -> Element {
    rsx! {
        div { class: "text-center",
            ErrorMessage { message: reason }
            p { class: "text-sm text-gray-500 mt-4",
                "If you believe this is a mistake, ask your recruiter for a new invitation link."
            }
            Link {
                to: Route::Login {},
                class: "inline-block mt-6 px-6 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 font-medium",
                "Go to Login"
            }
        }
    }
}

#[component]
fn SuccessView() -> Element {
    rsx! {
        div { class: "text-center",
            div { class: "bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded mb-4",
                p { class: "font-medium", "Registration complete!" }
                p { class: "text-sm mt-1", "Your account is ready. Sign in to get started." }
            }
            Link {
                to: Route::Login {},
                class: "inline-block mt-4 px-6 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 font-medium",
                "Sign In"
            }
        }
    }
}

#[component]
fn InvitationForm(screen: Signal<RegistrationScreen>) -> Element {
    let mut screen = screen;

    let state = screen.read();
    let invitation = state.invitation().cloned();
    let form = state.form().clone();
    let submit_error = state.submit_error().map(str::to_string);
    let is_submitting = state.is_submitting();
    let first_name_error = state.error_for(Field::FirstName);
    let last_name_error = state.error_for(Field::LastName);
    let password_error = state.error_for(Field::Password);
    let confirm_password_error = state.error_for(Field::ConfirmPassword);
    drop(state);

    let submit = move |e: FormEvent| {
        e.prevent_default();

        let request = screen.write().begin_submit();
        let Some(request) = request else { return };

        spawn(async move {
            let result = api::auth::complete_registration(&request).await;
            if let Err(err) = &result {
                tracing::warn!("Registration submission failed: {}", err);
            }
            screen.write().resolve_submit(result);
        });
    };

    rsx! {
        // Who the invitation is for
        if let Some(info) = invitation {
            p { class: "text-gray-500 text-center mb-6",
                "You are registering as {info.role} with email {info.email}"
            }
        }

        // Submission error
        if let Some(err) = submit_error {
            div { class: "mb-4",
                ErrorMessage { message: err }
            }
        }

        form {
            onsubmit: submit,

            // First name field
            div { class: "mb-4",
                label { class: "block text-sm font-medium text-gray-700 mb-1",
                    "First Name ",
                    span { class: "text-red-500", "*" }
                }
                input {
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                    r#type: "text",
                    placeholder: "Your first name",
                    value: "{form.first_name}",
                    oninput: move |e| screen.write().update_field(Field::FirstName, e.value()),
                    onfocusout: move |_| screen.write().mark_touched(Field::FirstName),
                    disabled: is_submitting,
                }
                if let Some(message) = first_name_error {
                    p { class: "text-red-600 text-sm mt-1", "{message}" }
                }
            }

            // Last name field
            div { class: "mb-4",
                label { class: "block text-sm font-medium text-gray-700 mb-1",
                    "Last Name ",
                    span { class: "text-red-500", "*" }
                }
                input {
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                    r#type: "text",
                    placeholder: "Your last name",
                    value: "{form.last_name}",
                    oninput: move |e| screen.write().update_field(Field::LastName, e.value()),
                    onfocusout: move |_| screen.write().mark_touched(Field::LastName),
                    disabled: is_submitting,
                }
                if let Some(message) = last_name_error {
                    p { class: "text-red-600 text-sm mt-1", "{message}" }
                }
            }

            // Phone field (optional)
            div { class: "mb-4",
                label { class: "block text-sm font-medium text-gray-700 mb-1", "Phone" }
                input {
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                    r#type: "tel",
                    placeholder: "Your phone number (optional)",
                    value: "{form.phone}",
                    oninput: move |e| screen.write().update_field(Field::Phone, e.value()),
                    onfocusout: move |_| screen.write().mark_touched(Field::Phone),
                    disabled: is_submitting,
                }
            }

            // Password field
            div { class: "mb-4",
                label { class: "block text-sm font-medium text-gray-700 mb-1",
                    "Password ",
                    span { class: "text-red-500", "*" }
                }
                input {
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                    r#type: "password",
                    placeholder: "At least 6 characters",
                    value: "{form.password}",
                    oninput: move |e| screen.write().update_field(Field::Password, e.value()),
                    onfocusout: move |_| screen.write().mark_touched(Field::Password),
                    disabled: is_submitting,
                }
                if let Some(message) = password_error {
                    p { class: "text-red-600 text-sm mt-1", "{message}" }
                }
            }

            // Confirm password field
            div { class: "mb-6",
                label { class: "block text-sm font-medium text-gray-700 mb-1",
                    "Confirm Password ",
                    span { class: "text-red-500", "*" }
                }
                input {
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500",
                    r#type: "password",
                    placeholder: "Re-enter your password",
                    value: "{form.confirm_password}",
                    oninput: move |e| screen.write().update_field(Field::ConfirmPassword, e.value()),
                    onfocusout: move |_| screen.write().mark_touched(Field::ConfirmPassword),
                    disabled: is_submitting,
                }
                if let Some(message) = confirm_password_error {
                    p { class: "text-red-600 text-sm mt-1", "{message}" }
                }
            }

            // Submit button
            button {
                class: "w-full py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 font-medium disabled:opacity-50 transition-colors",
                r#type: "submit",
                disabled: is_submitting,
                if is_submitting { "Creating account..." } else { "Complete Registration" }
            }
        }

        // Link to login page
        div { class: "mt-6 text-center text-sm text-gray-600",
            "Already have an account? "
            Link {
                to: Route::Login {},
                class: "text-blue-600 hover:text-blue-700 font-medium",
                "Sign in"
            }
        }
    }
}
