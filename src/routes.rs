use dioxus::prelude::*;

use crate::components::register::RegistrationPage;
use crate::state::AUTH_STATE;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},

    #[route("/login")]
    Login {},

    // The invitation token rides the link from the recruitment email;
    // a bare /register lands here with an empty token.
    #[route("/register?:token")]
    Register { token: String },
}

// Route handler components
#[component]
fn Home() -> Element {
    if AUTH_STATE.read().is_authenticated() {
        rsx! { crate::HomePage {} }
    } else {
        rsx! { crate::LoginPage {} }
    }
}

#[component]
fn Login() -> Element {
    if AUTH_STATE.read().is_authenticated() {
        rsx! { crate::HomePage {} }
    } else {
        rsx! { crate::LoginPage {} }
    }
}

#[component]
fn Register(token: String) -> Element {
    rsx! {
        RegistrationPage { token }
    }
}
