use crate::models::UserInfo;
use dioxus::prelude::*;

/// Global authentication state
pub static AUTH_STATE: GlobalSignal<AuthState> = Signal::global(AuthState::default);

#[derive(Clone, Default)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

pub fn set_auth(user: UserInfo, token: String) {
    let mut state = AUTH_STATE.write();
    state.user = Some(user);
    state.token = Some(token);
}

pub fn clear_auth() {
    let mut state = AUTH_STATE.write();
    state.user = None;
    state.token = None;
}
