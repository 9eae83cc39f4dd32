use crate::api::ApiError;
use crate::models::{
    CompleteRegistrationRequest, CompleteRegistrationResponse, InvitationInfo,
    ValidateInvitationRequest, ValidateInvitationResponse,
};

pub const MIN_PASSWORD_LEN: usize = 6;

const MSG_NO_TOKEN: &str = "No invitation token provided.";
const MSG_INVALID_LINK: &str = "Invalid or expired invitation link.";
const MSG_SUBMIT_FALLBACK: &str = "Failed to complete registration.";

/// The screen is always in exactly one of these states. `TokenInvalid` and
/// `Success` are terminal; the only way out is navigating back to login.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    Validating,
    TokenInvalid(String),
    FormActive,
    Submitting,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Phone,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Which fields the user has blurred at least once. Gates error display
/// only; validity for the submit gate ignores it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchedFields {
    first_name: bool,
    last_name: bool,
    phone: bool,
    password: bool,
    confirm_password: bool,
}

impl TouchedFields {
    fn get(&self, field: Field) -> bool {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Phone => self.phone,
            Field::Password => self.password,
            Field::ConfirmPassword => self.confirm_password,
        }
    }

    fn set(&mut self, field: Field) {
        match field {
            Field::FirstName => self.first_name = true,
            Field::LastName => self.last_name = true,
            Field::Phone => self.phone = true,
            Field::Password => self.password = true,
            Field::ConfirmPassword => self.confirm_password = true,
        }
    }

    fn mark_all_required(&mut self) {
        self.first_name = true;
        self.last_name = true;
        self.password = true;
        self.confirm_password = true;
    }
}

/// View-state machine for the invitation registration screen.
///
/// Holds no I/O: it emits the request payloads for the two remote calls and
/// consumes their results, so the whole lifecycle is testable without a
/// network. The component drives the async edges.
pub struct RegistrationScreen {
    token: String,
    state: ScreenState,
    invitation: Option<InvitationInfo>,
    form: RegistrationForm,
    touched: TouchedFields,
    submit_error: Option<String>,
}

impl RegistrationScreen {
    pub fn new(token: String) -> Self {
        RegistrationScreen {
            token,
            state: ScreenState::Validating,
            invitation: None,
            form: RegistrationForm::default(),
            touched: TouchedFields::default(),
            submit_error: None,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn invitation(&self) -> Option<&InvitationInfo> {
        self.invitation.as_ref()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ScreenState::Submitting
    }

    /// Called once on entry. Returns the payload for the remote validation
    /// call, or `None` when the route carried no token (the screen then goes
    /// straight to `TokenInvalid` without any network traffic).
    pub fn validation_request(&mut self) -> Option<ValidateInvitationRequest> {
        if self.token.trim().is_empty() {
            self.state = ScreenState::TokenInvalid(MSG_NO_TOKEN.to_string());
            return None;
        }
        Some(ValidateInvitationRequest {
            token: self.token.clone(),
        })
    }

    /// Network errors and `valid = false` are deliberately indistinguishable
    /// to the user; a stale link and an outage get the same message.
    pub fn resolve_validation(
        &mut self,
        result: Result<ValidateInvitationResponse, ApiError>,
    ) {
        match result {
            Ok(response) if response.valid => match response.data {
                Some(info) => {
                    self.invitation = Some(info);
                    self.state = ScreenState::FormActive;
                }
                None => {
                    self.state = ScreenState::TokenInvalid(MSG_INVALID_LINK.to_string());
                }
            },
            Ok(_) | Err(_) => {
                self.state = ScreenState::TokenInvalid(MSG_INVALID_LINK.to_string());
            }
        }
    }

    pub fn update_field(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.form.first_name = value,
            Field::LastName => self.form.last_name = value,
            Field::Phone => self.form.phone = value,
            Field::Password => self.form.password = value,
            Field::ConfirmPassword => self.form.confirm_password = value,
        }
    }

    pub fn mark_touched(&mut self, field: Field) {
        self.touched.set(field);
    }

    /// The error message for a field, shown only once the field is touched.
    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        if !self.touched.get(field) {
            return None;
        }
        self.rule_violation(field)
    }

    fn rule_violation(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::FirstName => self
                .form
                .first_name
                .trim()
                .is_empty()
                .then_some("First name is required"),
            Field::LastName => self
                .form
                .last_name
                .trim()
                .is_empty()
                .then_some("Last name is required"),
            Field::Password => (self.form.password.len() < MIN_PASSWORD_LEN)
                .then_some("Password must be at least 6 characters"),
            Field::ConfirmPassword => (self.form.confirm_password != self.form.password)
                .then_some("Passwords do not match"),
            // Phone is optional
            Field::Phone => None,
        }
    }

    /// Touched state gates display only; this is the submit gate.
    pub fn is_valid(&self) -> bool {
        [
            Field::FirstName,
            Field::LastName,
            Field::Password,
            Field::ConfirmPassword,
        ]
        .iter()
        .all(|field| self.rule_violation(*field).is_none())
    }

    /// Form submission. Marks every required field touched so outstanding
    /// errors become visible, then returns the completion payload if the
    /// form is valid, or `None` (no network call, no transition) otherwise.
    pub fn begin_submit(&mut self) -> Option<CompleteRegistrationRequest> {
        self.touched.mark_all_required();

        if self.state != ScreenState::FormActive {
            return None;
        }
        if !self.is_valid() || self.token.trim().is_empty() {
            return None;
        }

        self.submit_error = None;
        self.state = ScreenState::Submitting;

        let phone = self.form.phone.trim();
        Some(CompleteRegistrationRequest {
            token: self.token.clone(),
            first_name: self.form.first_name.trim().to_string(),
            last_name: self.form.last_name.trim().to_string(),
            password: self.form.password.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }

    /// Submission is best-effort and non-retrying: on failure the form stays
    /// active with a classified error and the user resubmits manually.
    pub fn resolve_submit(&mut self, result: Result<CompleteRegistrationResponse, ApiError>) {
        match result {
            Ok(response) if response.success => {
                self.state = ScreenState::Success;
            }
            Ok(response) => {
                self.submit_error = Some(classify_submit_error(&response.message));
                self.state = ScreenState::FormActive;
            }
            Err(e) => {
                self.submit_error = Some(classify_submit_error(&e.to_string()));
                self.state = ScreenState::FormActive;
            }
        }
    }
}

/// Maps the backend's free-text failure message to what the user sees.
///
/// Substring matching is fragile coupling to the backend's wording, but the
/// backend does not send structured error codes, so it lives in one place.
pub fn classify_submit_error(message: &str) -> String {
    if message.contains("already exists") {
        "An account with this email already exists".to_string()
    } else if message.contains("expired") {
        "This invitation has expired. Please request a new one.".to_string()
    } else if message.trim().is_empty() {
        MSG_SUBMIT_FALLBACK.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with_valid_invitation() -> RegistrationScreen {
        let mut screen = RegistrationScreen::new("abc".to_string());
        let request = screen.validation_request();
        assert!(request.is_some());
        screen.resolve_validation(Ok(ValidateInvitationResponse {
            valid: true,
            data: Some(InvitationInfo {
                email: "a@x.com".to_string(),
                role: "Pharmacist".to_string(),
            }),
        }));
        screen
    }

    fn fill_valid_form(screen: &mut RegistrationScreen) {
        screen.update_field(Field::FirstName, "John".to_string());
        screen.update_field(Field::LastName, "Smith".to_string());
        screen.update_field(Field::Password, "secret1".to_string());
        screen.update_field(Field::ConfirmPassword, "secret1".to_string());
    }

    #[test]
    fn missing_token_goes_terminal_without_remote_call() {
        let mut screen = RegistrationScreen::new(String::new());
        assert!(screen.validation_request().is_none());
        assert_eq!(
            *screen.state(),
            ScreenState::TokenInvalid("No invitation token provided.".to_string())
        );
    }

    #[test]
    fn whitespace_token_counts_as_missing() {
        let mut screen = RegistrationScreen::new("   ".to_string());
        assert!(screen.validation_request().is_none());
        assert!(matches!(screen.state(), ScreenState::TokenInvalid(_)));
    }

    #[test]
    fn valid_token_activates_form_with_invitation_info() {
        let screen = screen_with_valid_invitation();
        assert_eq!(*screen.state(), ScreenState::FormActive);
        let info = screen.invitation().unwrap();
        assert_eq!(info.email, "a@x.com");
        assert_eq!(info.role, "Pharmacist");
    }

    #[test]
    fn invalid_token_response_shows_generic_message() {
        let mut screen = RegistrationScreen::new("abc".to_string());
        screen.validation_request();
        screen.resolve_validation(Ok(ValidateInvitationResponse {
            valid: false,
            data: None,
        }));
        assert_eq!(
            *screen.state(),
            ScreenState::TokenInvalid("Invalid or expired invitation link.".to_string())
        );
    }

    #[test]
    fn validation_network_error_shows_same_generic_message() {
        let mut screen = RegistrationScreen::new("abc".to_string());
        screen.validation_request();
        screen.resolve_validation(Err(ApiError::Network("connection refused".to_string())));
        assert_eq!(
            *screen.state(),
            ScreenState::TokenInvalid("Invalid or expired invitation link.".to_string())
        );
    }

    #[test]
    fn valid_flag_without_payload_is_treated_as_invalid() {
        let mut screen = RegistrationScreen::new("abc".to_string());
        screen.validation_request();
        screen.resolve_validation(Ok(ValidateInvitationResponse {
            valid: true,
            data: None,
        }));
        assert!(matches!(screen.state(), ScreenState::TokenInvalid(_)));
    }

    #[test]
    fn untouched_field_shows_no_error() {
        let screen = screen_with_valid_invitation();
        assert_eq!(screen.error_for(Field::FirstName), None);
    }

    #[test]
    fn touched_empty_field_shows_error() {
        let mut screen = screen_with_valid_invitation();
        screen.mark_touched(Field::FirstName);
        assert_eq!(
            screen.error_for(Field::FirstName),
            Some("First name is required")
        );
    }

    #[test]
    fn touched_valid_field_shows_no_error() {
        let mut screen = screen_with_valid_invitation();
        screen.update_field(Field::FirstName, "John".to_string());
        screen.mark_touched(Field::FirstName);
        assert_eq!(screen.error_for(Field::FirstName), None);
    }

    #[test]
    fn short_password_and_mismatch_are_independent_errors() {
        let mut screen = screen_with_valid_invitation();
        screen.update_field(Field::Password, "abc".to_string());
        screen.update_field(Field::ConfirmPassword, "xyz".to_string());
        screen.mark_touched(Field::Password);
        screen.mark_touched(Field::ConfirmPassword);
        assert_eq!(
            screen.error_for(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(
            screen.error_for(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn phone_is_never_invalid() {
        let mut screen = screen_with_valid_invitation();
        screen.mark_touched(Field::Phone);
        assert_eq!(screen.error_for(Field::Phone), None);
    }

    #[test]
    fn submit_gate_blocks_invalid_form_and_marks_required_touched() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.update_field(Field::FirstName, String::new());

        assert!(screen.begin_submit().is_none());
        assert_eq!(*screen.state(), ScreenState::FormActive);
        // The aborted submit still surfaces every outstanding error
        assert_eq!(
            screen.error_for(Field::FirstName),
            Some("First name is required")
        );
        assert_eq!(screen.error_for(Field::LastName), None);
        assert_eq!(screen.error_for(Field::Password), None);
        assert_eq!(screen.error_for(Field::ConfirmPassword), None);
    }

    #[test]
    fn update_field_is_idempotent() {
        let mut screen = screen_with_valid_invitation();
        screen.update_field(Field::FirstName, "John".to_string());
        let once = screen.form().clone();
        screen.update_field(Field::FirstName, "John".to_string());
        assert_eq!(*screen.form(), once);
    }

    #[test]
    fn submit_builds_trimmed_request_and_omits_empty_phone() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.update_field(Field::FirstName, "  John ".to_string());
        screen.update_field(Field::Phone, "   ".to_string());

        let request = screen.begin_submit().expect("valid form submits");
        assert_eq!(*screen.state(), ScreenState::Submitting);
        assert_eq!(request.token, "abc");
        assert_eq!(request.first_name, "John");
        assert_eq!(request.last_name, "Smith");
        assert_eq!(request.password, "secret1");
        assert_eq!(request.phone, None);
    }

    #[test]
    fn submit_includes_trimmed_phone_when_present() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.update_field(Field::Phone, " 555-0100 ".to_string());

        let request = screen.begin_submit().unwrap();
        assert_eq!(request.phone, Some("555-0100".to_string()));
    }

    #[test]
    fn successful_submission_reaches_success_state() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.begin_submit().unwrap();
        screen.resolve_submit(Ok(CompleteRegistrationResponse {
            success: true,
            message: "Registration complete".to_string(),
        }));
        assert_eq!(*screen.state(), ScreenState::Success);
    }

    #[test]
    fn failed_submission_returns_to_form_with_classified_error() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.begin_submit().unwrap();
        screen.resolve_submit(Err(ApiError::Server(
            "Account already exists for this email".to_string(),
        )));
        assert_eq!(*screen.state(), ScreenState::FormActive);
        assert_eq!(
            screen.submit_error(),
            Some("An account with this email already exists")
        );
    }

    #[test]
    fn resubmit_clears_previous_error() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.begin_submit().unwrap();
        screen.resolve_submit(Err(ApiError::Network("timeout".to_string())));
        assert!(screen.submit_error().is_some());

        screen.begin_submit().unwrap();
        assert_eq!(screen.submit_error(), None);
        assert_eq!(*screen.state(), ScreenState::Submitting);
    }

    #[test]
    fn second_submit_while_in_flight_is_a_no_op() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        assert!(screen.begin_submit().is_some());
        assert!(screen.begin_submit().is_none());
        assert_eq!(*screen.state(), ScreenState::Submitting);
    }

    #[test]
    fn unsuccessful_response_body_is_classified_like_an_error() {
        let mut screen = screen_with_valid_invitation();
        fill_valid_form(&mut screen);
        screen.begin_submit().unwrap();
        screen.resolve_submit(Ok(CompleteRegistrationResponse {
            success: false,
            message: "invitation expired yesterday".to_string(),
        }));
        assert_eq!(*screen.state(), ScreenState::FormActive);
        assert_eq!(
            screen.submit_error(),
            Some("This invitation has expired. Please request a new one.")
        );
    }

    #[test]
    fn classify_matches_known_backend_phrases() {
        assert_eq!(
            classify_submit_error("user already exists"),
            "An account with this email already exists"
        );
        assert_eq!(
            classify_submit_error("token expired"),
            "This invitation has expired. Please request a new one."
        );
        assert_eq!(classify_submit_error(""), "Failed to complete registration.");
        assert_eq!(
            classify_submit_error("role quota reached"),
            "role quota reached"
        );
    }
}
