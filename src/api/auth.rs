use crate::api::{api_client, ApiError};
use crate::models::{
    CompleteRegistrationRequest, CompleteRegistrationResponse, LoginRequest, LoginResponse,
    ValidateInvitationRequest, ValidateInvitationResponse,
};

pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = api_client().post("/api/auth/login", &request).await?;

    // Store the token for future requests
    api_client().set_token(Some(response.token.clone()));

    Ok(response)
}

pub async fn logout() {
    api_client().set_token(None);
}

/// Checks an invitation token with the identity service. The caller folds
/// any transport or parse failure into the same outcome as `valid = false`.
pub async fn validate_invitation(
    request: &ValidateInvitationRequest,
) -> Result<ValidateInvitationResponse, ApiError> {
    api_client()
        .post("/api/auth/validate-invitation", request)
        .await
}

pub async fn complete_registration(
    request: &CompleteRegistrationRequest,
) -> Result<CompleteRegistrationResponse, ApiError> {
    api_client()
        .post("/api/auth/complete-registration", request)
        .await
}
