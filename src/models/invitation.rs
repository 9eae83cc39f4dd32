use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateInvitationRequest {
    pub token: String,
}

/// Who the invitation was provisioned for. Populated once after a
/// successful token validation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationInfo {
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateInvitationResponse {
    pub valid: bool,
    #[serde(default)]
    pub data: Option<InvitationInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteRegistrationRequest {
    pub token: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub password: String,
    // Optional field, left off the wire entirely when not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRegistrationResponse {
    pub success: bool,
    pub message: String,
}
