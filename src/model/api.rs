use serde::{Deserialize, Serialize};

/// Response body used for both error responses and confirmation messages.
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct MessageDto {
    pub message: String,
}
