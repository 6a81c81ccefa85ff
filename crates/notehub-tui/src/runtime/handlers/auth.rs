use notehub_core::api::ApiClient;
use notehub_core::api::auth::Registration;

use crate::events::UiEvent;

/// Exchanges credentials for a session.
pub async fn login(api: ApiClient, email: String, password: String) -> UiEvent {
    UiEvent::LoginFinished(api.login(&email, &password).await)
}

pub async fn register(api: ApiClient, registration: Registration) -> UiEvent {
    UiEvent::RegisterFinished(api.register(&registration).await)
}
