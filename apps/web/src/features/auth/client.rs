use crate::app_lib::{AppError, get_optional_json_with_credentials};
use navgate::CurrentUser;

/// Fetches the current session using cookie-based auth.
/// Returns `None` when the session is missing or expired.
pub async fn fetch_session(session_url: &str) -> Result<Option<CurrentUser>, AppError> {
    get_optional_json_with_credentials(session_url).await
}
