use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use google_sheets4::{hyper, hyper_rustls};
use thiserror::Error;

use crate::config::sheets_config::SpreadsheetConfig;

use super::http_client::HttpsClient;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read service account key")]
    ReadServiceAccountKey,
    #[error("Failed to build service account authenticator")]
    BuildAuthenticator,
}

pub async fn auth(
    config: &SpreadsheetConfig,
    client: HttpsClient,
) -> error_stack::Result<
    Authenticator<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>,
    AuthError,
> {
    let secret: oauth2::ServiceAccountKey =
        oauth2::read_service_account_key(config.priv_key.as_ref())
            .await
            .change_context(AuthError::ReadServiceAccountKey)
            .attach_printable_lazy(|| format!("key file: {}", config.priv_key))?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(AuthError::BuildAuthenticator)
}
