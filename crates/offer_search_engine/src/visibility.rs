use offer_search_core::{OfferId, VisibilityAction};
use search_logging::{search_info, search_warn};
use serde::Serialize;

use crate::fetch::{build_client, map_reqwest_error, read_capped_body};
use crate::{first_error_message, FailureKind, FetchError, FetchSettings, VisibilityError};

#[async_trait::async_trait]
pub trait VisibilityService: Send + Sync {
    async fn apply(&self, offer_id: &OfferId, action: &VisibilityAction)
        -> Result<(), VisibilityError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisableBody<'a> {
    admin_reason: &'a str,
}

/// Calls the offer hide/enable/disable endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestVisibilityService {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestVisibilityService {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: FetchSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }
}

#[async_trait::async_trait]
impl VisibilityService for ReqwestVisibilityService {
    async fn apply(
        &self,
        offer_id: &OfferId,
        action: &VisibilityAction,
    ) -> Result<(), VisibilityError> {
        let (path, request) = match action {
            VisibilityAction::Hide => {
                let path = format!("offers/{offer_id}/hide");
                let url = self.settings.endpoint(&path).map_err(from_fetch_error)?;
                (path, self.client.post(url))
            }
            VisibilityAction::Enable => {
                let path = format!("offers/{offer_id}/enable");
                let url = self.settings.endpoint(&path).map_err(from_fetch_error)?;
                (path, self.client.put(url))
            }
            VisibilityAction::Disable { admin_reason } => {
                let path = format!("offers/{offer_id}/disable");
                let url = self.settings.endpoint(&path).map_err(from_fetch_error)?;
                let body = DisableBody {
                    admin_reason: admin_reason.as_str(),
                };
                (path, self.client.post(url).json(&body))
            }
        };

        let response = request
            .send()
            .await
            .map_err(|err| from_fetch_error(map_reqwest_error(err)))?;
        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still reports the status.
            let backend_message = read_capped_body(response, self.settings.max_bytes)
                .await
                .ok()
                .and_then(|body| first_error_message(&body));
            search_warn!(
                "{} failed with {}: {:?}",
                path,
                status,
                backend_message.as_deref()
            );
            return Err(VisibilityError {
                kind: FailureKind::BadResponse(status.as_u16()),
                backend_message,
            });
        }
        search_info!("{} succeeded", path);
        Ok(())
    }
}

fn from_fetch_error(err: FetchError) -> VisibilityError {
    search_warn!("visibility change failed: {}", err);
    VisibilityError {
        kind: err.kind,
        backend_message: None,
    }
}
