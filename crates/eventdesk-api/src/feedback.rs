// Event feedback endpoint.

use tracing::debug;

use crate::auth::BearerToken;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::FeedbackResponse;

impl ApiClient {
    /// List the feedback left for one event, in backend order.
    ///
    /// `GET /feedback/event/{eventId}`
    ///
    /// The token is attached when present; without one the request goes out
    /// unauthenticated and the backend decides.
    pub async fn event_feedback(
        &self,
        event_id: &str,
        token: Option<&BearerToken>,
    ) -> Result<Vec<FeedbackResponse>, Error> {
        let url = self.url(&["feedback", "event", event_id])?;
        debug!(event_id, "fetching event feedback");
        self.get(url, token).await
    }
}
