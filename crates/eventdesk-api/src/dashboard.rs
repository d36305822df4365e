// Dashboard statistics endpoint.

use tracing::debug;

use crate::auth::BearerToken;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::DashboardStatsResponse;

impl ApiClient {
    /// Fetch the aggregate counters shown on the dashboard overview.
    ///
    /// `GET /dashboard/stats`
    ///
    /// Requires a bearer token; callers check for one before calling.
    pub async fn dashboard_stats(&self, token: &BearerToken) -> Result<DashboardStatsResponse, Error> {
        let url = self.url(&["dashboard", "stats"])?;
        debug!("fetching dashboard stats");
        self.get(url, Some(token)).await
    }
}
