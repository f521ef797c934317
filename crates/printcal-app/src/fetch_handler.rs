use salvo::async_trait;

use crate::error::AppResult;
use printcal_core::error::CoreError;
use reqwest::Client;

/// Shares one HTTP client across requests that fetch remote calendars.
pub struct FetchClientHandler {
    pub client: Client,
}

#[async_trait]
impl salvo::Handler for FetchClientHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // Client is reference counted internally
        depot.inject(self.client.clone());
    }
}

/// ## Summary
/// Retrieves the fetch client from the depot.
///
/// ## Errors
/// Returns an error if the client is not found in the depot.
pub fn get_client_from_depot(depot: &salvo::Depot) -> AppResult<Client> {
    depot
        .obtain::<Client>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Fetch client not found in depot").into())
}
