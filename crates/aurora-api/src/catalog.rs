// Catalog endpoints
//
// Read-only lookups for the two things a customer can book.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{DestinationResponse, VacationPackageResponse};

impl ApiClient {
    /// Fetch a vacation package.
    ///
    /// `GET /api/vacations/:id`
    pub async fn get_vacation(&self, id: &str) -> Result<VacationPackageResponse, Error> {
        debug!(id, "fetching vacation package");
        self.get(&["vacations", id]).await
    }

    /// Fetch a destination.
    ///
    /// `GET /api/destinations/:id`
    pub async fn get_destination(&self, id: &str) -> Result<DestinationResponse, Error> {
        debug!(id, "fetching destination");
        self.get(&["destinations", id]).await
    }
}
