pub mod countries;
pub mod growth;
pub mod history;
pub mod simulate;

pub use countries::list_countries;
pub use growth::growth;
pub use history::history;
pub use simulate::simulate;

use crate::client::HttpApiClient;
use crate::config::Settings;
use crate::session::Dashboard;
use tracing::debug;

/// Dashboard session connected to the configured service.
fn open_dashboard(settings: &Settings) -> Dashboard<HttpApiClient> {
    let auth = settings.auth_context();
    let client = settings.http_client(&auth);
    debug!("Opening dashboard against {}", client.base_url());
    Dashboard::new(client, auth)
}
