pub mod mock;
pub mod traits;
pub mod types;
pub mod webhook;

pub use mock::MockListingSource;
pub use traits::ListingSource;
pub use types::BackendConfig;
pub use webhook::WebhookClient;
