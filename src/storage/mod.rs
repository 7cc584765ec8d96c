//! Order data sources
//!
//! [`OrderDataProvider`] is the provider the server uses. It wraps an
//! optional [`SearchIndexClient`] and the deterministic
//! [`SampleOrderGenerator`].

pub mod provider;
pub mod sample;
pub mod search_index;

pub use provider::OrderDataProvider;
pub use sample::SampleOrderGenerator;
#[cfg(feature = "search-index")]
pub use search_index::SearchIndexClient;
pub use search_index::SearchConnection;
