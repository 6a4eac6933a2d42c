pub mod cache_entry;
pub mod client_cache;
pub mod clock;
pub mod derivation;
pub mod mock_data;
pub mod random;
pub mod server_cache;
pub mod subscription;
pub mod token_endpoint;

pub use client_cache::ClientTokenCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use server_cache::{CacheStatus, ServedSnapshot, ServerCacheSettings, ServerTokenCache, Upstream};
pub use subscription::Subscription;
pub use token_endpoint::{HttpTokenEndpoint, TokenEndpoint};
