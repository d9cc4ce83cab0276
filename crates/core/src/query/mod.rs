//! Client-side query cache: keys, freshness and retry policy, the cache
//! itself and mutation handling.

pub mod client;
pub mod key;
pub mod mutation;
pub mod policy;

pub use client::{QueryClient, QueryEvent, QueryObserver, QueryOptions, QueryState};
pub use key::{keys, QueryKey};
pub use mutation::{run_mutation, MutationEffects};
pub use policy::QueryConfig;
