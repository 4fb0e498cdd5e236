// Adapters layer: concrete implementations for external systems (remote table http, local storage).

pub mod http;
pub mod storage;

pub use http::GenTableClient;
pub use storage::LocalStorage;
