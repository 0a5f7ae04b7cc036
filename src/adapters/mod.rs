// Adapters layer: concrete implementations of the domain ports (disk storage, upstream http).

pub mod http;
pub mod storage;

pub use http::HttpFetcher;
pub use storage::LocalStorage;
