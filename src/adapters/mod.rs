// Adapters layer: concrete implementations for external systems (http api, storage, notifications).

pub mod http;
pub mod notify;
pub mod storage;

pub use http::HttpStorefrontApi;
pub use notify::{ConsoleNotifier, RecordingNotifier};
pub use storage::{LocalStorage, MemoryStorage};
