//! Async runtime adapter: background tasks that report back to the UI thread.

mod async_runtime;
mod message;

pub use async_runtime::{AsyncRuntime, RefreshLoop};
pub use message::AppMessage;
