//! Long-lived services behind the UI.
//!
//! - `request_service`: the worker that executes REST commands
//! - `notification_service`: the toast queue

pub mod notification_service;
pub mod request_service;

pub use notification_service::{Notice, NoticeLevel, NotificationService};
pub use request_service::RequestService;
