//! # ProdPlan API
//!
//! 請求/回應邊界層：每個操作一組明確結構的標記式 schema，
//! 由外層傳輸（IPC、HTTP 等）原樣轉交 JSON 即可。

pub mod request;
pub mod response;
pub mod service;

// Re-export 主要類型
pub use request::Request;
pub use response::{error_code, Response};
pub use service::PlanningService;
