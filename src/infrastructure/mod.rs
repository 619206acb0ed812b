pub mod api_client;
pub mod dto;
pub mod http;
pub mod rendering;
pub mod services;

pub use api_client::{ApiClient, Endpoints};
pub use http::{GlooHttpClient, HttpUtils};
