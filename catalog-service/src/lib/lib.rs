pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::product;
pub use domain::product::service::ProductService;
pub use domain::user;
pub use domain::user::service::AuthenticationService;
pub use outbound::repositories;
