pub mod auth;
pub mod posts;
pub mod storage;

pub use auth::AuthService;
pub use posts::PostService;
pub use storage::StorageService;
