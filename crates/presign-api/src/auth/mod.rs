pub mod bearer;
pub mod jwt_hs256;
pub mod models;
pub mod policy;

pub use bearer::extract_bearer_token;
pub use jwt_hs256::TokenError;
pub use models::Claims;
pub use policy::{authorize, is_staff};
