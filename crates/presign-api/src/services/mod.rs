pub mod credentials;

pub use credentials::CredentialIssuer;
