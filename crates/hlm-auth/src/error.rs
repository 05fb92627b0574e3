use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in, run `hlm auth sign-in`")]
    NotAuthenticated,

    #[error("password is required")]
    EmptyPassword,

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("random source unavailable: {0}")]
    Random(String),

    #[error("token store error: {0}")]
    TokenStore(String),
}
