use abi::errors::Error;
use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::error;

// We define our own `Path` extractor that customizes the errors from `axum::extract::Path`
pub struct PathExtractor<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathExtractor<T>
where
    // these trait bounds are copied from `impl FromRequest for axum::extract::path::Path`
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(match rejection {
                PathRejection::FailedToDeserializePathParams(inner) => Error::path_parsing(inner),
                PathRejection::MissingPathParams(err) => {
                    // route registered without the parameter, a programming error
                    error!("missing path params: {}", err);
                    Error::internal(err)
                }
                _ => Error::internal_with_details(format!(
                    "Unhandled path rejection: {rejection}"
                )),
            }),
        }
    }
}
