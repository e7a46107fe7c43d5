use abi::errors::Error;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
};

/// `axum::Json` whose rejection is rendered as our own error body
pub struct JsonExtractor<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            // convert the errors from `axum::Json` into whatever we want
            Err(rejection) => Err(Error::body_parsing(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use abi::errors::ErrorKind;
    use abi::model::FriendshipRequest;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    use super::*;

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/friendship-request/send")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn json_body_should_be_extracted() {
        let JsonExtractor(req) =
            JsonExtractor::<FriendshipRequest>::from_request(request(r#"{"friendUserId":2}"#), &())
                .await
                .unwrap();
        assert_eq!(req.friend_user_id, 2);
    }

    #[tokio::test]
    async fn malformed_body_should_be_body_parsing_error() {
        let err = JsonExtractor::<FriendshipRequest>::from_request(
            request(r#"{"friend_user_id":"x"}"#),
            &(),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.kind(), &ErrorKind::BodyParsing);
    }
}
