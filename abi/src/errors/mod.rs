use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    DbError,
    ConfigReadError,
    ConfigParseError,
    InternalServer,
    BodyParsing,
    PathParsing,
    UnAuthorized,
    IOError,
    BadRequest,
    // friendship request lifecycle
    TargetNotFound,
    RequestAlreadyExists,
    NoPendingRequest,
    // friend profile
    NotFriendsOrNotFound,
    InvalidProfile,
}

#[derive(Debug, Serialize)]
pub struct Error {
    kind: ErrorKind,
    details: Option<String>,
    #[serde(skip)]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    #[inline]
    pub fn new(
        kind: ErrorKind,
        details: impl Into<String>,
        source: impl StdError + 'static + Send + Sync,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn with_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            source: None,
            details: None,
        }
    }

    #[inline]
    pub fn with_details(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            source: None,
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn internal(error: impl StdError + 'static + Send + Sync) -> Self {
        Self {
            kind: ErrorKind::InternalServer,
            details: Some(error.to_string()),
            source: Some(Box::new(error)),
        }
    }

    #[inline]
    pub fn internal_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::InternalServer, details)
    }

    #[inline]
    pub fn config_read(error: std::io::Error) -> Self {
        Self::new(ErrorKind::ConfigReadError, error.to_string(), error)
    }

    #[inline]
    pub fn unauthorized(
        error: impl StdError + 'static + Send + Sync,
        details: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnAuthorized, details, error)
    }

    #[inline]
    pub fn unauthorized_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::UnAuthorized, details)
    }

    #[inline]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BadRequest, details)
    }

    #[inline]
    pub fn body_parsing(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BodyParsing, details)
    }

    #[inline]
    pub fn path_parsing(err: impl StdError + 'static + Send + Sync) -> Self {
        Self::new(ErrorKind::PathParsing, err.to_string(), err)
    }

    #[inline]
    pub fn target_not_found(target_id: i64) -> Self {
        Self::with_details(
            ErrorKind::TargetNotFound,
            format!("user {target_id} can not receive friendship request"),
        )
    }

    #[inline]
    pub fn request_already_exists() -> Self {
        Self::with_details(
            ErrorKind::RequestAlreadyExists,
            "friendship already exists",
        )
    }

    #[inline]
    pub fn no_pending_request() -> Self {
        Self::with_details(
            ErrorKind::NoPendingRequest,
            "no pending friendship request",
        )
    }

    #[inline]
    pub fn not_friends_or_not_found() -> Self {
        Self::with_kind(ErrorKind::NotFriendsOrNotFound)
    }

    #[inline]
    pub fn invalid_profile(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::InvalidProfile, details)
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::DbError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ConfigReadError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ConfigParseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::BodyParsing => StatusCode::BAD_REQUEST,
            ErrorKind::PathParsing => StatusCode::BAD_REQUEST,
            ErrorKind::UnAuthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::IOError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::TargetNotFound => StatusCode::BAD_REQUEST,
            ErrorKind::RequestAlreadyExists => StatusCode::CONFLICT,
            ErrorKind::NoPendingRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFriendsOrNotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidProfile => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{:?}: {}", self.kind, details),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!("custom error to http error{:?}", self);
        }
        (status_code, Json(self)).into_response()
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value.to_string(), value)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::ConfigParseError, value.to_string(), value)
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::new(ErrorKind::DbError, value.to_string(), value)
    }
}
