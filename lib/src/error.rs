//! The errors returned by the client and the API

/// Code returned while the server is still verifying an uploaded file
pub const VERIFICATION_IN_PROGRESS_CODE: i64 = 20103;
const VERIFICATION_IN_PROGRESS_MESSAGE: &str = "校验中";

/// All the possible errors returned by the client and the API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter was rejected before sending anything
    #[error("invalid parameter: {0}")]
    Validation(String),
    /// A token was needed but no client id and secret were configured
    #[error("client id and secret are required to request an access token")]
    MissingCredentials,
    /// Transport level failure
    #[error("network error")]
    Network(#[from] reqwest::Error),
    /// Unable to read the response due to its format
    #[error("unable to decode response")]
    Decode(#[from] serde_json::Error),
    /// Unable to read or write a local file
    #[error("io error")]
    Io(#[from] std::io::Error),
    /// Server side error, properly handled, returning a code and a message
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Failure specific to the upload pipeline
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_upload(&self) -> Option<&UploadError> {
        match self {
            Self::Upload(inner) => Some(inner),
            _ => None,
        }
    }
}

/// The category of an [`ApiError`], derived from its code and message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    TokenExpired,
    InvalidCredentials,
    TokenLimitExceeded,
    Unauthorized,
    PermissionDenied,
    FileNotFound,
    ShareNotFound,
    TaskNotFound,
    NotFound,
    QpsLimit,
    RateLimited,
    InternalServer,
    ServiceUnavailable,
    GatewayTimeout,
    Server,
    InsufficientStorage,
    QuotaExceeded,
    Other,
}

impl ApiErrorKind {
    pub fn classify(code: i64, message: &str) -> Self {
        let message = message.to_lowercase();
        let has = |needle: &str| message.contains(needle);
        match code {
            401 if has("expired") => Self::TokenExpired,
            401 if has("invalid") && (has("client") || has("credential")) => {
                Self::InvalidCredentials
            }
            401 if has("token") && has("exceeded") => Self::TokenLimitExceeded,
            401 => Self::Unauthorized,
            403 => Self::PermissionDenied,
            404 if has("file") => Self::FileNotFound,
            404 if has("share") => Self::ShareNotFound,
            404 if has("task") => Self::TaskNotFound,
            404 => Self::NotFound,
            429 if has("qps") => Self::QpsLimit,
            429 => Self::RateLimited,
            500 => Self::InternalServer,
            503 => Self::ServiceUnavailable,
            504 => Self::GatewayTimeout,
            c if c >= 500 => Self::Server,
            _ if has("storage") || has("space") => {
                if has("insufficient") || has("not enough") {
                    Self::InsufficientStorage
                } else if has("quota") || has("exceed") {
                    Self::QuotaExceeded
                } else {
                    Self::Other
                }
            }
            _ => Self::Other,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired
                | Self::InvalidCredentials
                | Self::TokenLimitExceeded
                | Self::Unauthorized
                | Self::PermissionDenied
        )
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::QpsLimit | Self::RateLimited)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound | Self::ShareNotFound | Self::TaskNotFound | Self::NotFound
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::InsufficientStorage | Self::QuotaExceeded)
    }

    pub fn is_server(&self) -> bool {
        matches!(
            self,
            Self::InternalServer | Self::ServiceUnavailable | Self::GatewayTimeout | Self::Server
        )
    }
}

/// An error reported by the API, through a non zero `code` or an HTTP error status
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    code: i64,
    message: String,
    trace_id: Option<String>,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>, trace_id: Option<String>) -> Self {
        let message = message.into();
        Self {
            kind: ApiErrorKind::classify(code, &message),
            code,
            message,
            trace_id,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// The server did not finish checking an uploaded file yet
    pub fn is_verification_in_progress(&self) -> bool {
        self.code == VERIFICATION_IN_PROGRESS_CODE
            || self.message.contains(VERIFICATION_IN_PROGRESS_MESSAGE)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if let Some(ref trace_id) = self.trace_id {
            write!(f, " [trace_id: {trace_id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Errors specific to the upload pipeline
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The upload server refused a slice
    #[error("slice {slice_no} rejected: {message} (code: {code})")]
    SliceRejected {
        slice_no: u32,
        code: i64,
        message: String,
    },
    /// The create response is missing what is needed to send the slices
    #[error("invalid upload session: {0}")]
    InvalidSession(&'static str),
    /// The source did not provide the amount of bytes declared when creating the session
    #[error("declared {declared} bytes but read {read} bytes")]
    SizeMismatch { declared: u64, read: u64 },
    /// The server did not complete the upload in time
    #[error("upload completion timed out after {attempts} attempts")]
    CompletionTimeout { attempts: u32 },
}
