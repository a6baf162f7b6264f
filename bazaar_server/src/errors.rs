use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bazaar_engine::{
    traits::StoreError,
    OrderApiError,
    PaymentApiError,
    ShopApiError,
    UserApiError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Illegal state transition. {0}")]
    InvalidStateTransition(String),
    #[error("Business rule violation. {0}")]
    BusinessRuleViolation(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidStateTransition(_) => StatusCode::CONFLICT,
            Self::BusinessRuleViolation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::OrderNotFound(_) | StoreError::PaymentNotFound(_) => Self::NoRecordFound(e.to_string()),
            StoreError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::OrderNotFound(_) | OrderApiError::UserNotFound(_) | OrderApiError::ShopNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            OrderApiError::InvalidTransition(_) => Self::InvalidStateTransition(e.to_string()),
            OrderApiError::InvalidOrder(_) => Self::BusinessRuleViolation(e.to_string()),
            OrderApiError::StoreError(e) => e.into(),
        }
    }
}

impl From<PaymentApiError> for ServerError {
    fn from(e: PaymentApiError) -> Self {
        match e {
            PaymentApiError::PaymentNotFound(_) | PaymentApiError::PaymentForOrderNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            PaymentApiError::InvalidTransition(_) => Self::InvalidStateTransition(e.to_string()),
            PaymentApiError::StoreError(e) => e.into(),
        }
    }
}

impl From<ShopApiError> for ServerError {
    fn from(e: ShopApiError) -> Self {
        match e {
            ShopApiError::ShopNotFound(_) => Self::NoRecordFound(e.to_string()),
            ShopApiError::StoreError(e) => e.into(),
        }
    }
}

impl From<UserApiError> for ServerError {
    fn from(e: UserApiError) -> Self {
        match e {
            UserApiError::UserNotFound(_) | UserApiError::EmailNotFound(_) => Self::NoRecordFound(e.to_string()),
            UserApiError::DuplicateEmail(_) => Self::BusinessRuleViolation(e.to_string()),
            UserApiError::StoreError(e) => e.into(),
        }
    }
}
