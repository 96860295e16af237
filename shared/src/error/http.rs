//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::TableNotFound
            | Self::OrderNotFound
            | Self::OrderRequestNotFound
            | Self::PaymentNotFound
            | Self::PlanNotFound
            | Self::CategoryNotFound
            | Self::MenuItemNotFound
            | Self::MenuItemOptionNotFound
            | Self::RestaurantNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::TableNumberExists
            | Self::OrderAlreadyCompleted
            | Self::OrderAlreadyCancelled
            | Self::OrderRequestNotPlaced
            | Self::PaymentAlreadyVerified
            | Self::CategoryNameExists
            | Self::CategoryHasItems
            | Self::EmailAlreadyRegistered => StatusCode::CONFLICT,

            // 410 Gone (order session over, expired links)
            Self::Gone => StatusCode::GONE,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::SubscriptionRequired
            | Self::RegistrationIncomplete
            | Self::EmailNotVerified
            | Self::TableOccupied
            | Self::TableUnavailable
            | Self::TableReserved
            | Self::OutsideBusinessHours
            | Self::HolidayClosed => StatusCode::FORBIDDEN,

            // 502 Bad Gateway (upstream services)
            Self::GatewayError | Self::EmailSendFailed | Self::StorageError => {
                StatusCode::BAD_GATEWAY
            }

            // 503 Service Unavailable (transient, client can retry)
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::TableNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(ErrorCode::TableOccupied.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::SubscriptionRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::OutsideBusinessHours.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::OrderAlreadyCompleted.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::EmailAlreadyRegistered.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_gone_status() {
        assert_eq!(ErrorCode::Gone.http_status(), StatusCode::GONE);
    }

    #[test]
    fn test_gateway_status() {
        assert_eq!(ErrorCode::GatewayError.http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ErrorCode::ServiceUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_bad_request_default() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
