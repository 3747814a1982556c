//! Mapping of application errors to HTTP responses.

use salvo::http::StatusError;
use storefront::{DomainError, DomainErrorKind};
use storefront_app::{repositories::RepositoryError, use_cases::UseCaseError};
use tracing::error;

/// Answer for a failed operation. Domain errors keep their message; infrastructure failures are
/// logged and reported as a bare 500.
pub(crate) fn into_status_error(error: impl Into<UseCaseError>) -> StatusError {
    match error.into() {
        UseCaseError::Domain(error) => domain_status_error(&error),
        UseCaseError::Repository(error) => repository_status_error(error),
        UseCaseError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UseCaseError::Token(source) => {
            error!("failed to issue token: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn domain_status_error(error: &DomainError) -> StatusError {
    let status = match error.kind() {
        DomainErrorKind::NotFound => StatusError::not_found(),
        DomainErrorKind::Authentication => StatusError::unauthorized(),
        DomainErrorKind::Authorization => StatusError::forbidden(),
        DomainErrorKind::Validation => StatusError::unprocessable_entity(),
        DomainErrorKind::Domain => StatusError::bad_request(),
    };

    status.brief(error.message())
}

fn repository_status_error(error: RepositoryError) -> StatusError {
    match error {
        RepositoryError::AlreadyExists => StatusError::conflict().brief("Record already exists"),
        RepositoryError::NotFound => StatusError::not_found(),
        RepositoryError::InvalidReference
        | RepositoryError::MissingRequiredData
        | RepositoryError::InvalidData => StatusError::bad_request().brief("Invalid payload"),
        RepositoryError::Finished => {
            error!("unit of work used after it finished");

            StatusError::internal_server_error()
        }
        RepositoryError::Sql(source) => {
            error!("storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    fn status(error: impl Into<UseCaseError>) -> StatusCode {
        into_status_error(error).code
    }

    #[test]
    fn domain_kinds_map_to_distinct_statuses() {
        assert_eq!(status(DomainError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status(DomainError::authentication("x")), StatusCode::UNAUTHORIZED);
        assert_eq!(status(DomainError::authorization("x")), StatusCode::FORBIDDEN);
        assert_eq!(
            status(DomainError::validation("x")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(DomainError::Domain("x".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn domain_message_becomes_the_brief() {
        let error = into_status_error(DomainError::validation("Invalid email address"));

        assert_eq!(error.brief, "Invalid email address");
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        assert_eq!(
            status(RepositoryError::Finished),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(RepositoryError::AlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status(RepositoryError::InvalidData), StatusCode::BAD_REQUEST);
    }
}
