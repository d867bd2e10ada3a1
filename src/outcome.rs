// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Transport-neutral result of a collection request.
//!
//! The service layer speaks in [`ServiceError`]; clients only ever see one of
//! four outcomes. Status codes and response bodies are chosen at the HTTP
//! boundary (see [`crate::api::error`]).

use crate::service::{Operation, ServiceError};

/// What happened to a request, independent of transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    BadRequest(String),
    /// Carries the client-facing message.
    Internal(String),
}

impl<T> Outcome<T> {
    /// Map a service result for `operation` onto an outcome.
    ///
    /// Store failures are reduced to the message clients see for that
    /// operation; the detailed error stays in the logs.
    pub fn from_result(operation: Operation, result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(ServiceError::NotFound) => Outcome::NotFound,
            Err(ServiceError::BadRequest(message)) => Outcome::BadRequest(message),
            Err(err @ ServiceError::NotReady) => Outcome::Internal(err.to_string()),
            Err(ServiceError::StoreFailure { source, .. }) => {
                Outcome::Internal(operation.failure_message(&source))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn store_failure(operation: Operation) -> ServiceError {
        ServiceError::StoreFailure {
            operation,
            source: StoreError::Unavailable("disk full".to_string()),
        }
    }

    #[test]
    fn test_ok_passes_value_through() {
        let outcome = Outcome::from_result(Operation::Get, Ok(7));
        assert_eq!(outcome, Outcome::Ok(7));
    }

    #[test]
    fn test_not_found() {
        let outcome: Outcome<()> = Outcome::from_result(Operation::Delete, Err(ServiceError::NotFound));
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn test_not_ready_is_internal() {
        let outcome: Outcome<()> = Outcome::from_result(Operation::List, Err(ServiceError::NotReady));
        assert_eq!(
            outcome,
            Outcome::Internal("Database not initialized".to_string())
        );
    }

    #[test]
    fn test_read_failure_includes_error_text() {
        let outcome: Outcome<()> =
            Outcome::from_result(Operation::List, Err(store_failure(Operation::List)));
        assert_eq!(
            outcome,
            Outcome::Internal("Failed to fetch data: Store unavailable: disk full".to_string())
        );
    }

    #[test]
    fn test_write_failure_uses_fixed_message() {
        let outcome: Outcome<()> =
            Outcome::from_result(Operation::Create, Err(store_failure(Operation::Create)));
        assert_eq!(outcome, Outcome::Internal("Failed to add data".to_string()));
    }

    #[test]
    fn test_bad_request_keeps_message() {
        let outcome: Outcome<()> = Outcome::from_result(
            Operation::Update,
            Err(ServiceError::BadRequest("expected a JSON object".to_string())),
        );
        assert_eq!(
            outcome,
            Outcome::BadRequest("expected a JSON object".to_string())
        );
    }
}
