//! Generic command executor
//!
//! Runs an [`Operation`] through the fixed sequence every call follows:
//! session preamble, parameter validation, payload construction, one
//! transport call, response mapping. No failure escapes
//! [`Command::execute`]; every one becomes an [`ErrorDetail`].

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::Operation;
use crate::{
    error::{failure_message, ErrorCategory, SoaError},
    error_codes::ErrorDetail,
    logging::{log_request, log_response},
    response::CommandResult,
    transport::SoaTransport,
};

/// One invocation of an operation.
///
/// Borrows the transport; owns its parameters. Built per call and consumed
/// by [`execute`](Self::execute).
pub struct Command<'a, P, T> {
    operation: Operation<P, T>,
    transport: Option<&'a dyn SoaTransport>,
    logged_in: bool,
    params: P,
    request_id: Uuid,
}

impl<'a, P, T> Command<'a, P, T>
where
    P: Send + Sync,
    T: Send,
{
    pub fn new(
        operation: Operation<P, T>,
        transport: Option<&'a dyn SoaTransport>,
        logged_in: bool,
        params: P,
    ) -> Self {
        Self {
            operation,
            transport,
            logged_in,
            params,
            request_id: Uuid::new_v4(),
        }
    }

    /// Correlation id tagging every log line of this invocation.
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub async fn execute(self) -> CommandResult<T> {
        let span = tracing::info_span!(
            "soa_command",
            request_id = %self.request_id,
            command = self.operation.name,
            service = self.operation.service,
            operation = self.operation.operation,
        );
        self.run().instrument(span).await
    }

    async fn run(self) -> CommandResult<T> {
        let operation = &self.operation;

        if operation.requires_session && !self.logged_in {
            tracing::warn!("Rejected, no active session");
            return Err(ErrorDetail::no_session());
        }

        if let Err(reason) = (operation.validate)(&self.params) {
            tracing::warn!(reason = %reason, "Rejected, invalid parameters");
            return Err(ErrorDetail::invalid_parameter(reason));
        }

        let payload = (operation.build_payload)(&self.params, self.request_id);
        log_request(
            self.request_id,
            operation.service,
            operation.operation,
            &payload,
        );

        let outcome = match self.invoke(payload).await {
            Ok(body) => (operation.map_response)(body, &self.params)
                .map_err(|err| self.failure(&anyhow::Error::from(err))),
            Err(err) => Err(self.failure(&err)),
        };

        log_response(self.request_id, &outcome);
        outcome
    }

    async fn invoke(&self, payload: Value) -> anyhow::Result<Value> {
        let transport = self.transport.ok_or_else(|| {
            SoaError::unknown("SOA client is not initialized")
                .with_context("method", self.operation.operation)
        })?;
        transport
            .call(self.operation.service, self.operation.operation, payload)
            .await
    }

    fn failure(&self, err: &anyhow::Error) -> ErrorDetail {
        let category = err
            .downcast_ref::<SoaError>()
            .map_or(ErrorCategory::Unknown, SoaError::category);
        let code = self.operation.code_for(category);
        tracing::debug!(category = %category, code = %code, "Classified failure: {err:#}");
        ErrorDetail::error(code, failure_message(err))
    }
}
