//! Settle-then-scan helpers for fan-out calls.
//!
//! Every call in a fan-out runs to completion; the outcomes are kept in
//! backend order and only then scanned. Which outcome wins depends on that
//! order, never on which call finished first.

use std::future::Future;
use std::time::Duration;

use filemigrate_store::{Error, Operation};
use futures::future::join_all;

/// Outcome of scanning a settled fan-out.
#[derive(Debug)]
pub(crate) enum Settled<T> {
    /// The lowest-index success.
    Succeeded { index: usize, value: T },
    /// Nothing succeeded. Errors are in backend order.
    Failed { errors: Vec<Error> },
}

/// Drive every future to completion, keeping results in input order.
pub(crate) async fn settle_all<I, F, T>(calls: I) -> Vec<Result<T, Error>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, Error>>,
{
    join_all(calls).await
}

/// Pick the first success by position.
pub(crate) fn first_success<T>(outcomes: Vec<Result<T, Error>>) -> Settled<T> {
    let mut errors = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(value) => return Settled::Succeeded { index, value },
            Err(e) => errors.push(e),
        }
    }
    Settled::Failed { errors }
}

/// Bound `call` by `limit`, settling as `Error::Timeout` when it elapses.
///
/// A limit needs a Tokio runtime to drive its timer. Without one the call is
/// not started and settles as `Error::Configuration`.
pub(crate) async fn bounded<T, F>(
    limit: Option<Duration>,
    operation: Operation,
    filename: &str,
    call: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let Some(limit) = limit else {
        return call.await;
    };

    if tokio::runtime::Handle::try_current().is_err() {
        return Err(Error::configuration(format!(
            "call timeout for {} of '{}' needs a Tokio runtime",
            operation, filename
        )));
    }

    match tokio::time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(Error::Timeout {
            operation,
            filename: filename.to_string(),
        }),
    }
}
