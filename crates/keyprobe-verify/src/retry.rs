//! Retry-driven state convergence.

use std::future::Future;

use tracing::debug;

use keyprobe_core::{Error, Result, RetryPolicy};

/// Outcome of one predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Target state reached
    Converged,
    /// Not there yet; carries a description of the observed state
    Pending(String),
}

/// Successful convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convergence {
    /// Predicate evaluations performed, including the successful one
    pub attempts: u32,
    /// Recovery actions performed
    pub actions: u32,
}

/// Evaluate `probe` until it reports `Converged`, running `act` and waiting
/// `policy.interval()` after every pending evaluation except the last.
///
/// Converging on attempt `k` performs exactly `k - 1` actions. Exhausting
/// `policy.max_attempts` performs `max_attempts - 1` actions and fails with
/// `ConvergenceTimeout` carrying the last observed state. Errors from `probe`
/// or `act` are returned immediately.
pub async fn converge<P, PFut, A, AFut>(
    policy: &RetryPolicy,
    mut probe: P,
    mut act: A,
) -> Result<Convergence>
where
    P: FnMut() -> PFut,
    PFut: Future<Output = Result<Observation>>,
    A: FnMut() -> AFut,
    AFut: Future<Output = Result<()>>,
{
    policy.validate()?;

    let mut actions = 0;
    let mut last_state = String::new();

    for attempt in 1..=policy.max_attempts {
        match probe().await? {
            Observation::Converged => {
                debug!("Converged: attempts={}, actions={}", attempt, actions);
                return Ok(Convergence {
                    attempts: attempt,
                    actions,
                });
            }
            Observation::Pending(state) => {
                debug!(
                    "Not converged: attempt={}/{}, state={}",
                    attempt, policy.max_attempts, state
                );
                last_state = state;
            }
        }

        if attempt == policy.max_attempts {
            break;
        }

        act().await?;
        actions += 1;
        tokio::time::sleep(policy.interval()).await;
    }

    Err(Error::ConvergenceTimeout {
        attempts: policy.max_attempts,
        last_state,
    })
}
