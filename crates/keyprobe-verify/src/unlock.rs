//! Waiting for the device to unlock.

use tracing::info;

use keyprobe_core::{Error, Result, RetryPolicy};
use keyprobe_driver::{AutomationDriver, SessionContext};

use crate::retry::{converge, Convergence, Observation};

/// Unlock the device, re-checking after each attempt until it reports
/// unlocked or `policy` runs out.
pub async fn ensure_unlocked<D: AutomationDriver>(
    ctx: &SessionContext<D>,
    policy: &RetryPolicy,
) -> Result<Convergence> {
    let driver = ctx.driver();
    let convergence = converge(
        policy,
        || async {
            Ok::<_, Error>(if driver.is_locked().await? {
                Observation::Pending("device is locked".to_string())
            } else {
                Observation::Converged
            })
        },
        || driver.unlock(),
    )
    .await?;

    if convergence.actions > 0 {
        info!("Device unlocked after {} attempt(s)", convergence.attempts);
    }
    Ok(convergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyprobe_core::{Capabilities, SimulatorSettings};
    use keyprobe_driver::{with_session, SimulatedDevice};
    use std::sync::Arc;

    fn device(unlock_calls_required: u32) -> Arc<SimulatedDevice> {
        Arc::new(SimulatedDevice::with_settings(SimulatorSettings {
            unlock_calls_required,
            ..SimulatorSettings::default()
        }))
    }

    #[tokio::test]
    async fn test_already_unlocked() {
        let device = device(0);
        let result = with_session(Arc::clone(&device), Capabilities::base(), |ctx| async move {
            ensure_unlocked(&ctx, &RetryPolicy::new(3, 0)).await
        })
        .await
        .unwrap();
        assert_eq!(result, Convergence { attempts: 1, actions: 0 });
        assert_eq!(device.unlock_calls(), 0);
    }

    #[tokio::test]
    async fn test_unlocks_after_retries() {
        let device = device(2);
        let result = with_session(Arc::clone(&device), Capabilities::base(), |ctx| async move {
            ensure_unlocked(&ctx, &RetryPolicy::new(10, 0)).await
        })
        .await
        .unwrap();
        assert_eq!(result, Convergence { attempts: 3, actions: 2 });
        assert_eq!(device.unlock_calls(), 2);
    }

    #[tokio::test]
    async fn test_stays_locked() {
        let device = device(5);
        let result = with_session(Arc::clone(&device), Capabilities::base(), |ctx| async move {
            ensure_unlocked(&ctx, &RetryPolicy::new(3, 0)).await
        })
        .await;
        assert!(matches!(
            result,
            Err(Error::ConvergenceTimeout { attempts: 3, ref last_state }) if last_state == "device is locked"
        ));
        assert_eq!(device.unlock_calls(), 2);
    }
}
