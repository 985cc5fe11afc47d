//! Scoped driver sessions.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use keyprobe_core::{
    Capabilities, ElementHandle, Error, LocatorStrategy, Result, SessionHandle, SessionId,
};

use crate::driver::AutomationDriver;

/// A driver together with the session it is currently bound to.
///
/// Every suite operation receives this explicitly instead of reaching for a
/// shared global driver.
pub struct SessionContext<D> {
    driver: Arc<D>,
    session: SessionHandle,
}

impl<D> Clone for SessionContext<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            session: self.session.clone(),
        }
    }
}

impl<D: AutomationDriver> SessionContext<D> {
    /// Bind a driver to an already created session.
    pub fn new(driver: Arc<D>, session: SessionHandle) -> Self {
        Self { driver, session }
    }

    /// Get the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get the session handle.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Get the session ID.
    pub fn id(&self) -> &SessionId {
        &self.session.id
    }

    /// Find the last element matching a locator.
    ///
    /// An empty match is `ElementNotFound`; it is not retried.
    pub async fn find_last(&self, strategy: LocatorStrategy, value: &str) -> Result<ElementHandle> {
        self.driver
            .find_elements(strategy, value)
            .await?
            .pop()
            .ok_or_else(|| Error::ElementNotFound(format!("{strategy}={value}")))
    }

    /// Find the element at `index` among those matching a locator.
    pub async fn find_nth(
        &self,
        strategy: LocatorStrategy,
        value: &str,
        index: usize,
    ) -> Result<ElementHandle> {
        self.driver
            .find_elements(strategy, value)
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::ElementNotFound(format!("{strategy}={value}[{index}]")))
    }
}

/// Run `body` inside a fresh session.
///
/// The session is created from `capabilities`, handed to `body`, and deleted
/// afterwards whether or not `body` succeeded. A teardown failure is returned
/// only when `body` itself succeeded; otherwise the body's error wins.
pub async fn with_session<D, F, Fut, T>(
    driver: Arc<D>,
    capabilities: Capabilities,
    body: F,
) -> Result<T>
where
    D: AutomationDriver,
    F: FnOnce(SessionContext<D>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = driver.create_session(capabilities).await?;
    let session_id = session.id;
    info!("Session acquired: id={}", session_id);

    let result = body(SessionContext::new(Arc::clone(&driver), session)).await;
    let teardown = driver.delete_session().await;
    info!("Session released: id={}", session_id);

    match (result, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(teardown_err)) => {
            warn!(
                "Session teardown failed after body error: id={}, error={}",
                session_id, teardown_err
            );
            Err(e)
        }
    }
}
