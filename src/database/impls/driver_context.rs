use std::future::{
    pending,
    Future
};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use crate::database::errors::ContextError;
use crate::database::structs::driver_context::DriverContext;

impl DriverContext {
    /// No deadline, never cancelled.
    pub fn background() -> DriverContext {
        DriverContext { deadline: None, cancel: None }
    }

    pub fn with_timeout(timeout: Duration) -> DriverContext {
        DriverContext { deadline: Some(Instant::now() + timeout), cancel: None }
    }

    pub fn with_deadline(deadline: Instant) -> DriverContext {
        DriverContext { deadline: Some(deadline), cancel: None }
    }

    /// Attaches a shutdown-style signal; flipping the sender to `true` cancels.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> DriverContext {
        self.cancel = Some(cancel);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|cancel| *cancel.borrow())
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Drives `future` until it completes, the deadline passes, or the context is cancelled.
    pub async fn run<F, T>(&self, future: F) -> Result<T, ContextError>
    where
        F: Future<Output = T>,
    {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        if self.is_expired() {
            return Err(ContextError::DeadlineExceeded);
        }

        let deadline = self.deadline;
        let mut cancel = self.cancel.clone();

        tokio::select! {
            output = future => Ok(output),
            _ = async move {
                match deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => pending::<()>().await,
                }
            } => Err(ContextError::DeadlineExceeded),
            _ = async move {
                match cancel.as_mut() {
                    Some(receiver) => loop {
                        if *receiver.borrow_and_update() {
                            break;
                        }
                        if receiver.changed().await.is_err() {
                            pending::<()>().await;
                        }
                    },
                    None => pending::<()>().await,
                }
            } => Err(ContextError::Cancelled),
        }
    }
}
