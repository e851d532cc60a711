use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct DriverContext {
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancel: Option<watch::Receiver<bool>>,
}
