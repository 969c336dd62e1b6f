use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/// Stand-in for the time a transfer takes.
#[async_trait]
pub trait TransferDelay: Send + Sync {
    async fn wait(&self);
}

#[derive(Debug, Clone, Copy)]
pub struct SleepDelay(Duration);

impl SleepDelay {
    pub const DEFAULT: Duration = Duration::from_secs(6);

    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for SleepDelay {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[async_trait]
impl TransferDelay for SleepDelay {
    async fn wait(&self) {
        sleep(self.0).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl TransferDelay for NoDelay {
    async fn wait(&self) {}
}
