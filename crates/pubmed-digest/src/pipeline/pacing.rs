//! Pacing between processed articles.

use std::time::Duration;

/// Waits between pipeline iterations.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}

/// Sleeps for a fixed duration after every article, whatever its outcome.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait::async_trait]
impl Pacer for FixedDelay {
    async fn pace(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait::async_trait]
impl Pacer for NoDelay {
    async fn pace(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_delay_sleeps() {
        let started = std::time::Instant::now();
        FixedDelay(Duration::from_millis(50)).pace().await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let started = std::time::Instant::now();
        NoDelay.pace().await;
        FixedDelay(Duration::ZERO).pace().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
