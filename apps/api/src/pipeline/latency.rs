//! Artificial latency injected before every service operation resolves.
//!
//! Base delays per operation model a remote backend's turnaround so callers
//! exercise their loading states. Disabled entirely with `Latency::none()`.

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    BatchSubmit,
    Status,
    Result,
    ListResumes,
    DeleteResume,
    ListProfiles,
    CreateProfile,
    Export,
    Cancel,
}

impl Operation {
    pub fn base_delay(self) -> Duration {
        let ms = match self {
            Operation::Submit => 1000,
            Operation::BatchSubmit => 2000,
            Operation::Status => 500,
            Operation::Result => 800,
            Operation::ListResumes => 600,
            Operation::DeleteResume => 400,
            Operation::ListProfiles => 400,
            Operation::CreateProfile => 500,
            Operation::Export => 1500,
            Operation::Cancel => 400,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
    /// Upper bound of a uniformly random delay added on top of the base.
    jitter: Duration,
}

impl Latency {
    pub fn realistic(jitter: Duration) -> Self {
        Self {
            enabled: true,
            jitter,
        }
    }

    pub fn none() -> Self {
        Self {
            enabled: false,
            jitter: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_ms)
        };
        op.base_delay() + Duration::from_millis(extra)
    }

    pub async fn simulate(&self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::realistic(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_zero() {
        assert_eq!(Latency::none().delay_for(Operation::Export), Duration::ZERO);
    }

    #[test]
    fn test_realistic_uses_base() {
        let latency = Latency::default();
        assert_eq!(latency.delay_for(Operation::Status), Duration::from_millis(500));
        assert_eq!(latency.delay_for(Operation::Export), Duration::from_millis(1500));
    }

    #[test]
    fn test_jitter_bounded() {
        let latency = Latency::realistic(Duration::from_millis(200));
        for _ in 0..100 {
            let d = latency.delay_for(Operation::Submit);
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(1200));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_sleeps_on_virtual_clock() {
        let start = tokio::time::Instant::now();
        Latency::default().simulate(Operation::Result).await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
