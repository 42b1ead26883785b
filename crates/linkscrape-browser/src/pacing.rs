use rand::Rng;
use std::time::Duration;

/// How aggressively pages are driven
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrapeMode {
    /// Fixed delays at the lower bound of every range
    #[default]
    Fast,
    /// Uniformly random delays and automation-hiding launch flags
    Stealth,
}

impl ScrapeMode {
    pub fn is_stealth(&self) -> bool {
        matches!(self, ScrapeMode::Stealth)
    }
}

/// Inserts the waits between browser actions
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    mode: ScrapeMode,
}

impl Pacing {
    pub fn new(mode: ScrapeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ScrapeMode {
        self.mode
    }

    /// Delay for a range given in seconds
    pub fn delay(&self, min_secs: f64, max_secs: f64) -> Duration {
        let secs = match self.mode {
            ScrapeMode::Fast => min_secs,
            ScrapeMode::Stealth if max_secs > min_secs => {
                rand::thread_rng().gen_range(min_secs..=max_secs)
            }
            ScrapeMode::Stealth => min_secs,
        };
        Duration::from_secs_f64(secs.max(0.0))
    }

    pub async fn pause(&self, min_secs: f64, max_secs: f64) {
        let delay = self.delay(min_secs, max_secs);
        tracing::trace!("Pausing for {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    /// Gap between simulated key presses
    pub fn key_delay(&self) -> Duration {
        match self.mode {
            ScrapeMode::Fast => Duration::from_millis(30),
            ScrapeMode::Stealth => {
                Duration::from_millis(rand::thread_rng().gen_range(80..=160))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_mode_is_fixed() {
        let pacing = Pacing::new(ScrapeMode::Fast);
        assert_eq!(pacing.delay(1.5, 3.0), Duration::from_millis(1500));
        assert_eq!(pacing.delay(1.5, 3.0), pacing.delay(1.5, 3.0));
        assert_eq!(pacing.key_delay(), Duration::from_millis(30));
    }

    #[test]
    fn test_stealth_mode_stays_in_range() {
        let pacing = Pacing::new(ScrapeMode::Stealth);
        for _ in 0..100 {
            let delay = pacing.delay(0.5, 1.0);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));

            let key = pacing.key_delay();
            assert!(key >= Duration::from_millis(80) && key <= Duration::from_millis(160));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let pacing = Pacing::new(ScrapeMode::Stealth);
        assert_eq!(pacing.delay(2.0, 2.0), Duration::from_secs(2));
    }
}
