use std::f64::consts::PI;
use std::time::Duration;

const PERIOD: f64 = 4.0;
const AMPLITUDE: f64 = 0.7;

/// Sine sweep of the space slider until the user touches a slider. The
/// phase follows the game clock from the first tick, not the tick count.
#[derive(Debug, Clone)]
pub struct Autoplay {
    running: bool,
    started: Option<Duration>,
}

impl Default for Autoplay {
    fn default() -> Self {
        Autoplay {
            running: true,
            started: None,
        }
    }
}

impl Autoplay {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `t` at game time `now` while running.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        if !self.running {
            return None;
        }
        let started = *self.started.get_or_insert(now);
        let time = now.saturating_sub(started).as_secs_f64();
        let progress = (time % PERIOD) / PERIOD;
        Some((progress * PI).sin() * AMPLITUDE)
    }

    /// Stop for the rest of the session.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("room autoplay stopped");
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn sweeps_up_then_down_within_amplitude() {
        let mut a = Autoplay::default();
        let samples: Vec<f64> = (0..240).filter_map(|i| a.tick(ms(i * 1000 / 60))).collect();
        assert_eq!(samples.len(), 240);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|&t| (0.0..=AMPLITUDE + 1e-9).contains(&t)));
        // Peak half way through the period.
        assert!((samples[120] - AMPLITUDE).abs() < 1e-3);
        assert!(samples[10] < samples[60]);
        assert!(samples[200] < samples[150]);
    }

    #[test]
    fn phase_follows_the_clock_not_the_tick_count() {
        let mut a = Autoplay::default();
        a.tick(ms(500));
        let once = a.tick(ms(1_500));
        for _ in 0..60 {
            assert_eq!(a.tick(ms(1_500)), once);
        }
        // One second in, a quarter period.
        let expected = (0.25 * PI).sin() * AMPLITUDE;
        assert!((once.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn stop_is_permanent() {
        let mut a = Autoplay::default();
        a.tick(ms(0));
        a.stop();
        assert!(a.tick(ms(16)).is_none());
        assert!(!a.is_running());
    }
}
