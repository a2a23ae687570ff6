//! Entrance animations — how `.animate-on-scroll` elements get revealed.

/// Fraction of an element that must be visible before it animates in.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// How to reveal animated elements on this page load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealStrategy {
    /// Show everything at once, without waiting for scroll.
    Immediate,
    /// Reveal each element the first time it intersects the viewport.
    Observe { threshold: f64 },
}

impl RevealStrategy {
    /// Reduced-motion users and browsers without an intersection observer
    /// get everything revealed immediately.
    #[must_use]
    pub fn choose(reduced_motion: bool, observer_supported: bool, threshold: f64) -> Self {
        if reduced_motion || !observer_supported {
            Self::Immediate
        } else {
            Self::Observe { threshold }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reveal_immediately_for_reduced_motion() {
        assert_eq!(
            RevealStrategy::choose(true, true, DEFAULT_THRESHOLD),
            RevealStrategy::Immediate
        );
    }

    #[test]
    fn should_reveal_immediately_without_observer() {
        assert_eq!(
            RevealStrategy::choose(false, false, DEFAULT_THRESHOLD),
            RevealStrategy::Immediate
        );
    }

    #[test]
    fn should_observe_with_threshold_otherwise() {
        assert_eq!(
            RevealStrategy::choose(false, true, 0.25),
            RevealStrategy::Observe { threshold: 0.25 }
        );
    }
}
