//! Soft-fail wrapper.
//!
//! Collectors and site sources never fail loudly. They return either a
//! measured value or a substitute value together with the reason the
//! measurement could not be taken.

/// A value that was either measured or substituted after a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Collected<T> {
    Measured(T),
    Fallback { value: T, reason: String },
}

impl<T> Collected<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Collected::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Collected::Measured(value) | Collected::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Collected::Measured(value) | Collected::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Collected::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Collected::Measured(_) => None,
            Collected::Fallback { reason, .. } => Some(reason.as_str()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Collected<U> {
        match self {
            Collected::Measured(value) => Collected::Measured(f(value)),
            Collected::Fallback { value, reason } => Collected::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

impl Collected<f64> {
    pub fn score(&self) -> f64 {
        *self.value()
    }
}
