//! Validated configuration value types

use serde::{Deserialize, Serialize};

/// Worker count configuration with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCount(usize);

impl ThreadCount {
    /// Minimum worker count
    pub const MIN: usize = 1;
    /// Maximum worker count
    pub const MAX: usize = 256;
    /// Default worker count
    pub const DEFAULT: usize = 4;

    /// Create a new worker count with validation
    pub fn new(count: usize) -> Result<Self, String> {
        if count < Self::MIN {
            Err(format!(
                "Thread count {} is below minimum {}",
                count,
                Self::MIN
            ))
        } else if count > Self::MAX {
            Err(format!(
                "Thread count {} exceeds maximum {}",
                count,
                Self::MAX
            ))
        } else {
            Ok(Self(count))
        }
    }

    /// Get the worker count value
    pub fn get(self) -> usize {
        self.0
    }

    /// Get the optimal worker count for the current system
    pub fn optimal() -> Self {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(Self::DEFAULT);
        Self(cpu_count.min(Self::MAX))
    }
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(ThreadCount::new(0).is_err());
        assert!(ThreadCount::new(1).is_ok());
        assert!(ThreadCount::new(256).is_ok());
        assert!(ThreadCount::new(257).is_err());
    }

    #[test]
    fn test_default_is_four() {
        assert_eq!(ThreadCount::default().get(), 4);
    }

    #[test]
    fn test_optimal_is_within_bounds() {
        let optimal = ThreadCount::optimal().get();
        assert!(optimal >= ThreadCount::MIN);
        assert!(optimal <= ThreadCount::MAX);
    }
}
