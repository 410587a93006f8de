// ============================================================================
// Decimal Configuration
// Precision and ingestion policy for bulk numeric input
// ============================================================================

use crate::errors::{SeriesError, SeriesResult};
use crate::numeric::{ExactDecimal, DEFAULT_PRECISION, MAX_PRECISION};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingestion Mode
// ============================================================================

/// How bulk ingestion treats items that are not numeric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IngestMode {
    /// Fail on the first item that cannot be converted
    #[default]
    Strict,

    /// Drop items that cannot be converted and keep going
    /// (each drop is logged at warn level)
    Lenient,
}

// ============================================================================
// Complete Decimal Configuration
// ============================================================================

/// Configuration for converting raw input into exact decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalConfig {
    /// Significant digits kept by every ingested value (1..=28)
    pub precision: u32,

    /// Policy for non-numeric items
    pub ingest_mode: IngestMode,
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            ingest_mode: IngestMode::Strict,
        }
    }
}

impl DecimalConfig {
    /// Create a new configuration with required parameters
    pub fn new(precision: u32, ingest_mode: IngestMode) -> Self {
        Self {
            precision,
            ingest_mode,
        }
    }

    /// Builder pattern: set precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: set ingestion mode
    pub fn with_ingest_mode(mut self, mode: IngestMode) -> Self {
        self.ingest_mode = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SeriesResult<()> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(SeriesError::InvalidArgument(format!(
                "precision must be between 1 and {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }

    pub fn is_lenient(&self) -> bool {
        self.ingest_mode == IngestMode::Lenient
    }

    /// Parse one raw string according to this configuration.
    ///
    /// Returns `Ok(None)` when the item is dropped in lenient mode.
    pub fn parse_value(&self, raw: &str) -> SeriesResult<Option<ExactDecimal>> {
        match ExactDecimal::parse_with(raw, self.precision) {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.is_lenient() => {
                tracing::warn!("Discarding non-numeric input {:?}: {}", raw, err);
                Ok(None)
            },
            Err(err) => Err(SeriesError::UnexpectedValue(format!(
                "cannot parse {:?} as decimal: {}",
                raw, err
            ))),
        }
    }

    /// Convert one float according to this configuration.
    ///
    /// NaN and infinities are non-numeric input.
    pub fn convert_f64(&self, raw: f64) -> SeriesResult<Option<ExactDecimal>> {
        match ExactDecimal::from_f64_with(raw, self.precision) {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.is_lenient() => {
                tracing::warn!("Discarding non-numeric input {}: {}", raw, err);
                Ok(None)
            },
            Err(err) => Err(SeriesError::InvalidArgument(format!(
                "{} is not a finite number: {}",
                raw, err
            ))),
        }
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Strict ingestion at the given precision
    pub fn strict(precision: u32) -> Self {
        Self::new(precision, IngestMode::Strict)
    }

    /// Lenient ingestion at the given precision
    pub fn lenient(precision: u32) -> Self {
        Self::new(precision, IngestMode::Lenient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_config_creation() {
        let config = DecimalConfig::default();
        assert_eq!(config.precision, 28);
        assert_eq!(config.ingest_mode, IngestMode::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DecimalConfig::default()
            .with_precision(10)
            .with_ingest_mode(IngestMode::Lenient);

        assert_eq!(config.precision, 10);
        assert!(config.is_lenient());
        assert_eq!(config, DecimalConfig::lenient(10));
    }

    #[test]
    fn test_validation() {
        assert!(DecimalConfig::strict(0).validate().is_err());
        assert!(DecimalConfig::strict(29).validate().is_err());
        assert!(DecimalConfig::strict(1).validate().is_ok());
    }

    #[test]
    fn test_parse_value_strict() {
        let config = DecimalConfig::strict(5);
        assert_eq!(
            config.parse_value("3.14159265").unwrap(),
            Some("3.1416".parse().unwrap())
        );
        let err = config.parse_value("abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    }

    #[test]
    fn test_parse_value_lenient() {
        let config = DecimalConfig::lenient(28);
        assert_eq!(config.parse_value("abc").unwrap(), None);
        assert_eq!(config.convert_f64(f64::NAN).unwrap(), None);
    }

    #[test]
    fn test_convert_f64_strict() {
        let config = DecimalConfig::default();
        let err = config.convert_f64(f64::INFINITY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
