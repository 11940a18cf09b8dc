//! Macro for implementing Display and FromStr for keyword enums
//!
//! Several domain enums (price status, time granularity, date basis) travel
//! through config files, CLI flags and CSV cells as lowercase keywords. This
//! macro keeps both directions of that conversion in one table.
//!
//! # Example
//!
//! ```rust
//! use dealscope_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ExportFormat {
//!     Json,
//!     Csv,
//!     Html,
//! }
//!
//! impl_domain_status_conversions!(ExportFormat {
//!     Json => "json",
//!     Csv => "csv",
//!     Html => "html",
//! });
//!
//! assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
//! assert_eq!(ExportFormat::Html.to_string(), "html");
//! ```

/// Implements Display and FromStr traits for keyword enums
///
/// This macro generates:
/// - Display trait: writes the keyword for each variant
/// - FromStr trait: parses case-insensitive, whitespace-trimmed keywords
///
/// Keywords must be written in lowercase in the mapping table.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Zone {
        Amba,
        Interior,
    }

    impl_domain_status_conversions!(Zone {
        Amba => "amba",
        Interior => "interior",
    });

    #[test]
    fn displays_keyword() {
        assert_eq!(Zone::Amba.to_string(), "amba");
        assert_eq!(Zone::Interior.to_string(), "interior");
    }

    #[test]
    fn parses_case_insensitively_and_trims() {
        assert_eq!(Zone::from_str("AMBA").unwrap(), Zone::Amba);
        assert_eq!(Zone::from_str("  Interior ").unwrap(), Zone::Interior);
    }

    #[test]
    fn rejects_unknown_keyword() {
        let err = Zone::from_str("patagonia").unwrap_err();
        assert!(err.contains("Invalid Zone: patagonia"));
        assert!(Zone::from_str("").is_err());
    }
}
