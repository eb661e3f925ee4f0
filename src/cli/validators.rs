//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse a strictly positive, finite float.
pub fn parse_positive_float(s: &str, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be a positive number, got {value}"));
    }

    Ok(value)
}

/// Parse and validate the timeline rate (points per second).
pub fn parse_timeline_rate(s: &str) -> Result<f64, String> {
    parse_positive_float(s, "timeline rate")
}

/// Parse and validate the export cadence (N >= 1).
pub fn parse_export_every(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;

    if value == 0 {
        return Err("export cadence must be at least 1".to_string());
    }

    Ok(value)
}

/// Accept `edf` or `.edf`, returning the extension without the dot.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.strip_prefix('.').unwrap_or(s);
    if ext.is_empty() {
        return Err("extension must not be empty".to_string());
    }
    Ok(ext.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeline_rate_valid() {
        assert_eq!(parse_timeline_rate("10").ok(), Some(10.0));
        assert_eq!(parse_timeline_rate("0.5").ok(), Some(0.5));
    }

    #[test]
    fn test_parse_timeline_rate_invalid() {
        assert!(parse_timeline_rate("0").is_err());
        assert!(parse_timeline_rate("-3").is_err());
        assert!(parse_timeline_rate("inf").is_err());
        assert!(parse_timeline_rate("NaN").is_err());
        assert!(parse_timeline_rate("fast").is_err());
    }

    #[test]
    fn test_parse_positive_float_names_parameter() {
        let err = parse_positive_float("-1", "spacing").unwrap_err();
        assert!(err.contains("spacing must be a positive number"));
    }

    #[test]
    fn test_parse_export_every() {
        assert_eq!(parse_export_every("1").ok(), Some(1));
        assert_eq!(parse_export_every("25").ok(), Some(25));
        assert!(parse_export_every("0").is_err());
        assert!(parse_export_every("-2").is_err());
    }

    #[test]
    fn test_parse_extension_strips_dot() {
        assert_eq!(parse_extension(".EDF").unwrap(), "EDF");
        assert_eq!(parse_extension("bdf").unwrap(), "bdf");
        assert!(parse_extension(".").is_err());
        assert!(parse_extension("").is_err());
    }
}
