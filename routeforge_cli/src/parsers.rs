use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Accepts ISO 8601 (`PT1M`), friendly (`30s`, `5m`, `1h 30m`) and plain seconds.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let duration = parse_signed_duration(input)?;
    if duration.is_negative() {
        return Err(format!("Duration must not be negative: {input}"));
    }
    Ok(duration)
}

fn parse_signed_duration(input: &str) -> Result<SignedDuration, String> {
    if let Ok(duration) = input.parse::<SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(SignedDuration::from_secs(seconds));
    }

    Err(format!("Invalid duration: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Ok(SignedDuration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(SignedDuration::from_mins(5)));
        assert_eq!(parse_duration("PT1M"), Ok(SignedDuration::from_mins(1)));
        assert_eq!(parse_duration("90"), Ok(SignedDuration::from_secs(90)));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_negative() {
        assert!(parse_duration("-30").is_err());
        assert!(parse_duration("-PT1M").is_err());
        assert!(parse_duration(&i64::MIN.to_string()).is_err());
        assert_eq!(parse_duration("0"), Ok(SignedDuration::ZERO));
    }
}
