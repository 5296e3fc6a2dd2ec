/// Runs `$block` and logs how long it took at debug level.
#[macro_export]
macro_rules! timer_debug {
    ($label:literal, $block:expr) => {{
        let started_at = jiff::Timestamp::now();
        let value = $block;
        tracing::debug!(
            elapsed = ?jiff::Timestamp::now().duration_since(started_at),
            "{} finished",
            $label
        );
        value
    }};
}
