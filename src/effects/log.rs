//! Play-log formatting.

/// Shown when a play has no victim.
pub const NO_TARGET: &str = "no target";

/// Shown when a play has no recipient.
pub const NO_RECIPIENT: &str = "no one";

/// Fill a card's log template.
///
/// ```
/// use salem_engine::effects::format_play_log;
///
/// let line = format_play_log("{source} played {card} on {target}.", "Anne", "Alibi", None, None);
/// assert_eq!(line, "Anne played Alibi on no target.");
/// ```
#[must_use]
pub fn format_play_log(
    template: &str,
    source: &str,
    card: &str,
    target: Option<&str>,
    recipient: Option<&str>,
) -> String {
    template
        .replace("{source}", source)
        .replace("{card}", card)
        .replace("{target}", target.unwrap_or(NO_TARGET))
        .replace("{recipient}", recipient.unwrap_or(NO_RECIPIENT))
}
