use crate::scoring::SignalBreakdown;

pub const STRONG_CONTENT: &str = "Strong content match";
pub const PARTIAL_CONTENT: &str = "Partial content relevance";
pub const FREQUENT_PAIRING: &str = "Frequently used with similar tags";
pub const POPULAR: &str = "Popular tag";
pub const DIVERSITY: &str = "Improves tag diversity";
pub const PLATFORM: &str = "Platform relevant";
pub const GENERAL: &str = "General relevance";

/// Human-readable justifications in a fixed presentation order:
/// content, co-occurrence, popularity, pillar balance, platform.
pub fn reasons_for(signals: &SignalBreakdown) -> Vec<String> {
    let mut reasons = Vec::new();

    if signals.content > 0.7 {
        reasons.push(STRONG_CONTENT);
    } else if signals.content > 0.4 {
        reasons.push(PARTIAL_CONTENT);
    }
    if signals.co_occurrence > 0.5 {
        reasons.push(FREQUENT_PAIRING);
    }
    if signals.popularity > 0.7 {
        reasons.push(POPULAR);
    }
    if signals.pillar_balance > 0.7 {
        reasons.push(DIVERSITY);
    }
    if signals.platform > 0.7 {
        reasons.push(PLATFORM);
    }

    if reasons.is_empty() {
        reasons.push(GENERAL);
    }
    reasons.into_iter().map(str::to_string).collect()
}
