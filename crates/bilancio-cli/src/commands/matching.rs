use bilancio_core::MatchingType;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct MatchingRow {
    value: MatchingType,
    label: &'static str,
    tier: &'static str,
    default: bool,
}

/// Handle `bilancio matching`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&rows(), flags.format)
}

fn rows() -> Vec<MatchingRow> {
    MatchingType::ALL
        .into_iter()
        .map(|matching| MatchingRow {
            value: matching,
            label: matching.label(),
            tier: if matching.is_premium() { "premium" } else { "base" },
            default: matching == MatchingType::default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bilancio_core::MatchingType;
    use pretty_assertions::assert_eq;

    use super::rows;

    #[test]
    fn fuzzy_is_the_only_base_default() {
        let rows = rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value, MatchingType::Fuzzy);
        assert_eq!(rows[0].tier, "base");
        assert!(rows[0].default);
        assert!(rows[1..].iter().all(|row| row.tier == "premium" && !row.default));
    }
}
