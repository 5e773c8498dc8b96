//! @ai:module:intent Apply generator whitelist/blacklist to grouped generators
//! @ai:module:layer application
//! @ai:module:public_api filter_grouped_generators
//! @ai:module:stateless true

use crate::config::FilterConfig;
use crate::metrics::types::GroupedGenerators;

/// @ai:intent Keep whitelisted generators, then drop blacklisted ones; unknown names are ignored
/// @ai:effects pure
pub fn filter_grouped_generators<'a>(
    grouped: &GroupedGenerators<'a>,
    filter: &FilterConfig,
) -> GroupedGenerators<'a> {
    let filtered: GroupedGenerators<'a> = grouped
        .iter()
        .filter(|(name, _)| filter.retains(name))
        .map(|(name, groups)| (*name, *groups))
        .collect();

    tracing::debug!(
        "Filtered generators: {} of {} retained",
        filtered.len(),
        grouped.len()
    );

    filtered
}
