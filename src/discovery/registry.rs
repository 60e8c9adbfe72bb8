use super::{
    ComposerBasicSource, ComposerSource, DiscoverySource, PhpstanSource, PhpunitSource,
};
use crate::config::{DiscoveryConfig, SourceId};

pub fn source_for(id: SourceId, config: &DiscoveryConfig) -> Box<dyn DiscoverySource> {
    match id {
        SourceId::Composer => Box::new(ComposerSource::new(config)),
        SourceId::ComposerBasic => Box::new(ComposerBasicSource::new(config)),
        SourceId::Phpunit => Box::new(PhpunitSource::new(config)),
        SourceId::Phpstan => Box::new(PhpstanSource::new(config)),
    }
}

/// Enabled sources in configuration order, without repeats.
pub fn sources_from_config(config: &DiscoveryConfig) -> Vec<Box<dyn DiscoverySource>> {
    let mut ids: Vec<SourceId> = Vec::with_capacity(config.sources.len());
    for id in &config.sources {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids.into_iter().map(|id| source_for(id, config)).collect()
}
