//! Resolves the shortest path between two inventories in a [`Registry`]'s
//! language graph and composes the corresponding [`Transducer`]s into a
//! [`CompositeTransducer`].

use crate::composite::CompositeTransducer;
use crate::error::Result;
use crate::registry::Registry;
use crate::transducer::Transducer;

/// Builds a [`CompositeTransducer`] for `(in_lang, out_lang)` against a
/// [`Registry`].
pub struct PipelineBuilder<'r> {
    registry: &'r Registry,
}

impl<'r> PipelineBuilder<'r> {
    pub fn new(registry: &'r Registry) -> PipelineBuilder<'r> {
        PipelineBuilder { registry }
    }

    /// Resolves `in_lang -> out_lang` and constructs the composite
    /// pipeline. `in_lang == out_lang` yields the identity pipeline
    /// without consulting the graph at all, so it is valid even for an
    /// inventory the registry has never heard of.
    pub fn make(&self, in_lang: &str, out_lang: &str) -> Result<CompositeTransducer> {
        if in_lang == out_lang {
            return Ok(CompositeTransducer::identity());
        }

        let path = self.registry.graph().shortest_path(in_lang, out_lang)?;
        log::debug!("resolved pipeline {in_lang} -> {out_lang}: {path:?}");

        let transducers = path
            .windows(2)
            .map(|pair| {
                let mapping = self.registry.get(&pair[0], &pair[1])?;
                Ok(Transducer::new(mapping.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompositeTransducer::new(transducers))
    }
}
