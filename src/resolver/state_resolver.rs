//! Block state to model variant resolution.

use crate::asset_store::{
    blockstate::variant_key_matches, AssetStore, BlockstateDefinition, ModelVariant, MultipartCase,
};
use crate::error::{CompactorError, Result};
use crate::types::InputBlock;
use rand::seq::SliceRandom;
use rand::Rng;

/// Resolves block states to model variants.
pub struct StateResolver<'a> {
    store: &'a AssetStore,
}

impl<'a> StateResolver<'a> {
    pub fn new(store: &'a AssetStore) -> Self {
        Self { store }
    }

    /// Resolve a block to its applicable model variants.
    ///
    /// Random choices among variant lists are drawn from `rng`; callers seed
    /// it so resolution is reproducible.
    pub fn resolve<R: Rng>(&self, block: &InputBlock, rng: &mut R) -> Result<Vec<ModelVariant>> {
        let blockstate = self
            .store
            .get_blockstate(&block.name)
            .ok_or_else(|| CompactorError::BlockstateNotFound(block.name.clone()))?;

        match blockstate {
            BlockstateDefinition::Variants(variants) => self.resolve_variants(variants, block, rng),
            BlockstateDefinition::Multipart(cases) => self.resolve_multipart(cases, block, rng),
        }
    }

    /// Resolve using the variants format.
    ///
    /// Keys are checked in document order under restrict-then-compare; the
    /// first matching key wins. A list value is a random choice.
    fn resolve_variants<R: Rng>(
        &self,
        variants: &[(String, Vec<ModelVariant>)],
        block: &InputBlock,
        rng: &mut R,
    ) -> Result<Vec<ModelVariant>> {
        for (key, candidates) in variants {
            if !variant_key_matches(key, &block.properties) {
                continue;
            }

            let chosen = candidates
                .choose(rng)
                .ok_or_else(|| self.variant_not_found(block))?;
            return Ok(vec![chosen.clone()]);
        }

        Err(self.variant_not_found(block))
    }

    /// Resolve using the multipart format.
    ///
    /// Each rule is evaluated independently; a rule without a condition
    /// always applies, a rule with one applies only when every condition key
    /// matches. No matching rule is not an error — the empty selection flows
    /// into the elementless-block fallback downstream.
    fn resolve_multipart<R: Rng>(
        &self,
        cases: &[MultipartCase],
        block: &InputBlock,
        rng: &mut R,
    ) -> Result<Vec<ModelVariant>> {
        let mut result = Vec::new();

        for case in cases {
            let applies = match &case.when {
                Some(condition) => condition.matches(&block.properties),
                None => true,
            };

            if applies {
                if let Some(variant) = case.apply.variants().choose(rng) {
                    result.push(variant.clone());
                }
            }
        }

        Ok(result)
    }

    fn variant_not_found(&self, block: &InputBlock) -> CompactorError {
        let mut properties: Vec<(String, String)> = block
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        properties.sort();
        CompactorError::VariantNotFound {
            block: block.name.clone(),
            properties,
        }
    }
}
