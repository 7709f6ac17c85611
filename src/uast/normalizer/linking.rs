use rustc_hash::FxHashSet;

use super::declarations::ConstantEntry;
use super::{AbstractIndex, Collected, EnumNormalizer, Observation, OverrideLink};
use crate::frontend::Frontend;
use crate::uast::node::NodePath;

impl<F: Frontend> EnumNormalizer<'_, '_, F> {
    /// Match constant body methods against the abstract members of the enum
    /// declared at `owner`. Every constant is linked independently.
    pub(super) fn link(
        &self,
        owner: &NodePath,
        constants: &[ConstantEntry],
        abstracts: &AbstractIndex,
        out: &mut Collected,
    ) {
        for constant in constants.iter().filter(|c| c.has_body) {
            let mut implemented = FxHashSet::default();

            for method in &constant.methods {
                let Some(abstract_path) = abstracts.get(&method.key) else {
                    tracing::warn!(
                        "[LINK] unresolved override {} in constant {}",
                        method.key,
                        constant.name
                    );
                    out.observations.push(Observation::UnresolvedOverride {
                        constant: constant.name.clone(),
                        ordinal: constant.ordinal,
                        key: method.key.clone(),
                        range: method.range,
                    });
                    continue;
                };

                tracing::trace!(
                    "[LINK] {} {} -> {}#{} {}",
                    method.key,
                    abstract_path,
                    constant.name,
                    constant.ordinal,
                    method.path
                );
                implemented.insert(&method.key);
                out.links.push(OverrideLink {
                    key: method.key.clone(),
                    constant: constant.name.clone(),
                    ordinal: constant.ordinal,
                    owner: owner.clone(),
                    abstract_path: abstract_path.clone(),
                    implementation_path: method.path.clone(),
                });
            }

            if !self.config.report_missing_implementations {
                continue;
            }
            for key in abstracts.keys().filter(|k| !implemented.contains(k)) {
                tracing::debug!("[LINK] constant {} does not implement {}", constant.name, key);
                out.observations.push(Observation::MissingImplementation {
                    constant: constant.name.clone(),
                    ordinal: constant.ordinal,
                    key: key.clone(),
                    range: constant.range,
                });
            }
        }
    }
}
