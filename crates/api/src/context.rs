use obesity_core::InputPolicy;
use obesity_model::ModelStore;

/// Everything a prediction request needs, built once at startup.
///
/// Immutable and shared behind an `Arc`; handlers get it through an `Extension`.
pub struct InferenceContext {
    store: ModelStore,
    policy: InputPolicy,
}

impl InferenceContext {
    pub fn new(store: ModelStore, policy: InputPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }
}
