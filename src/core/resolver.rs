//! Operator capability resolution
//!
//! This module provides the `CapabilityResolver`, the read-only registry
//! mapping an operator type to its capability bundle.
//!
//! # Invariants
//!
//! - Registration happens once, at construction; the mapping never
//!   mutates afterwards, so concurrent resolution needs no locking.
//! - Construction fails fast on a duplicate family, an empty registry, or
//!   a bundle whose members disagree on the operator family. A resolved
//!   bundle is therefore always family-consistent.

use crate::operators::{builtin_bundle, CapabilityBundle};
use crate::types::{EngineError, OperatorType};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only registry of operator capability bundles
///
/// Built once at process start and shared (it is cheap to wrap in an
/// `Arc`) by every component that needs operator behavior.
#[derive(Debug)]
pub struct CapabilityResolver {
    /// Registered bundles, ordered by operator type
    bundles: BTreeMap<OperatorType, Arc<CapabilityBundle>>,
}

impl CapabilityResolver {
    /// Build a resolver from one bundle per operator type
    ///
    /// # Arguments
    ///
    /// * `bundles` - The capability bundles to register
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No bundle is supplied (`EmptyRegistry`)
    /// - Two bundles claim the same operator type (`DuplicateOperator`)
    /// - A bundle member reports a different operator family than the
    ///   bundle's operator (`InconsistentBundle`)
    pub fn new(bundles: impl IntoIterator<Item = CapabilityBundle>) -> Result<Self, EngineError> {
        let mut registry = BTreeMap::new();

        for bundle in bundles {
            if let Some(member_family) = bundle.mismatched_member() {
                return Err(EngineError::inconsistent_bundle(
                    bundle.operator,
                    member_family,
                ));
            }
            let operator = bundle.operator;
            if registry.insert(operator, Arc::new(bundle)).is_some() {
                return Err(EngineError::duplicate_operator(operator));
            }
        }

        if registry.is_empty() {
            return Err(EngineError::EmptyRegistry);
        }

        Ok(CapabilityResolver { bundles: registry })
    }

    /// Build a resolver with the three builtin operator families
    ///
    /// Registers Bank, Mobile Money and Microfinance. The builtin bundles
    /// are family-consistent by construction, so this cannot fail.
    pub fn with_builtin_operators() -> Self {
        let bundles = OperatorType::ALL
            .into_iter()
            .map(|operator| (operator, Arc::new(builtin_bundle(operator))))
            .collect();
        CapabilityResolver { bundles }
    }

    /// Resolve the capability bundle for an operator type
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator type to look up
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperator` if no bundle is registered for the
    /// type.
    pub fn resolve(&self, operator: OperatorType) -> Result<Arc<CapabilityBundle>, EngineError> {
        self.bundles
            .get(&operator)
            .cloned()
            .ok_or_else(|| EngineError::unsupported_operator(operator))
    }

    /// Check whether an operator type is registered
    pub fn is_supported(&self, operator: OperatorType) -> bool {
        self.bundles.contains_key(&operator)
    }

    /// Registered operator types, in enum order
    pub fn supported_operators(&self) -> Vec<OperatorType> {
        self.bundles.keys().copied().collect()
    }
}
