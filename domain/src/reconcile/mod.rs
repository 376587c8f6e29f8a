//! Reconciliation of a quiz aggregate against a patch.
//!
//! The same three-phase algorithm runs at both nesting levels:
//!
//! 1. **Remove** - nodes listed in the removal set are tombstoned.
//! 2. **Update** - `Update` entries are matched by id against the kept nodes.
//! 3. **Insert** - `Insert` entries become new id-less nodes, appended in
//!    patch order after the kept nodes.
//!
//! [`reconcile`] implements it once over any [`Reconcilable`] node type;
//! [`answer::reconcile_answers`] and [`question::reconcile_questions`] are
//! the two instantiations and [`applier::QuizPatchApplier`] is the entry point.

pub mod answer;
pub mod applier;
pub mod limits;
pub mod question;

use crate::core::error::{DomainError, EntityKind};
use crate::patch::entities::NodePatch;
use limits::PatchLimits;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

/// A child node that can be reconciled against a list of [`NodePatch`] entries.
pub trait Reconcilable: Sized {
    type Id: Clone + Eq + Hash + Display;
    type Fields;

    /// Entity kind reported in errors.
    const KIND: EntityKind;

    fn id(&self) -> Option<&Self::Id>;

    /// Apply the present fields over this node.
    fn apply_update(
        &mut self,
        fields: Self::Fields,
        limits: &PatchLimits,
    ) -> Result<(), DomainError>;

    /// Build a new, id-less node.
    fn create(fields: Self::Fields, limits: &PatchLimits) -> Result<Self, DomainError>;
}

/// Reconcile `existing` against a removal set and a patch list.
///
/// Fails without producing a partial result:
/// - `InvalidPatch` if an id is both removed and targeted, or targeted twice
/// - `NotFound` if a removal or update id is not among `existing`
/// - `InvalidPatch` from node validation, prefixed with the offending entry
pub fn reconcile<N: Reconcilable>(
    existing: Vec<N>,
    remove_ids: &[N::Id],
    patches: Vec<NodePatch<N::Id, N::Fields>>,
    limits: &PatchLimits,
) -> Result<Vec<N>, DomainError> {
    let removed: HashSet<&N::Id> = remove_ids.iter().collect();

    let mut targeted = HashSet::new();
    for id in patches.iter().filter_map(NodePatch::target_id) {
        if removed.contains(id) {
            return Err(DomainError::invalid(format!(
                "{} {} is both removed and updated",
                N::KIND,
                id
            )));
        }
        if !targeted.insert(id) {
            return Err(DomainError::invalid(format!(
                "{} {} is updated more than once",
                N::KIND,
                id
            )));
        }
    }

    for id in remove_ids {
        if !existing.iter().any(|node| node.id() == Some(id)) {
            return Err(DomainError::not_found(N::KIND, id));
        }
    }

    let mut kept: Vec<N> = existing
        .into_iter()
        .filter(|node| node.id().is_none_or(|id| !removed.contains(id)))
        .collect();

    let mut index: HashMap<N::Id, usize> = HashMap::with_capacity(kept.len());
    for (position, node) in kept.iter().enumerate() {
        if let Some(id) = node.id()
            && index.insert(id.clone(), position).is_some()
        {
            return Err(DomainError::CorruptAggregate(format!(
                "duplicate {} id {}",
                N::KIND,
                id
            )));
        }
    }

    let mut inserted = Vec::new();
    for (position, patch) in patches.into_iter().enumerate() {
        match patch {
            NodePatch::Update { id, fields } => {
                let slot = *index
                    .get(&id)
                    .ok_or_else(|| DomainError::not_found(N::KIND, &id))?;
                kept[slot]
                    .apply_update(fields, limits)
                    .map_err(|e| e.within(format!("{} {}", N::KIND, id)))?;
            }
            NodePatch::Insert { fields } => {
                let node = N::create(fields, limits)
                    .map_err(|e| e.within(format!("new {} #{}", N::KIND, position + 1)))?;
                inserted.push(node);
            }
        }
    }

    kept.extend(inserted);
    Ok(kept)
}
