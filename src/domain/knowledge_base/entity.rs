//! Knowledge base rows.

use std::collections::BTreeMap;

use crate::domain::dialogue::SlotMap;
use crate::domain::foundation::EntityId;

/// Immutable table of entities, each a slot to value map.
///
/// Iteration is always in ascending entity id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entities: BTreeMap<EntityId, SlotMap>,
}

impl KnowledgeBase {
    /// Creates a knowledge base from its rows.
    pub fn new(entities: BTreeMap<EntityId, SlotMap>) -> Self {
        Self { entities }
    }

    /// Creates a knowledge base from raw `(id, slots)` pairs.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (u64, SlotMap)>,
    {
        Self {
            entities: rows
                .into_iter()
                .map(|(id, slots)| (EntityId::new(id), slots))
                .collect(),
        }
    }

    /// Returns the slots of an entity.
    pub fn get(&self, id: EntityId) -> Option<&SlotMap> {
        self.entities.get(&id)
    }

    /// Iterates over all entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &SlotMap)> {
        self.entities.iter().map(|(id, slots)| (*id, slots))
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the knowledge base holds no entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> SlotMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn iterates_in_id_order() {
        let kb = KnowledgeBase::from_rows(vec![
            (10, row(&[("date", "today")])),
            (2, row(&[("date", "tomorrow")])),
        ]);
        let ids: Vec<u64> = kb.iter().map(|(id, _)| id.value()).collect();
        assert_eq!(ids, vec![2, 10]);
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn get_returns_slots() {
        let kb = KnowledgeBase::from_rows(vec![(1, row(&[("moviename", "deadpool")]))]);
        let slots = kb.get(EntityId::new(1)).unwrap();
        assert_eq!(slots.get("moviename").map(String::as_str), Some("deadpool"));
        assert!(kb.get(EntityId::new(2)).is_none());
    }
}
