//! Constraint queries against the knowledge base.
//!
//! Every query is memoized by its canonical constraint set. Matching is
//! case-insensitive on values and fails closed: an entity lacking a
//! constrained slot never matches.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::SlotMap;
use crate::domain::foundation::sentinels::{
    CLOSING_SLOT, I_DO_NOT_CARE, NO_VALUE_MATCH, TASK_COMPLETE_SLOT, TICKET_AVAILABLE,
};
use crate::domain::foundation::EntityId;

use super::cache::{CacheEntry, ConstraintKey, QueryCache};
use super::KnowledgeBase;

/// Slot roles the engine needs to know about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbQueryConfig {
    /// The slot whose availability decides task success (e.g. `ticket`).
    pub ultimate_slot: String,
    /// Slots answered from the user's own constraints rather than the KB.
    #[serde(default)]
    pub special_slots: BTreeSet<String>,
    /// Slots never used for entity matching.
    #[serde(default)]
    pub filter_slots: BTreeSet<String>,
}

/// Per-slot and aggregate match counts for a constraint set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotCounts {
    /// Number of entities matching each individual constraint.
    pub per_slot: BTreeMap<String, usize>,
    /// Number of entities matching every constraint at once.
    pub matching_all: usize,
}

impl SlotCounts {
    /// Count for a single constraint slot, zero if the slot was not
    /// constrained.
    pub fn count(&self, slot: &str) -> usize {
        self.per_slot.get(slot).copied().unwrap_or(0)
    }
}

type EntitySet = Arc<[EntityId]>;

/// Memoizing query engine over an immutable knowledge base.
///
/// The engine is `Sync`; share it with `Arc` between trackers running on
/// different threads.
#[derive(Debug)]
pub struct KbQueryEngine {
    kb: KnowledgeBase,
    config: KbQueryConfig,
    entity_cache: QueryCache<EntitySet>,
    counts_cache: QueryCache<SlotCounts>,
}

impl KbQueryEngine {
    pub fn new(kb: KnowledgeBase, config: KbQueryConfig) -> Self {
        Self {
            kb,
            config,
            entity_cache: QueryCache::new(),
            counts_cache: QueryCache::new(),
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &KbQueryConfig {
        &self.config
    }

    /// Returns the ids of every entity satisfying the constraints, in
    /// ascending id order.
    ///
    /// Filter slots and "I do not care" values are ignored, so an empty
    /// effective constraint set matches every entity.
    pub fn matching_entities(&self, constraints: &SlotMap) -> EntitySet {
        let key = self.effective_key(constraints);
        let entry = match self.entity_cache.get(&key) {
            CacheEntry::Absent => {
                tracing::debug!(constraints = ?key.pairs(), "kb entity cache miss");
                let computed = self.compute_matches(&key);
                self.entity_cache.insert(key, computed)
            }
            hit => hit,
        };
        match entry {
            CacheEntry::Present(ids) => ids,
            CacheEntry::Empty | CacheEntry::Absent => Arc::from(Vec::new()),
        }
    }

    /// Returns the cached state of an entity query without computing it.
    pub fn cached_matches(&self, constraints: &SlotMap) -> CacheEntry<EntitySet> {
        self.entity_cache.get(&self.effective_key(constraints))
    }

    /// Counts how often each value of `slot` occurs among `entities`.
    ///
    /// Values are listed in first-seen order, scanning entities in the order
    /// given. Entities lacking the slot are skipped.
    pub fn slot_value_frequencies(&self, slot: &str, entities: &[EntityId]) -> Vec<(String, usize)> {
        let mut frequencies: Vec<(String, usize)> = Vec::new();
        for value in entities
            .iter()
            .filter_map(|id| self.kb.get(*id))
            .filter_map(|slots| slots.get(slot))
        {
            match frequencies.iter_mut().find(|(seen, _)| seen == value) {
                Some((_, count)) => *count += 1,
                None => frequencies.push((value.clone(), 1)),
            }
        }
        frequencies
    }

    /// Resolves the agent's inform slots against the knowledge base.
    ///
    /// `current_inform` is the tracker's accumulated inform slots; they are the
    /// constraints the fill is computed under.
    pub fn fill_inform_slots(&self, slots_to_fill: &SlotMap, current_inform: &SlotMap) -> SlotMap {
        let task_complete = slots_to_fill.contains_key(TASK_COMPLETE_SLOT);
        let mut filled = if task_complete {
            current_inform.clone()
        } else {
            SlotMap::new()
        };

        let matches = self.matching_entities(current_inform);

        for slot in slots_to_fill.keys() {
            if self.config.special_slots.contains(slot) {
                let value = current_inform
                    .get(slot)
                    .or_else(|| slots_to_fill.get(slot))
                    .cloned()
                    .unwrap_or_default();
                filled.insert(slot.clone(), value);
                continue;
            }

            if *slot == self.config.ultimate_slot || slot == TASK_COMPLETE_SLOT {
                let value = if matches.is_empty() {
                    NO_VALUE_MATCH
                } else {
                    TICKET_AVAILABLE
                };
                filled.insert(slot.clone(), value.to_string());
                continue;
            }

            if slot == CLOSING_SLOT {
                continue;
            }

            let value = most_frequent(self.slot_value_frequencies(slot, &matches))
                .unwrap_or_else(|| NO_VALUE_MATCH.to_string());
            filled.insert(slot.clone(), value);
        }

        filled
    }

    /// Counts entities matching each constraint individually and all of them
    /// together.
    ///
    /// The ultimate slot and "I do not care" values are reported with a zero
    /// count and do not affect the aggregate.
    pub fn counts_per_slot(&self, constraints: &SlotMap) -> SlotCounts {
        let key = ConstraintKey::from_pairs(constraints);
        if let CacheEntry::Present(counts) = self.counts_cache.get(&key) {
            return counts;
        }
        tracing::debug!(constraints = ?key.pairs(), "kb count cache miss");

        let mut counts = SlotCounts {
            per_slot: constraints.keys().map(|slot| (slot.clone(), 0)).collect(),
            matching_all: 0,
        };

        for (_, entity) in self.kb.iter() {
            let mut all_match = true;
            for (slot, value) in constraints {
                if *slot == self.config.ultimate_slot || value == I_DO_NOT_CARE {
                    continue;
                }
                match entity.get(slot) {
                    Some(actual) if values_match(actual, value) => {
                        *counts.per_slot.entry(slot.clone()).or_insert(0) += 1;
                    }
                    _ => all_match = false,
                }
            }
            if all_match {
                counts.matching_all += 1;
            }
        }

        match self.counts_cache.insert(key, CacheEntry::Present(counts.clone())) {
            CacheEntry::Present(cached) => cached,
            CacheEntry::Empty | CacheEntry::Absent => counts,
        }
    }

    /// Lists candidate values for each requested slot among the entities
    /// matching the current constraints, most frequent first.
    pub fn suggest_slot_values(
        &self,
        request_slots: &SlotMap,
        current_inform: &SlotMap,
    ) -> BTreeMap<String, Vec<String>> {
        let matches = self.matching_entities(current_inform);
        request_slots
            .keys()
            .map(|slot| {
                let mut frequencies = self.slot_value_frequencies(slot, &matches);
                frequencies.sort_by(|a, b| b.1.cmp(&a.1));
                let values = frequencies.into_iter().map(|(value, _)| value).collect();
                (slot.clone(), values)
            })
            .collect()
    }

    fn effective_key(&self, constraints: &SlotMap) -> ConstraintKey {
        ConstraintKey::from_pairs(constraints.iter().filter(|(slot, value)| {
            !self.config.filter_slots.contains(*slot) && value.as_str() != I_DO_NOT_CARE
        }))
    }

    fn compute_matches(&self, key: &ConstraintKey) -> CacheEntry<EntitySet> {
        let ids: Vec<EntityId> = self
            .kb
            .iter()
            .filter(|(_, entity)| {
                key.pairs().iter().all(|(slot, value)| {
                    entity
                        .get(slot)
                        .map(|actual| values_match(actual, value))
                        .unwrap_or(false)
                })
            })
            .map(|(id, _)| id)
            .collect();

        if ids.is_empty() {
            CacheEntry::Empty
        } else {
            CacheEntry::Present(Arc::from(ids))
        }
    }
}

fn values_match(actual: &str, wanted: &str) -> bool {
    actual.to_lowercase() == wanted.to_lowercase()
}

/// Highest count wins; ties go to the value seen first.
fn most_frequent(frequencies: Vec<(String, usize)>) -> Option<String> {
    let mut best: Option<(String, usize)> = None;
    for (value, count) in frequencies {
        if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> SlotMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn movie_config() -> KbQueryConfig {
        KbQueryConfig {
            ultimate_slot: "ticket".to_string(),
            special_slots: ["numberofpeople".to_string()].into_iter().collect(),
            filter_slots: ["ticket", "numberofpeople", "taskcomplete", "closing"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn deadpool_engine() -> KbQueryEngine {
        let kb = KnowledgeBase::from_rows(vec![
            (1, slots(&[("moviename", "deadpool"), ("date", "today")])),
            (2, slots(&[("moviename", "deadpool"), ("date", "tomorrow")])),
        ]);
        KbQueryEngine::new(kb, movie_config())
    }

    fn ids(set: &[EntityId]) -> Vec<u64> {
        set.iter().map(|id| id.value()).collect()
    }

    mod matching {
        use super::*;

        #[test]
        fn matches_all_entities_with_constraint() {
            let engine = deadpool_engine();
            let found = engine.matching_entities(&slots(&[("moviename", "deadpool")]));
            assert_eq!(ids(&found), vec![1, 2]);
        }

        #[test]
        fn matching_is_case_insensitive() {
            let engine = deadpool_engine();
            let found = engine.matching_entities(&slots(&[("moviename", "DeadPool"), ("date", "TODAY")]));
            assert_eq!(ids(&found), vec![1]);
        }

        #[test]
        fn entity_missing_slot_does_not_match() {
            let engine = deadpool_engine();
            let found = engine.matching_entities(&slots(&[("city", "seattle")]));
            assert!(found.is_empty());
        }

        #[test]
        fn filter_slots_and_dont_care_are_ignored() {
            let engine = deadpool_engine();
            let found = engine.matching_entities(&slots(&[
                ("moviename", "deadpool"),
                ("ticket", "UNK"),
                ("numberofpeople", "2"),
                ("date", "I do not care"),
            ]));
            assert_eq!(ids(&found), vec![1, 2]);
        }

        #[test]
        fn empty_constraints_match_everything() {
            let engine = deadpool_engine();
            assert_eq!(ids(&engine.matching_entities(&SlotMap::new())), vec![1, 2]);
        }
    }

    mod caching {
        use super::*;

        #[test]
        fn query_is_absent_until_computed() {
            let engine = deadpool_engine();
            let constraints = slots(&[("moviename", "deadpool")]);
            assert_eq!(engine.cached_matches(&constraints), CacheEntry::Absent);
            engine.matching_entities(&constraints);
            assert!(matches!(engine.cached_matches(&constraints), CacheEntry::Present(_)));
        }

        #[test]
        fn empty_result_is_cached_as_empty() {
            let engine = deadpool_engine();
            let constraints = slots(&[("moviename", "zootopia")]);
            assert!(engine.matching_entities(&constraints).is_empty());
            assert_eq!(engine.cached_matches(&constraints), CacheEntry::Empty);
            assert!(engine.matching_entities(&constraints).is_empty());
        }

        #[test]
        fn repeated_queries_return_identical_results() {
            let engine = deadpool_engine();
            let constraints = slots(&[("moviename", "deadpool")]);
            let first = engine.matching_entities(&constraints);
            let second = engine.matching_entities(&constraints);
            assert_eq!(first, second);

            let counts_first = engine.counts_per_slot(&constraints);
            let counts_second = engine.counts_per_slot(&constraints);
            assert_eq!(counts_first, counts_second);
        }

        #[test]
        fn filter_slots_share_cache_entry() {
            let engine = deadpool_engine();
            engine.matching_entities(&slots(&[("moviename", "deadpool")]));
            let with_filtered = slots(&[("moviename", "deadpool"), ("ticket", "UNK")]);
            assert!(engine.cached_matches(&with_filtered).is_computed());
        }
    }

    mod filling {
        use super::*;

        #[test]
        fn fills_regular_slot_with_most_frequent_value() {
            let engine = deadpool_engine();
            let filled = engine.fill_inform_slots(
                &slots(&[("date", "PLACEHOLDER")]),
                &slots(&[("moviename", "deadpool")]),
            );
            assert_eq!(filled, slots(&[("date", "today")]));
        }

        #[test]
        fn tie_goes_to_lowest_entity_id() {
            let kb = KnowledgeBase::from_rows(vec![
                (7, slots(&[("theater", "regal")])),
                (3, slots(&[("theater", "amc")])),
                (9, slots(&[("theater", "regal")])),
                (4, slots(&[("theater", "amc")])),
            ]);
            let engine = KbQueryEngine::new(kb, movie_config());
            let filled = engine.fill_inform_slots(&slots(&[("theater", "PLACEHOLDER")]), &SlotMap::new());
            assert_eq!(filled.get("theater").map(String::as_str), Some("amc"));
        }

        #[test]
        fn unmatched_slot_gets_no_value_match() {
            let engine = deadpool_engine();
            let filled = engine.fill_inform_slots(
                &slots(&[("date", "PLACEHOLDER")]),
                &slots(&[("moviename", "zootopia")]),
            );
            assert_eq!(filled.get("date").map(String::as_str), Some(NO_VALUE_MATCH));
        }

        #[test]
        fn ultimate_slot_reports_availability() {
            let engine = deadpool_engine();
            let available = engine.fill_inform_slots(
                &slots(&[("ticket", "PLACEHOLDER")]),
                &slots(&[("moviename", "deadpool")]),
            );
            assert_eq!(available.get("ticket").map(String::as_str), Some(TICKET_AVAILABLE));

            let unavailable = engine.fill_inform_slots(
                &slots(&[("ticket", "PLACEHOLDER")]),
                &slots(&[("moviename", "zootopia")]),
            );
            assert_eq!(unavailable.get("ticket").map(String::as_str), Some(NO_VALUE_MATCH));
        }

        #[test]
        fn task_complete_copies_current_constraints() {
            let engine = deadpool_engine();
            let filled = engine.fill_inform_slots(
                &slots(&[("taskcomplete", "PLACEHOLDER")]),
                &slots(&[("moviename", "deadpool"), ("date", "today")]),
            );
            assert_eq!(
                filled,
                slots(&[
                    ("moviename", "deadpool"),
                    ("date", "today"),
                    ("taskcomplete", TICKET_AVAILABLE)
                ])
            );
        }

        #[test]
        fn special_slot_uses_known_value_or_supplied_one() {
            let engine = deadpool_engine();
            let known = engine.fill_inform_slots(
                &slots(&[("numberofpeople", "PLACEHOLDER")]),
                &slots(&[("numberofpeople", "3")]),
            );
            assert_eq!(known.get("numberofpeople").map(String::as_str), Some("3"));

            let unknown = engine.fill_inform_slots(&slots(&[("numberofpeople", "PLACEHOLDER")]), &SlotMap::new());
            assert_eq!(unknown.get("numberofpeople").map(String::as_str), Some("PLACEHOLDER"));
        }

        #[test]
        fn closing_is_never_filled() {
            let engine = deadpool_engine();
            let filled = engine.fill_inform_slots(&slots(&[("closing", "PLACEHOLDER")]), &SlotMap::new());
            assert!(filled.is_empty());
        }
    }

    mod counting {
        use super::*;

        #[test]
        fn counts_each_constraint_and_the_aggregate() {
            let engine = deadpool_engine();
            let counts = engine.counts_per_slot(&slots(&[("moviename", "deadpool"), ("date", "today")]));
            assert_eq!(counts.count("moviename"), 2);
            assert_eq!(counts.count("date"), 1);
            assert_eq!(counts.matching_all, 1);
        }

        #[test]
        fn ultimate_and_dont_care_report_zero() {
            let engine = deadpool_engine();
            let counts = engine.counts_per_slot(&slots(&[
                ("moviename", "deadpool"),
                ("ticket", "UNK"),
                ("date", "I do not care"),
            ]));
            assert_eq!(counts.count("ticket"), 0);
            assert_eq!(counts.count("date"), 0);
            assert_eq!(counts.matching_all, 2);
            assert!(counts.per_slot.contains_key("ticket"));
        }

        #[test]
        fn missing_slot_breaks_aggregate() {
            let engine = deadpool_engine();
            let counts = engine.counts_per_slot(&slots(&[("moviename", "deadpool"), ("city", "seattle")]));
            assert_eq!(counts.count("moviename"), 2);
            assert_eq!(counts.count("city"), 0);
            assert_eq!(counts.matching_all, 0);
        }

        #[test]
        fn empty_constraints_match_all_entities() {
            let engine = deadpool_engine();
            let counts = engine.counts_per_slot(&SlotMap::new());
            assert!(counts.per_slot.is_empty());
            assert_eq!(counts.matching_all, 2);
        }
    }

    mod suggestions {
        use super::*;

        #[test]
        fn suggests_values_by_descending_frequency() {
            let kb = KnowledgeBase::from_rows(vec![
                (1, slots(&[("city", "seattle"), ("theater", "amc")])),
                (2, slots(&[("city", "seattle"), ("theater", "regal")])),
                (3, slots(&[("city", "seattle"), ("theater", "regal")])),
            ]);
            let engine = KbQueryEngine::new(kb, movie_config());
            let suggestions = engine.suggest_slot_values(
                &slots(&[("theater", "UNK")]),
                &slots(&[("city", "seattle")]),
            );
            assert_eq!(suggestions["theater"], vec!["regal".to_string(), "amc".to_string()]);
        }
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = Arc::new(deadpool_engine());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let engine = Arc::clone(&engine);
                scope.spawn(move || {
                    let found = engine.matching_entities(&slots(&[("moviename", "deadpool")]));
                    assert_eq!(found.len(), 2);
                });
            }
        });
    }
}
