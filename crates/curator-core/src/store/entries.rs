// ── Baseline + delta entry reconciliation ──
//
// The server knows a paginated baseline of list members. Local edits are
// a changeset (added / removed) layered on top. The visible `current`
// list and its count are always recomputed from those four fields and
// are never edited directly.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::model::{Entry, EntryId};

/// Entries of the list being edited, with the pending delta applied.
///
/// Every operation returns a new value; `current` and
/// `current_total_count` are pure functions of the other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntriesState {
    /// Entries loaded from the server so far, in server order.
    baseline: Vec<Entry>,

    /// Total reported by the list summary (may exceed loaded pages).
    baseline_total_count: usize,

    /// Entries added locally, in insertion order.
    added: IndexMap<EntryId, Entry>,

    /// Ids removed locally.
    removed: IndexSet<EntryId>,

    /// Derived: `reverse(added) ++ baseline - removed`.
    current: Vec<Entry>,

    /// Derived: adjusted total, never below `current.len()`.
    current_total_count: usize,
}

impl EntriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state for a list the server reports as holding `total` entries.
    pub fn with_total_count(total: usize) -> Self {
        Self {
            baseline_total_count: total,
            ..Self::default()
        }
        .recompute()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn baseline(&self) -> &[Entry] {
        &self.baseline
    }

    pub fn baseline_total_count(&self) -> usize {
        self.baseline_total_count
    }

    pub fn added(&self) -> &IndexMap<EntryId, Entry> {
        &self.added
    }

    pub fn removed(&self) -> &IndexSet<EntryId> {
        &self.removed
    }

    pub fn current(&self) -> &[Entry] {
        &self.current
    }

    pub fn current_total_count(&self) -> usize {
        self.current_total_count
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    pub fn in_baseline(&self, id: &EntryId) -> bool {
        self.baseline.iter().any(|entry| &entry.id == id)
    }

    /// Full baseline records for every locally removed id.
    pub fn removed_entries(&self) -> Vec<Entry> {
        self.baseline
            .iter()
            .filter(|entry| self.removed.contains(&entry.id))
            .cloned()
            .collect()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Replace the baseline with a fresh first page, or append a further page.
    ///
    /// Locally added entries that turn out to be in the baseline already are
    /// dropped from the changeset so the derived view never holds duplicates.
    pub fn load_page(&self, entries: Vec<Entry>, append: bool) -> Self {
        let mut next = self.clone();
        if append {
            next.baseline.extend(entries);
        } else {
            next.baseline = entries;
        }
        let baseline_ids: IndexSet<EntryId> =
            next.baseline.iter().map(|entry| entry.id.clone()).collect();
        next.added.retain(|id, _| !baseline_ids.contains(id));
        next.recompute()
    }

    /// Update the server-reported total without touching the delta.
    pub fn with_baseline_total_count(&self, total: usize) -> Self {
        let mut next = self.clone();
        next.baseline_total_count = total;
        next.recompute()
    }

    /// Stage an entry for addition.
    ///
    /// Baseline members are never staged; adding one only cancels a pending
    /// removal of it.
    pub fn add(&self, entry: Entry) -> Self {
        let mut next = self.clone();
        next.stage_add(entry);
        next.recompute()
    }

    /// Stage many entries. They are inserted in reverse input order so the
    /// derived view lists them in the order given.
    pub fn add_all(&self, entries: Vec<Entry>) -> Self {
        let mut next = self.clone();
        for entry in entries.into_iter().rev() {
            next.stage_add(entry);
        }
        next.recompute()
    }

    /// Unstage a pending addition, or stage a removal of a committed entry.
    ///
    /// The entry need not be loaded yet; a page that brings it in later
    /// shows it as removed.
    pub fn remove(&self, id: &EntryId) -> Self {
        let mut next = self.clone();
        if next.added.shift_remove(id).is_none() {
            next.removed.insert(id.clone());
        }
        next.recompute()
    }

    /// Remove every baseline entry and drop all pending additions.
    pub fn remove_all(&self) -> Self {
        let mut next = self.clone();
        next.added.clear();
        next.removed
            .extend(next.baseline.iter().map(|entry| entry.id.clone()));
        next.recompute()
    }

    /// Drop the whole changeset.
    pub fn reset(&self) -> Self {
        let mut next = self.clone();
        next.added.clear();
        next.removed.clear();
        next.recompute()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn stage_add(&mut self, entry: Entry) {
        let id = entry.id.clone();
        if !self.in_baseline(&id) {
            self.added.insert(id.clone(), entry);
        }
        self.removed.shift_remove(&id);
    }

    fn recompute(mut self) -> Self {
        let (current, total) = derive_current(
            &self.baseline,
            self.baseline_total_count,
            &self.added,
            &self.removed,
        );
        self.current = current;
        self.current_total_count = total;
        self
    }
}

/// Derive the visible entries and their count from the baseline and delta.
///
/// The count is clamped to the number of visible entries so a stale
/// server total never undercounts what the admin can already see.
pub fn derive_current(
    baseline: &[Entry],
    baseline_total_count: usize,
    added: &IndexMap<EntryId, Entry>,
    removed: &IndexSet<EntryId>,
) -> (Vec<Entry>, usize) {
    let current: Vec<Entry> = added
        .values()
        .rev()
        .chain(baseline.iter().filter(|entry| !removed.contains(&entry.id)))
        .cloned()
        .collect();
    let total = baseline_total_count
        .saturating_add(added.len())
        .saturating_sub(removed.len())
        .max(current.len());
    (current, total)
}
