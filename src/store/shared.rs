//! Thread-safe store handle.
//!
//! Every operation holds the lock for its whole check-then-write sequence,
//! so two manual adds cannot both pass their conflict checks against the
//! same stale state, and a regeneration run excludes manual edits until
//! it commits or rolls back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

use super::{EntryQuery, ScheduleStore};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{EntryId, NewEntry, ScheduleEntry};
use crate::scheduler::{CancelFlag, GenerationReport, PlacementEngine, Term};

/// Cloneable handle to a [`ScheduleStore`] behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedScheduleStore {
    inner: Arc<Mutex<ScheduleStore>>,
}

impl SharedScheduleStore {
    pub fn new(store: ScheduleStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // Store operations never leave it half-mutated, so a poisoned lock
    // still guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, ScheduleStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checked insert of one entry.
    pub fn add_one(&self, catalog: &Catalog, candidate: NewEntry) -> Result<ScheduleEntry> {
        self.lock().add_one(catalog, candidate)
    }

    /// Removes one entry.
    pub fn remove(&self, id: EntryId) -> Result<ScheduleEntry> {
        self.lock().remove(id)
    }

    /// Matching entries, copied out of the store.
    pub fn query(&self, catalog: &Catalog, query: &EntryQuery) -> Vec<ScheduleEntry> {
        self.lock()
            .query(catalog, query)
            .into_iter()
            .copied()
            .collect()
    }

    /// Copy of the current store.
    pub fn snapshot(&self) -> ScheduleStore {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs a full generation while holding the lock.
    pub fn regenerate<R: Rng + ?Sized>(
        &self,
        engine: &PlacementEngine,
        catalog: &Catalog,
        term: Term,
        rng: &mut R,
    ) -> Result<GenerationReport> {
        engine.generate(catalog, &mut self.lock(), term, rng)
    }

    /// Like [`regenerate`](Self::regenerate), aborting between courses once
    /// `cancel` is raised.
    pub fn regenerate_with_cancel<R: Rng + ?Sized>(
        &self,
        engine: &PlacementEngine,
        catalog: &Catalog,
        term: Term,
        rng: &mut R,
        cancel: &CancelFlag,
    ) -> Result<GenerationReport> {
        engine.generate_with_cancel(catalog, &mut self.lock(), term, rng, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use crate::testing;
    use rand::rngs::SmallRng;
    use rand::{RngCore, SeedableRng};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Announces the first draw of a generation run, then stalls briefly
    /// so a competing thread reaches the lock while the run still holds it.
    struct AnnouncingRng {
        inner: SmallRng,
        started: Option<mpsc::Sender<()>>,
    }

    impl AnnouncingRng {
        fn announce(&mut self) {
            if let Some(tx) = self.started.take() {
                let _ = tx.send(());
                thread::sleep(Duration::from_millis(50));
            }
        }
    }

    impl RngCore for AnnouncingRng {
        fn next_u32(&mut self) -> u32 {
            self.announce();
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.announce();
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.announce();
            self.inner.fill_bytes(dst)
        }
    }

    #[test]
    fn test_concurrent_adds_never_double_book() {
        let catalog = Arc::new(testing::two_department_catalog());
        let shared = SharedScheduleStore::default();
        let window = TimeWindow::parse("09:00", "11:50").unwrap();

        // Two courses with disjoint instructors and cohorts race for one room
        let handles: Vec<_> = [CourseId(1), CourseId(5)]
            .into_iter()
            .map(|course_id| {
                let shared = shared.clone();
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || {
                    shared.add_one(
                        &catalog,
                        NewEntry::new(course_id, ClassroomId(1), Day::Monday, window),
                    )
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_regenerate_through_handle() {
        let catalog = testing::two_department_catalog();
        let shared = SharedScheduleStore::new(ScheduleStore::new());
        let engine = PlacementEngine::default();
        let mut rng = SmallRng::seed_from_u64(7);

        let report = shared
            .regenerate(&engine, &catalog, Term::All, &mut rng)
            .unwrap();
        assert_eq!(shared.len(), report.placed.len());
        assert_eq!(
            shared.query(&catalog, &EntryQuery::new()).len(),
            report.placed.len()
        );
    }

    #[test]
    fn test_manual_add_waits_for_regeneration() {
        let catalog = Arc::new(testing::two_department_catalog());
        let shared = SharedScheduleStore::default();
        let (tx, rx) = mpsc::channel();

        let regen = {
            let shared = shared.clone();
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let mut rng = AnnouncingRng {
                    inner: SmallRng::seed_from_u64(11),
                    started: Some(tx),
                };
                shared.regenerate(&PlacementEngine::default(), &catalog, Term::All, &mut rng)
            })
        };

        // The run is in progress and holds the lock
        let _ = rx.recv();
        let added = shared.add_one(
            &catalog,
            NewEntry::new(
                CourseId(6),
                ClassroomId(3),
                Day::Friday,
                TimeWindow::parse("13:00", "15:50").unwrap(),
            ),
        );
        let report = regen.join().unwrap().unwrap();

        // The add ran against the committed run, so the clearing step did
        // not discard it and it was checked against every placed entry
        let store = shared.snapshot();
        match &added {
            Ok(entry) => {
                assert_eq!(store.len(), report.placed.len() + 1);
                assert_eq!(store.get(entry.id), Some(entry));
            }
            Err(err) => {
                assert!(err.is_conflict());
                assert_eq!(store.len(), report.placed.len());
            }
        }
        for placed in &report.placed {
            assert_eq!(store.get(placed.id), Some(placed));
        }

        // No double booking in the final state
        let mut rebuilt = ScheduleStore::new();
        rebuilt
            .bulk_insert(&catalog, store.entries().map(ScheduleEntry::placement))
            .unwrap();
        assert_eq!(rebuilt.len(), store.len());
    }
}
