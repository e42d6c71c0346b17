use crate::core::catalog::CourseCatalog;
use crate::core::gpa::compute_totals;
use crate::core::keys::fresh_key;
use crate::core::normalize::normalize_snapshot;
use crate::core::reconcile::{default_rows, reconcile};
use crate::domain::model::{Row, RowEdit, RowKind, Totals};
use crate::domain::ports::SnapshotStore;

/// The current row set of one student, backed by a snapshot store.
///
/// Edits replace rows wholesale and are saved after every change. Storage
/// failures are logged and otherwise ignored: a failed load starts from the
/// default rows and a failed save is dropped.
pub struct GradeBook<'c, S: SnapshotStore> {
    catalog: &'c CourseCatalog,
    store: S,
    rows: Vec<Row>,
}

impl<'c, S: SnapshotStore> GradeBook<'c, S> {
    /// Starts from the default core and field rows without reading the store.
    pub fn new(catalog: &'c CourseCatalog, store: S) -> Self {
        Self {
            catalog,
            store,
            rows: default_rows(catalog),
        }
    }

    /// Restores the persisted snapshot, normalized and reconciled.
    ///
    /// When the stored snapshot had to be repaired (coerced fields, missing or
    /// duplicate rows, unreadable or not a row list) the repaired rows are
    /// saved back once.
    pub fn open(catalog: &'c CourseCatalog, store: S) -> Self {
        let (rows, repaired) = match store.load() {
            Ok(Some(raw)) => match normalize_snapshot(&raw) {
                Some(candidates) => {
                    tracing::info!("Loaded {} persisted rows", candidates.len());
                    let rows = reconcile(
                        catalog,
                        &candidates,
                        catalog.core_order(),
                        catalog.field_order(),
                    );
                    let unchanged = serde_json::to_value(&rows).is_ok_and(|value| value == raw);
                    (rows, !unchanged)
                }
                None => {
                    tracing::warn!("Persisted snapshot is not a row list, starting fresh");
                    (default_rows(catalog), true)
                }
            },
            Ok(None) => {
                tracing::info!("No persisted snapshot, starting fresh");
                (default_rows(catalog), false)
            }
            Err(e) => {
                tracing::warn!("Failed to load snapshot, starting fresh: {}", e);
                (default_rows(catalog), true)
            }
        };

        let book = Self {
            catalog,
            store,
            rows,
        };
        if repaired {
            tracing::info!("Saving repaired snapshot");
            book.persist();
        }
        book
    }

    pub fn catalog(&self) -> &CourseCatalog {
        self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |row| row.kind == kind)
    }

    pub fn core_rows(&self) -> Vec<&Row> {
        self.rows_of(RowKind::Core).collect()
    }

    pub fn elective_rows(&self) -> Vec<&Row> {
        self.rows_of(RowKind::Elective).collect()
    }

    pub fn field_rows(&self) -> Vec<&Row> {
        self.rows_of(RowKind::Field).collect()
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.rows)
    }

    /// Appends an ungraded elective on the first elective-eligible course.
    pub fn add_elective(&mut self) -> String {
        let course_id = self.catalog.first_elective_id().to_string();
        let credit = self.catalog.default_credit(&course_id);
        let key = fresh_key(RowKind::Elective.key_prefix());

        tracing::debug!("Adding elective {} on course {}", key, course_id);
        self.rows
            .push(Row::ungraded(key.clone(), RowKind::Elective, course_id, credit));
        self.persist();
        key
    }

    /// Removes an elective row. Core and field rows are never removed.
    pub fn remove_elective(&mut self, key: &str) -> bool {
        let Some(index) = self.rows.iter().position(|row| row.key == key) else {
            return false;
        };
        if self.rows[index].kind != RowKind::Elective {
            tracing::debug!("Refusing to remove {} row {}", self.rows[index].kind, key);
            return false;
        }

        self.rows.remove(index);
        self.persist();
        true
    }

    /// Replaces the row under `key` with an edited copy.
    ///
    /// Grades outside the row kind's option set become ungraded. Credits that
    /// are negative or not finite become 0. A course change is honored only
    /// for electives and only onto a course that is not core or field; it
    /// resets the credit to the new course's default unless the edit also
    /// carries a credit.
    pub fn update_row(&mut self, key: &str, edit: RowEdit) -> bool {
        let Some(index) = self.rows.iter().position(|row| row.key == key) else {
            return false;
        };

        let current = &self.rows[index];
        let mut next = current.clone();

        if let Some(course_id) = edit.course_id {
            let reserved = self
                .catalog
                .lookup(&course_id)
                .is_some_and(|def| !def.is_elective_eligible());
            if current.kind != RowKind::Elective {
                tracing::debug!("Ignoring course change on {} row {}", current.kind, key);
            } else if reserved {
                tracing::debug!("Course {} cannot be taken as an elective", course_id);
            } else {
                let credit = self.catalog.default_credit(&course_id);
                next = next.with_course(course_id, credit);
            }
        }
        if let Some(credit) = edit.credit {
            next = next.with_credit(sanitize_credit(credit));
        }
        if let Some(grade) = edit.grade {
            next = next.with_grade(&grade);
        }

        if next == *current {
            return true;
        }
        self.rows[index] = next;
        self.persist();
        true
    }

    /// Restores the default rows and clears the persisted snapshot.
    pub fn reset(&mut self) {
        tracing::info!("Resetting grade book");
        self.rows = default_rows(self.catalog);
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear snapshot: {}", e);
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.rows) {
            tracing::warn!("Failed to save snapshot: {}", e);
        }
    }
}

fn sanitize_credit(credit: f64) -> f64 {
    if credit.is_finite() && credit >= 0.0 {
        credit
    } else {
        0.0
    }
}
