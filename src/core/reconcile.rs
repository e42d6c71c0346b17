use crate::core::catalog::CourseCatalog;
use crate::core::keys::fresh_key;
use crate::domain::model::{Row, RowKind};
use std::collections::HashSet;

/// Builds the authoritative row set from normalized candidates.
///
/// Output is `[core in core_order] ++ [electives in input order] ++
/// [field in field_order]`. Each canonical id appears exactly once: the first
/// matching candidate wins and missing ids are backfilled with an ungraded
/// row at the catalog's default credit. Core/field candidates whose id is not
/// canonical are dropped. Row keys in the output are unique; a repeated key
/// is replaced with a fresh one, earlier rows keeping theirs. Reconciling an
/// already reconciled set returns it unchanged.
pub fn reconcile(
    catalog: &CourseCatalog,
    candidates: &[Row],
    core_order: &[&str],
    field_order: &[&str],
) -> Vec<Row> {
    let electives = candidates.iter().filter(|row| row.kind == RowKind::Elective);
    let mut rows: Vec<Row> = Vec::with_capacity(core_order.len() + field_order.len());

    rows.extend(canonical_rows(catalog, candidates, RowKind::Core, core_order));
    rows.extend(electives.cloned());
    rows.extend(canonical_rows(catalog, candidates, RowKind::Field, field_order));
    dedupe_keys(rows)
}

/// Fresh core and field rows for a catalog, as used at first start and on
/// reset.
pub fn default_rows(catalog: &CourseCatalog) -> Vec<Row> {
    reconcile(catalog, &[], catalog.core_order(), catalog.field_order())
}

fn dedupe_keys(rows: Vec<Row>) -> Vec<Row> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .map(|row| {
            if seen.insert(row.key.clone()) {
                return row;
            }
            let key = fresh_key(row.kind.key_prefix());
            tracing::debug!("Row key {} is already taken, rekeyed as {}", row.key, key);
            seen.insert(key.clone());
            Row { key, ..row }
        })
        .collect()
}

fn canonical_rows<'a>(
    catalog: &'a CourseCatalog,
    candidates: &'a [Row],
    kind: RowKind,
    order: &'a [&'a str],
) -> impl Iterator<Item = Row> + 'a {
    order.iter().map(move |id| {
        candidates
            .iter()
            .find(|row| row.kind == kind && row.course_id == *id)
            .cloned()
            .unwrap_or_else(|| {
                tracing::debug!("Backfilling {} row for course {}", kind, id);
                Row::ungraded(
                    fresh_key(kind.key_prefix()),
                    kind,
                    *id,
                    catalog.default_credit(id),
                )
            })
    })
}
