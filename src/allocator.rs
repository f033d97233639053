use log::info;

use crate::{
    domain::{Field, PlotRef, Record},
    storage::{RecordStore, StoreError},
};

pub fn find_free_slot(field: &Field) -> Option<usize> {
    field.plots.iter().position(|plot| plot.is_empty())
}

// On a failed save the appended field stays in memory, so a retry lands on
// its first slot instead of appending another field.
pub fn ensure_writable_field<S: RecordStore + ?Sized>(
    record: &mut Record,
    store: &S,
) -> Result<PlotRef, StoreError> {
    if let Some(slot) = record.last_field().and_then(find_free_slot) {
        return Ok(PlotRef {
            field: record.last_field_index(),
            slot,
        });
    }

    record.fields.push(Field::new());
    let field = record.last_field_index();
    info!("Field {} is full, opened field {}", field, field + 1);
    store.save(record)?;

    Ok(PlotRef { field, slot: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Category, Planting},
        storage::memory::MemoryStore,
    };

    fn fill(record: &mut Record, at: PlotRef) {
        record.fields[at.field]
            .plant(
                at.slot,
                Planting {
                    category: Category::Leisure,
                    elapsed_secs: 10,
                    label: format!("session {}", at.slot),
                },
            )
            .unwrap();
    }

    #[test]
    fn test_find_free_slot_scans_in_order() {
        let mut record = Record::new();
        assert_eq!(find_free_slot(&record.fields[0]), Some(0));

        fill(&mut record, PlotRef { field: 0, slot: 0 });
        fill(&mut record, PlotRef { field: 0, slot: 2 });
        assert_eq!(find_free_slot(&record.fields[0]), Some(1));
    }

    #[test]
    fn test_slots_increase_and_field_appended_only_when_full() {
        let store = MemoryStore::default();
        let mut record = Record::new();

        for expected in 0..9 {
            let at = ensure_writable_field(&mut record, &store).unwrap();
            assert_eq!(at, PlotRef { field: 0, slot: expected });
            assert_eq!(record.fields.len(), 1);
            fill(&mut record, at);
        }
        assert_eq!(store.saves(), 0);

        let at = ensure_writable_field(&mut record, &store).unwrap();
        assert_eq!(at, PlotRef { field: 1, slot: 0 });
        assert_eq!(record.fields.len(), 2);
        assert_eq!(store.saves(), 1);
        assert_eq!(store.saved_record().map(|r| r.fields.len()), Some(2));
    }

    #[test]
    fn test_unfilled_reservation_does_not_append_again() {
        let store = MemoryStore::default();
        let mut record = Record::new();
        for slot in 0..9 {
            fill(&mut record, PlotRef { field: 0, slot });
        }

        let first = ensure_writable_field(&mut record, &store).unwrap();
        let second = ensure_writable_field(&mut record, &store).unwrap();
        assert_eq!(first, second);
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn test_failed_persist_keeps_new_field() {
        let store = MemoryStore::default();
        *store.fail_saves.borrow_mut() = true;
        let mut record = Record::new();
        for slot in 0..9 {
            fill(&mut record, PlotRef { field: 0, slot });
        }

        assert!(ensure_writable_field(&mut record, &store).is_err());
        assert_eq!(record.fields.len(), 2);

        *store.fail_saves.borrow_mut() = false;
        let at = ensure_writable_field(&mut record, &store).unwrap();
        assert_eq!(at, PlotRef { field: 1, slot: 0 });
        assert_eq!(record.fields.len(), 2);
    }
}
