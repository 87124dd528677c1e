use crate::model::person::Person;
use crate::model::scan::RawUid;
use crate::store::{RecordStore, StoreError};
use tracing::info;

/// Look up the person registered for a badge uid. `Ok(None)` is the normal
/// unregistered-badge outcome, not a failure; only transport/store trouble
/// comes back as an error.
pub async fn resolve<S: RecordStore>(
    store: &S,
    uid: &RawUid,
) -> Result<Option<Person>, StoreError> {
    let person = store.find_person(uid).await?;
    if let Some(p) = &person {
        info!(person_id = p.id, person = %p.full_name, "badge resolved");
    }
    Ok(person)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn known_badge_resolves_to_person() {
        let store = MemoryStore::new().with_person(7, "A1B2C3D4", "Ayu Lestari");
        let uid = RawUid::parse("A1B2C3D4").unwrap();
        let person = resolve(&store, &uid).await.unwrap().unwrap();
        assert_eq!(person.id, 7);
        assert_eq!(person.full_name, "Ayu Lestari");
    }

    #[tokio::test]
    async fn unknown_badge_is_none_not_error() {
        let store = MemoryStore::new().with_person(7, "A1B2C3D4", "Ayu Lestari");
        let uid = RawUid::parse("DEADBEEF").unwrap();
        assert!(resolve(&store, &uid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let store = MemoryStore::new();
        store.fail_find(true);
        let uid = RawUid::parse("A1B2C3D4").unwrap();
        assert!(resolve(&store, &uid).await.is_err());
    }
}
