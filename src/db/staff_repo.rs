use crate::error::FarmopsError;
use crate::models::{StaffId, StaffMember};

use super::store::{Collection, Store, STAFF_FILE};

pub fn list_staff(store: &Store) -> Result<Vec<StaffMember>, FarmopsError> {
    store.load(STAFF_FILE)
}

pub fn find_staff(store: &Store, id: &StaffId) -> Result<Option<StaffMember>, FarmopsError> {
    Ok(list_staff(store)?.into_iter().find(|s| &s.id == id))
}

/// Adds a staff member. Without an explicit id the next numeric id is used.
pub fn create_staff<F>(
    store: &Store,
    explicit_id: Option<StaffId>,
    build: F,
) -> Result<StaffMember, FarmopsError>
where
    F: FnOnce(StaffId) -> StaffMember,
{
    let mut staff = list_staff(store)?;
    let id = match explicit_id {
        Some(id) => {
            if id.is_empty() {
                return Err(FarmopsError::validation("Staff id must not be empty"));
            }
            if staff.iter().any(|s| s.id == id) {
                return Err(FarmopsError::validation(format!(
                    "Staff member with id '{id}' already exists"
                )));
            }
            id
        }
        None => {
            let max = staff
                .iter()
                .filter_map(|s| s.id.as_str().parse::<u64>().ok())
                .max()
                .unwrap_or(0);
            StaffId::from(store.next_id(Collection::Staff, max)?)
        }
    };
    let member = build(id);
    staff.push(member.clone());
    store.save(STAFF_FILE, &staff)?;
    Ok(member)
}

pub fn update_staff<F>(store: &Store, id: &StaffId, change: F) -> Result<StaffMember, FarmopsError>
where
    F: FnOnce(&mut StaffMember),
{
    let mut staff = list_staff(store)?;
    let member = staff
        .iter_mut()
        .find(|s| &s.id == id)
        .ok_or_else(|| FarmopsError::staff_not_found(id.as_str()))?;
    change(member);
    let updated = member.clone();
    store.save(STAFF_FILE, &staff)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: StaffId, name: &str) -> StaffMember {
        StaffMember {
            id,
            email: format!("{}@farm.test", name.to_lowercase()),
            full_name: name.into(),
            roles_assigned: vec!["Grower".into()],
            active: true,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_numeric_ids_skip_explicit_ones() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();

        let kim = create_staff(&store, Some(StaffId::new("12")), |id| member(id, "Kim")).unwrap();
        assert_eq!(kim.id.as_str(), "12");
        let lou = create_staff(&store, None, |id| member(id, "Lou")).unwrap();
        assert_eq!(lou.id.as_str(), "13");

        let err = create_staff(&store, Some(StaffId::from(12)), |id| member(id, "Dup")).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[test]
    fn test_update_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        create_staff(&store, None, |id| member(id, "Ana")).unwrap();

        let id = StaffId::from(1);
        update_staff(&store, &id, |s| s.active = false).unwrap();
        assert!(!find_staff(&store, &id).unwrap().unwrap().active);
        assert!(update_staff(&store, &StaffId::new("9"), |_| {}).is_err());
    }
}
