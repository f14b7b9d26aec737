use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, TimeZone, Utc};

use super::domain::{
    Activity, ActivityId, ActivityKind, Contact, ContactId, ContactStatus, Deal, DealId,
};
use crate::reports::StageName;

/// Storage abstraction so the CRM service can be exercised in isolation.
pub trait CrmStore: Send + Sync {
    fn insert_contact(&self, contact: Contact) -> Result<Contact, StoreError>;
    fn contact(&self, id: &ContactId) -> Result<Option<Contact>, StoreError>;
    fn contacts(&self) -> Result<Vec<Contact>, StoreError>;

    fn insert_deal(&self, deal: Deal) -> Result<Deal, StoreError>;
    fn deal(&self, id: &DealId) -> Result<Option<Deal>, StoreError>;
    fn deals(&self) -> Result<Vec<Deal>, StoreError>;

    fn insert_activity(&self, activity: Activity) -> Result<Activity, StoreError>;
    /// Flips `completed` in place and returns the updated record, `None` when
    /// the id is unknown. Read and write happen under one lock.
    fn toggle_activity(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError>;
    fn activity(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError>;
    fn activities(&self) -> Result<Vec<Activity>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Records {
    contacts: Vec<Contact>,
    deals: Vec<Deal>,
    activities: Vec<Activity>,
}

/// Insertion-ordered, process-local store.
#[derive(Debug, Default)]
pub struct InMemoryCrmStore {
    records: Mutex<Records>,
}

impl InMemoryCrmStore {
    /// Store pre-loaded with two contacts, their deals, and one activity each.
    pub fn seeded() -> Self {
        let at = |y, m, d| {
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_default()
        };

        let contacts = vec![
            Contact {
                id: ContactId("1".to_string()),
                first_name: "Sarah".to_string(),
                last_name: "Johnson".to_string(),
                email: "sarah.johnson@example.com".to_string(),
                phone: Some("+1 (555) 123-4567".to_string()),
                company: Some("TechCorp Inc.".to_string()),
                position: Some("Marketing Director".to_string()),
                status: ContactStatus::Active,
                created_at: at(2024, 1, 15),
            },
            Contact {
                id: ContactId("2".to_string()),
                first_name: "Michael".to_string(),
                last_name: "Chen".to_string(),
                email: "michael.chen@example.com".to_string(),
                phone: Some("+1 (555) 987-6543".to_string()),
                company: Some("Innovate Solutions".to_string()),
                position: Some("CEO".to_string()),
                status: ContactStatus::Prospect,
                created_at: at(2024, 1, 20),
            },
        ];

        let deals = vec![
            Deal {
                id: DealId("1".to_string()),
                title: "TechCorp Enterprise Package".to_string(),
                contact_id: ContactId("1".to_string()),
                value: 45_000.0,
                stage: StageName::Negotiation,
                probability: 75,
                expected_close_date: NaiveDate::from_ymd_opt(2024, 2, 15),
                description: Some("Enterprise software licensing deal".to_string()),
                created_at: at(2024, 1, 15),
            },
            Deal {
                id: DealId("2".to_string()),
                title: "Innovate Solutions Consulting".to_string(),
                contact_id: ContactId("2".to_string()),
                value: 25_000.0,
                stage: StageName::Proposal,
                probability: 60,
                expected_close_date: NaiveDate::from_ymd_opt(2024, 2, 28),
                description: Some("Strategic consulting engagement".to_string()),
                created_at: at(2024, 1, 20),
            },
        ];

        let activities = vec![
            Activity {
                id: ActivityId("1".to_string()),
                contact_id: ContactId("1".to_string()),
                deal_id: Some(DealId("1".to_string())),
                kind: ActivityKind::Call,
                subject: "Follow-up call with Sarah".to_string(),
                description: Some("Discussed implementation timeline and requirements".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 1, 25),
                completed: true,
                created_at: at(2024, 1, 24),
            },
            Activity {
                id: ActivityId("2".to_string()),
                contact_id: ContactId("2".to_string()),
                deal_id: Some(DealId("2".to_string())),
                kind: ActivityKind::Meeting,
                subject: "Strategy presentation meeting".to_string(),
                description: Some("Present consulting proposal and pricing".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 1, 30),
                completed: false,
                created_at: at(2024, 1, 25),
            },
        ];

        Self {
            records: Mutex::new(Records {
                contacts,
                deals,
                activities,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl CrmStore for InMemoryCrmStore {
    fn insert_contact(&self, contact: Contact) -> Result<Contact, StoreError> {
        let mut guard = self.lock()?;
        if guard.contacts.iter().any(|existing| existing.id == contact.id) {
            return Err(StoreError::Conflict);
        }
        guard.contacts.push(contact.clone());
        Ok(contact)
    }

    fn contact(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.contacts.iter().find(|contact| &contact.id == id).cloned())
    }

    fn contacts(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.lock()?.contacts.clone())
    }

    fn insert_deal(&self, deal: Deal) -> Result<Deal, StoreError> {
        let mut guard = self.lock()?;
        if guard.deals.iter().any(|existing| existing.id == deal.id) {
            return Err(StoreError::Conflict);
        }
        guard.deals.push(deal.clone());
        Ok(deal)
    }

    fn deal(&self, id: &DealId) -> Result<Option<Deal>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.deals.iter().find(|deal| &deal.id == id).cloned())
    }

    fn deals(&self) -> Result<Vec<Deal>, StoreError> {
        Ok(self.lock()?.deals.clone())
    }

    fn insert_activity(&self, activity: Activity) -> Result<Activity, StoreError> {
        let mut guard = self.lock()?;
        if guard.activities.iter().any(|existing| existing.id == activity.id) {
            return Err(StoreError::Conflict);
        }
        guard.activities.push(activity.clone());
        Ok(activity)
    }

    fn toggle_activity(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard
            .activities
            .iter_mut()
            .find(|activity| &activity.id == id)
            .map(|activity| {
                activity.completed = !activity.completed;
                activity.clone()
            }))
    }

    fn activity(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .activities
            .iter()
            .find(|activity| &activity.id == id)
            .cloned())
    }

    fn activities(&self) -> Result<Vec<Activity>, StoreError> {
        Ok(self.lock()?.activities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn concurrent_toggles_are_not_lost() {
        let store = Arc::new(InMemoryCrmStore::seeded());
        let id = ActivityId("2".to_string());

        thread::scope(|scope| {
            for _ in 0..8 {
                let store = Arc::clone(&store);
                let id = id.clone();
                scope.spawn(move || {
                    for _ in 0..51 {
                        store.toggle_activity(&id).expect("toggle");
                    }
                });
            }
        });

        // 408 flips in total, so the seeded `false` comes back unchanged.
        let activity = store.activity(&id).expect("read").expect("present");
        assert!(!activity.completed);
    }

    #[test]
    fn toggling_unknown_activity_returns_none() {
        let store = InMemoryCrmStore::seeded();
        let missing = store
            .toggle_activity(&ActivityId("404".to_string()))
            .expect("store available");
        assert!(missing.is_none());
    }
}
