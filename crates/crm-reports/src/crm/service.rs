use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    Activity, ActivityId, Contact, ContactId, Deal, DealId, NewActivity, NewContact, NewDeal,
    DEFAULT_DEAL_PROBABILITY, MAX_DEAL_VALUE,
};
use super::store::{CrmStore, StoreError};
use crate::reports::domain::PipelineMetrics;
use crate::reports::{PipelineStage, StageName};

/// Validates submissions and keeps contacts, deals and activities consistent.
pub struct CrmService<S> {
    store: Arc<S>,
    sequence: AtomicU64,
}

impl<S> CrmService<S>
where
    S: CrmStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{id:06}")
    }

    pub fn add_contact(&self, draft: NewContact) -> Result<Contact, CrmError> {
        let first_name = required("first_name", &draft.first_name)?;
        let last_name = required("last_name", &draft.last_name)?;
        let email = required("email", &draft.email)?;
        if !email.contains('@') {
            return Err(CrmError::InvalidValue {
                field: "email",
                reason: "must contain '@'".to_string(),
            });
        }

        let contact = Contact {
            id: ContactId(self.next_id("contact")),
            first_name,
            last_name,
            email,
            phone: optional(draft.phone),
            company: optional(draft.company),
            position: optional(draft.position),
            status: draft.status.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let stored = self.store.insert_contact(contact)?;
        tracing::info!(contact_id = %stored.id, "contact added");
        Ok(stored)
    }

    pub fn add_deal(&self, draft: NewDeal) -> Result<Deal, CrmError> {
        let title = required("title", &draft.title)?;
        let contact_id = draft
            .contact_id
            .filter(|id| !id.0.trim().is_empty())
            .ok_or(CrmError::MissingField("contact_id"))?;
        let value = draft.value.ok_or(CrmError::MissingField("value"))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(CrmError::InvalidValue {
                field: "value",
                reason: "must be a positive amount".to_string(),
            });
        }
        if value > MAX_DEAL_VALUE {
            return Err(CrmError::InvalidValue {
                field: "value",
                reason: format!("must not exceed {MAX_DEAL_VALUE}"),
            });
        }

        let probability = draft.probability.unwrap_or(DEFAULT_DEAL_PROBABILITY);
        if probability > 100 {
            return Err(CrmError::InvalidValue {
                field: "probability",
                reason: "must be between 0 and 100".to_string(),
            });
        }

        if self.store.contact(&contact_id)?.is_none() {
            return Err(CrmError::UnknownContact(contact_id));
        }

        let deal = Deal {
            id: DealId(self.next_id("deal")),
            title,
            contact_id,
            value,
            stage: draft.stage.unwrap_or(StageName::Lead),
            probability,
            expected_close_date: draft.expected_close_date,
            description: optional(draft.description),
            created_at: Utc::now(),
        };

        let stored = self.store.insert_deal(deal)?;
        tracing::info!(deal_id = %stored.id, stage = stored.stage.key(), "deal added");
        Ok(stored)
    }

    pub fn add_activity(&self, draft: NewActivity) -> Result<Activity, CrmError> {
        let contact_id = draft
            .contact_id
            .filter(|id| !id.0.trim().is_empty())
            .ok_or(CrmError::MissingField("contact_id"))?;
        let subject = required("subject", &draft.subject)?;

        if self.store.contact(&contact_id)?.is_none() {
            return Err(CrmError::UnknownContact(contact_id));
        }

        let deal_id = draft.deal_id.filter(|id| !id.0.trim().is_empty());
        if let Some(deal_id) = &deal_id {
            if self.store.deal(deal_id)?.is_none() {
                return Err(CrmError::UnknownDeal(deal_id.clone()));
            }
        }

        let activity = Activity {
            id: ActivityId(self.next_id("activity")),
            contact_id,
            deal_id,
            kind: draft.kind.unwrap_or_default(),
            subject,
            description: optional(draft.description),
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: Utc::now(),
        };

        let stored = self.store.insert_activity(activity)?;
        tracing::info!(activity_id = %stored.id, "activity added");
        Ok(stored)
    }

    /// Flips the completion flag and returns the updated activity.
    pub fn toggle_activity(&self, id: &ActivityId) -> Result<Activity, CrmError> {
        let activity = self
            .store
            .toggle_activity(id)?
            .ok_or_else(|| CrmError::UnknownActivity(id.clone()))?;
        tracing::info!(
            activity_id = %activity.id,
            completed = activity.completed,
            "activity toggled"
        );
        Ok(activity)
    }

    /// Display name for a contact, `"Unknown"` when the id does not resolve.
    pub fn contact_name(&self, id: &ContactId) -> Result<String, CrmError> {
        Ok(self
            .store
            .contact(id)?
            .map(|contact| contact.full_name())
            .unwrap_or_else(|| "Unknown".to_string()))
    }

    pub fn contacts(&self) -> Result<Vec<Contact>, CrmError> {
        Ok(self.store.contacts()?)
    }

    pub fn deals(&self) -> Result<Vec<Deal>, CrmError> {
        Ok(self.store.deals()?)
    }

    pub fn activities(&self) -> Result<Vec<Activity>, CrmError> {
        Ok(self.store.activities()?)
    }

    /// Rolls the stored deals up into the five pipeline stages. The total always
    /// equals the sum of the stage values.
    pub fn pipeline_from_deals(&self) -> Result<PipelineMetrics, CrmError> {
        let deals = self.store.deals()?;
        let stages: Vec<PipelineStage> = StageName::ordered()
            .into_iter()
            .map(|name| {
                let in_stage = deals.iter().filter(|deal| deal.stage == name);
                let count = in_stage.clone().count() as u64;
                let value = in_stage.map(|deal| deal.value).sum::<f64>().round() as u64;
                PipelineStage::new(name, count, value)
            })
            .collect();
        let total_value = stages.iter().map(|stage| stage.value).sum();

        Ok(PipelineMetrics {
            total_value,
            stages,
        })
    }
}

fn required(field: &'static str, raw: &str) -> Result<String, CrmError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(CrmError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Error raised by the CRM service.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("contact '{0}' does not exist")]
    UnknownContact(ContactId),
    #[error("deal '{0}' does not exist")]
    UnknownDeal(DealId),
    #[error("activity '{0}' does not exist")]
    UnknownActivity(ActivityId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
