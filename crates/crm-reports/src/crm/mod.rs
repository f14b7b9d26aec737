//! Contact, deal and activity records backing the dashboard's management tabs.

pub mod domain;
mod router;
mod service;
pub mod store;

pub use domain::{
    Activity, ActivityId, ActivityKind, Contact, ContactId, ContactStatus, Deal, DealId,
    NewActivity, NewContact, NewDeal, MAX_DEAL_VALUE,
};
pub use router::crm_router;
pub use service::{CrmError, CrmService};
pub use store::{CrmStore, InMemoryCrmStore, StoreError};
