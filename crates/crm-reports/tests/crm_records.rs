use crm_reports::crm::{
    ActivityKind, ContactId, ContactStatus, CrmError, CrmService, InMemoryCrmStore, NewActivity,
    NewContact, NewDeal,
};
use crm_reports::reports::StageName;
use std::sync::Arc;

fn seeded_service() -> CrmService<InMemoryCrmStore> {
    CrmService::new(Arc::new(InMemoryCrmStore::seeded()))
}

#[test]
fn new_deal_flows_into_pipeline_rollup() {
    let service = seeded_service();

    let contact = service
        .add_contact(NewContact {
            first_name: "Priya".to_string(),
            last_name: "Natarajan".to_string(),
            email: "priya@example.com".to_string(),
            status: Some(ContactStatus::Active),
            ..NewContact::default()
        })
        .expect("contact stored");

    service
        .add_deal(NewDeal {
            title: "Analytics add-on".to_string(),
            contact_id: Some(contact.id.clone()),
            value: Some(12_500.0),
            stage: Some(StageName::Qualified),
            probability: Some(40),
            ..NewDeal::default()
        })
        .expect("deal stored");

    let pipeline = service.pipeline_from_deals().expect("pipeline");
    assert!(pipeline.is_consistent());
    assert_eq!(pipeline.total_value, 82_500);
    let qualified = pipeline.stage(StageName::Qualified).expect("qualified stage");
    assert_eq!((qualified.count, qualified.value), (1, 12_500));
    assert_eq!(service.contact_name(&contact.id).expect("name"), "Priya Natarajan");
}

#[test]
fn activity_links_are_validated_before_storage() {
    let service = seeded_service();

    let err = service
        .add_activity(NewActivity {
            contact_id: Some(ContactId("ghost".to_string())),
            subject: "Intro call".to_string(),
            ..NewActivity::default()
        })
        .expect_err("unknown contact rejected");
    assert!(matches!(err, CrmError::UnknownContact(_)));

    let err = service
        .add_activity(NewActivity {
            contact_id: Some(ContactId("1".to_string())),
            subject: "   ".to_string(),
            ..NewActivity::default()
        })
        .expect_err("blank subject rejected");
    assert!(matches!(err, CrmError::MissingField("subject")));

    assert_eq!(service.activities().expect("activities").len(), 2);
}

#[test]
fn toggling_seeded_activity_persists() {
    let service = seeded_service();
    let pending = service
        .activities()
        .expect("activities")
        .into_iter()
        .find(|activity| !activity.completed)
        .expect("seed has a pending activity");
    assert_eq!(pending.kind, ActivityKind::Meeting);

    service.toggle_activity(&pending.id).expect("toggle");

    let reloaded = service
        .activities()
        .expect("activities")
        .into_iter()
        .find(|activity| activity.id == pending.id)
        .expect("activity still present");
    assert!(reloaded.completed);
}

#[test]
fn probability_above_one_hundred_is_rejected() {
    let service = seeded_service();
    let err = service
        .add_deal(NewDeal {
            title: "Stretch".to_string(),
            contact_id: Some(ContactId("2".to_string())),
            value: Some(5_000.0),
            probability: Some(120),
            ..NewDeal::default()
        })
        .expect_err("probability capped");
    assert!(matches!(
        err,
        CrmError::InvalidValue {
            field: "probability",
            ..
        }
    ));
}
