use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::domain::{Activity, ActivityId, Contact, Deal, NewActivity, NewContact, NewDeal};
use super::service::CrmService;
use super::store::CrmStore;
use crate::error::AppError;

/// Router builder exposing the contact, deal and activity endpoints.
pub fn crm_router<S>(service: Arc<CrmService<S>>) -> Router
where
    S: CrmStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/contacts",
            get(list_contacts::<S>).post(create_contact::<S>),
        )
        .route("/api/v1/deals", get(list_deals::<S>).post(create_deal::<S>))
        .route(
            "/api/v1/activities",
            get(list_activities::<S>).post(create_activity::<S>),
        )
        .route(
            "/api/v1/activities/:activity_id/toggle",
            post(toggle_activity::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_contacts<S>(
    State(service): State<Arc<CrmService<S>>>,
) -> Result<Json<Vec<Contact>>, AppError>
where
    S: CrmStore + 'static,
{
    Ok(Json(service.contacts()?))
}

pub(crate) async fn create_contact<S>(
    State(service): State<Arc<CrmService<S>>>,
    Json(draft): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), AppError>
where
    S: CrmStore + 'static,
{
    Ok((StatusCode::CREATED, Json(service.add_contact(draft)?)))
}

pub(crate) async fn list_deals<S>(
    State(service): State<Arc<CrmService<S>>>,
) -> Result<Json<Vec<Deal>>, AppError>
where
    S: CrmStore + 'static,
{
    Ok(Json(service.deals()?))
}

pub(crate) async fn create_deal<S>(
    State(service): State<Arc<CrmService<S>>>,
    Json(draft): Json<NewDeal>,
) -> Result<(StatusCode, Json<Deal>), AppError>
where
    S: CrmStore + 'static,
{
    Ok((StatusCode::CREATED, Json(service.add_deal(draft)?)))
}

pub(crate) async fn list_activities<S>(
    State(service): State<Arc<CrmService<S>>>,
) -> Result<Json<Vec<Activity>>, AppError>
where
    S: CrmStore + 'static,
{
    Ok(Json(service.activities()?))
}

pub(crate) async fn create_activity<S>(
    State(service): State<Arc<CrmService<S>>>,
    Json(draft): Json<NewActivity>,
) -> Result<(StatusCode, Json<Activity>), AppError>
where
    S: CrmStore + 'static,
{
    Ok((StatusCode::CREATED, Json(service.add_activity(draft)?)))
}

pub(crate) async fn toggle_activity<S>(
    State(service): State<Arc<CrmService<S>>>,
    Path(activity_id): Path<String>,
) -> Result<Json<Activity>, AppError>
where
    S: CrmStore + 'static,
{
    Ok(Json(service.toggle_activity(&ActivityId(activity_id))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::store::InMemoryCrmStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn build_router() -> Router {
        let store = Arc::new(InMemoryCrmStore::seeded());
        crm_router(Arc::new(CrmService::new(store)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
            .expect("request")
    }

    #[tokio::test]
    async fn create_contact_returns_created_record() {
        let response = build_router()
            .oneshot(post_json(
                "/api/v1/contacts",
                json!({
                    "first_name": "Grace",
                    "last_name": "Hopper",
                    "email": "grace@example.com",
                    "status": "active"
                }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["status"], "active");
        assert!(payload["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn create_contact_without_email_is_unprocessable() {
        let response = build_router()
            .oneshot(post_json(
                "/api/v1/contacts",
                json!({ "first_name": "Grace", "last_name": "Hopper" }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn deal_for_missing_contact_is_unprocessable() {
        let response = build_router()
            .oneshot(post_json(
                "/api/v1/deals",
                json!({ "title": "Upsell", "contact_id": "77", "value": 900.0 }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn toggle_activity_endpoint_flips_seeded_activity() {
        let response = build_router()
            .oneshot(post_json("/api/v1/activities/2/toggle", json!({})))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["completed"], true);

        let response = build_router()
            .oneshot(post_json("/api/v1/activities/missing/toggle", json!({})))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
