#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use chrono::{Duration, Local, TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tasklist::api::{router, AppState};
    use tasklist::db::tasks::Tasks;
    use tasklist::libs::formatter::end_of_local_day;
    use tasklist::libs::tagged;
    use tasklist::libs::task::Task;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Tasks::in_memory().unwrap()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    async fn list(app: &Router, uri: &str) -> Vec<Task> {
        let (status, body) = send(app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        tagged::parse(body["tasks"].as_str().unwrap()).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Task {
        let (status, body) = send(app, Method::POST, "/api/create-task", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        tagged::parse(body["task"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_toggle_delete_scenario() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/create-task", Some(json!({"title": "Buy milk"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task successfully created.");
        let created: Task = tagged::parse(body["task"].as_str().unwrap()).unwrap();
        assert_eq!(body["id"], created.id);
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description, "");
        assert!(!created.completed);

        let tasks = list(&app, "/api/all-tasks").await;
        assert_eq!(tasks, vec![created.clone()]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/update-task",
            Some(json!({"id": created.id, "completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task successfully updated.");
        let toggled: Option<Task> = tagged::parse(body["task"].as_str().unwrap()).unwrap();
        assert!(toggled.unwrap().completed);
        assert!(list(&app, "/api/all-tasks").await[0].completed);

        let (status, body) = send(&app, Method::POST, "/api/delete-task", Some(json!({"id": created.id}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task successfully deleted.");
        assert!(list(&app, "/api/all-tasks").await.is_empty());
    }

    #[tokio::test]
    async fn test_non_post_to_mutations_is_rejected() {
        let app = app();

        for uri in ["/api/create-task", "/api/update-task", "/api/delete-task"] {
            for method in [Method::GET, Method::PUT, Method::DELETE] {
                let (status, body) = send(&app, method.clone(), uri, None).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
                assert_eq!(body, json!({"message": "Only POST requests allowed"}));
            }
        }

        let (status, _) = send(&app, Method::PUT, "/api/create-task", Some(json!({"title": "Sneaky"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(list(&app, "/api/all-tasks").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/create-task", Some(json!({"description": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
        assert!(list(&app, "/api/all-tasks").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_untouched_form_draft() {
        let app = app();
        let draft = json!({
            "title": "Buy milk",
            "description": null,
            "created_at": "2024-05-01T09:00:00.000Z",
            "completed_at": null,
            "completed": false
        });

        let created = create(&app, draft).await;
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description, "");
        assert_eq!(created.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        assert_eq!(created.completed_at, None);
        assert_eq!(list(&app, "/api/all-tasks").await, vec![created]);
    }

    #[tokio::test]
    async fn test_sort_tasks_orders_by_deadline() {
        let app = app();
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        for (title, days) in [("late", 9), ("early", 1), ("middle", 4)] {
            let due = rfc3339(base + Duration::days(days));
            create(&app, json!({"title": title, "completed_at": due})).await;
        }

        let (_, body) = send(&app, Method::GET, "/api/sort-tasks", None).await;
        assert_eq!(body["message"], "Task successfully sorted.");

        let sorted = list(&app, "/api/sort-tasks").await;
        let titles: Vec<&str> = sorted.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["early", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_update_is_partial_and_keeps_created_at() {
        let app = app();
        let due = Utc.with_ymd_and_hms(2030, 5, 5, 12, 0, 0).unwrap();
        let created = create(
            &app,
            json!({"title": "Report", "description": "Q2 numbers", "completed_at": rfc3339(due)}),
        )
        .await;

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/update-task",
            Some(json!({"id": created.id, "title": "Final report", "created_at": "2000-01-01T00:00:00Z"})),
        )
        .await;
        let updated: Option<Task> = tagged::parse(body["task"].as_str().unwrap()).unwrap();
        let updated = updated.unwrap();

        assert_eq!(updated.title, "Final report");
        assert_eq!(updated.description, "Q2 numbers");
        assert_eq!(updated.completed_at, Some(due));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_unknown_id_succeeds_with_null_task() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/update-task", Some(json!({"id": 404, "completed": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tagged::parse::<Option<Task>>(body["task"].as_str().unwrap()).unwrap(), None);

        let (status, body) = send(&app, Method::POST, "/api/delete-task", Some(json!({"id": 404}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tagged::parse::<Option<Task>>(body["task"].as_str().unwrap()).unwrap(), None);
    }

    #[tokio::test]
    async fn test_limit_tasks_returns_tasks_due_today() {
        let app = app();
        let end = end_of_local_day(Local::now());
        create(&app, json!({"title": "today", "completed_at": rfc3339(end - Duration::minutes(1))})).await;
        create(&app, json!({"title": "next week", "completed_at": rfc3339(end + Duration::days(7))})).await;
        create(&app, json!({"title": "whenever"})).await;

        let due = list(&app, "/api/limit-tasks").await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "today");
    }

    #[tokio::test]
    async fn test_index_renders_tasks() {
        let app = app();
        create(&app, json!({"title": "Water plants"})).await;

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Water plants"));
    }

    fn rfc3339(date: chrono::DateTime<Utc>) -> String {
        date.to_rfc3339()
    }
}
