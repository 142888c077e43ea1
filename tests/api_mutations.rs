//! Request-shape tests for add, delete, update and actions.

use projectserver::{
    Add, Delete, Get, LookupEntryCreationInformation, LookupEntryValue, LookupTableCreationInformation,
    ProjectClient, ProjectCreationInformation, ProjectError, TaskCreationInformation, Update,
    ODATA_VERBOSE,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT_ID: &str = "263fc8d7-427c-e111-92fc-00155d3ba208";
const JOB_ID: &str = "5e8c9b0d-12f4-4c7a-9d2e-6b1a0c3f4e5d";

fn client(server: &MockServer) -> ProjectClient {
    ProjectClient::new(&server.uri()).unwrap()
}

fn api(rest: &str) -> String {
    format!("/_api/ProjectServer/{rest}")
}

fn queued_job() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "d": {"__metadata": {"type": "PS.QueueJob"}, "Id": JOB_ID, "JobState": 1}
    }))
}

#[tokio::test]
async fn test_add_project_posts_creation_information() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("Projects")))
        .and(header("content-type", ODATA_VERBOSE))
        .and(header("accept", ODATA_VERBOSE))
        .and(body_json(json!({"name": "TestProject", "description": "Created by test"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "d": {"Id": PROJECT_ID, "Name": "TestProject", "IsCheckedOut": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut info = ProjectCreationInformation::new("TestProject");
    info.description = Some("Created by test".to_string());

    let created = client(&mock_server).projects().add(&info).await.unwrap();

    assert_eq!(created.data.display_name(), "TestProject");
    assert_eq!(
        created.instance.query().path(),
        format!("_api/ProjectServer/Projects('{PROJECT_ID}')")
    );
}

#[tokio::test]
async fn test_add_wraps_array_properties() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("LookupTables")))
        .and(body_json(json!({
            "name": "Regions",
            "entries": {"results": [
                {"value": {"textValue": "North"}},
                {"value": {"textValue": "South"}}
            ]}
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"d": {"Id": "lt1", "Name": "Regions"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let info = LookupTableCreationInformation {
        name: "Regions".to_string(),
        entries: Some(vec![
            LookupEntryCreationInformation {
                value: Some(LookupEntryValue::text("North")),
                ..Default::default()
            },
            LookupEntryCreationInformation {
                value: Some(LookupEntryValue::text("South")),
                ..Default::default()
            },
        ]),
        ..Default::default()
    };

    let created = client(&mock_server).lookup_tables().add(&info).await.unwrap();
    assert_eq!(created.data.id, "lt1");
}

#[tokio::test]
async fn test_add_without_id_in_response_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("Projects")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"d": {"Name": "x"}})))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .projects()
        .add(&ProjectCreationInformation::new("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_delete_is_tunnelled_through_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("Calendars('c1')")))
        .and(header("x-http-method", "DELETE"))
        .and(header("if-match", "*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .calendars()
        .get_by_id("c1")
        .delete()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_calendar_exception_uses_integer_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("Calendars('c1')/BaseCalendarExceptions(3)")))
        .and(header("x-http-method", "DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .calendars()
        .get_by_id("c1")
        .base_calendar_exceptions()
        .get_by_id(3)
        .delete()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_project_returns_queue_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')"))))
        .and(header("x-http-method", "DELETE"))
        .respond_with(queued_job())
        .expect(1)
        .mount(&mock_server)
        .await;

    let job = client(&mock_server)
        .projects()
        .get_by_id(PROJECT_ID)
        .delete()
        .await
        .unwrap();

    assert_eq!(
        job.instance.query().path(),
        format!("_api/ProjectServer/Projects('{PROJECT_ID}')/QueueJobs('{JOB_ID}')")
    );
}

#[tokio::test]
async fn test_update_draft_merges_with_entity_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')/Draft"))))
        .and(header("x-http-method", "MERGE"))
        .and(header("if-match", "*"))
        .and(body_json(json!({
            "__metadata": {"type": "PS.DraftProject"},
            "Description": "Phase two"
        })))
        .respond_with(queued_job())
        .expect(1)
        .mount(&mock_server)
        .await;

    let job = client(&mock_server)
        .projects()
        .get_by_id(PROJECT_ID)
        .draft()
        .update(&json!({"Description": "Phase two"}))
        .await
        .unwrap();

    assert_eq!(job.data.id, JOB_ID);
}

#[tokio::test]
async fn test_update_rejects_non_object_properties() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .timesheet_periods()
        .get_by_id("tp1")
        .time_sheet()
        .update(&json!(["not", "an", "object"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_check_out_then_add_task() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')/checkOut()"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"__metadata": {"type": "PS.DraftProject"}, "Id": PROJECT_ID, "IsCheckedOut": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')/Draft/Tasks"))))
        .and(body_json(json!({"name": "Kick-off", "duration": "1d"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "d": {"Id": "t1", "Name": "Kick-off"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let draft = client(&mock_server)
        .projects()
        .get_by_id(PROJECT_ID)
        .check_out()
        .await
        .unwrap();
    assert!(draft.data.is_checked_out);

    let mut task = TaskCreationInformation::new("Kick-off");
    task.duration = Some("1d".to_string());
    let created = draft.instance.tasks().add(&task).await.unwrap();

    assert_eq!(
        created.instance.query().path(),
        format!("_api/ProjectServer/Projects('{PROJECT_ID}')/Draft/Tasks('t1')")
    );
}

#[tokio::test]
async fn test_publish_and_check_in_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')/Draft/publish(true)"))))
        .and(header("content-length", "0"))
        .respond_with(queued_job())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api(&format!("Projects('{PROJECT_ID}')/Draft/checkIn(false)"))))
        .respond_with(queued_job())
        .expect(1)
        .mount(&mock_server)
        .await;

    let draft = client(&mock_server).projects().get_by_id(PROJECT_ID).draft();

    let job = draft.publish(true).await.unwrap();
    assert_eq!(
        job.instance.query().path(),
        format!("_api/ProjectServer/Projects('{PROJECT_ID}')/QueueJobs('{JOB_ID}')")
    );

    draft.check_in(false).await.unwrap();
}

#[tokio::test]
async fn test_add_enterprise_resource_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!(
            "Projects('{PROJECT_ID}')/Draft/ProjectResources/AddEnterpriseResourceById"
        ))))
        .and(body_json(json!({"resourceId": "r1"})))
        .respond_with(queued_job())
        .expect(1)
        .mount(&mock_server)
        .await;

    let job = client(&mock_server)
        .projects()
        .get_by_id(PROJECT_ID)
        .draft()
        .project_resources()
        .add_enterprise_resource_by_id("r1")
        .await
        .unwrap();

    assert_eq!(
        job.instance.query().path(),
        format!("_api/ProjectServer/Projects('{PROJECT_ID}')/QueueJobs('{JOB_ID}')")
    );
}

#[tokio::test]
async fn test_calendar_copy_is_addressed_in_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("Calendars('c1')/CopyTo")))
        .and(body_json(json!({"name": "Standard (copy)"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"Id": "c2", "Name": "Standard (copy)"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let copy = client(&mock_server)
        .calendars()
        .get_by_id("c1")
        .copy_to("Standard (copy)")
        .await
        .unwrap();

    assert_eq!(copy.instance.query().path(), "_api/ProjectServer/Calendars('c2')");
}

#[tokio::test]
async fn test_create_project_site_quotes_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!(
            "Projects('{PROJECT_ID}')/CreateProjectSite(siteName='Bob%27%27s-site')"
        ))))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .projects()
        .get_by_id(PROJECT_ID)
        .create_project_site("Bob's-site")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_action_arguments_are_percent_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api(&format!(
            "Projects('{PROJECT_ID}')/CreateProjectSite(siteName='Q%26A%20%232')"
        ))))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("CustomFields/GetByAppAlternateId('why%3Fnot')")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"Id": "cf1", "Name": "Why not"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    client
        .projects()
        .get_by_id(PROJECT_ID)
        .create_project_site("Q&A #2")
        .await
        .unwrap();

    let field = client
        .custom_fields()
        .get_by_app_alternate_id("why?not")
        .get()
        .await
        .unwrap();
    assert_eq!(field.id, "cf1");
}

#[tokio::test]
async fn test_string_keys_keep_reserved_characters() {
    let mock_server = MockServer::start().await;
    let url = client(&mock_server)
        .calendars()
        .get_by_id("50%/night#shift")
        .to_url()
        .unwrap();

    assert_eq!(
        url.path(),
        "/_api/ProjectServer/Calendars('50%25%2Fnight%23shift')"
    );
    assert!(url.fragment().is_none());
}
