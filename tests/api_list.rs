//! Collection query and paging tests.

use std::collections::HashMap;

use projectserver::{Get, List, ProjectClient, DEFAULT_MAX_PAGES};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ProjectClient {
    ProjectClient::new(&server.uri()).unwrap()
}

fn calendar(id: &str) -> serde_json::Value {
    json!({"__metadata": {"type": "PS.Calendar"}, "Id": id, "Name": format!("Calendar {id}")})
}

#[tokio::test]
async fn test_list_sends_query_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Projects"))
        .and(query_param("$select", "Id,Name"))
        .and(query_param("$filter", "Name eq 'Website relaunch'"))
        .and(query_param("$orderby", "Name,StartDate desc"))
        .and(query_param("$top", "5"))
        .and(query_param("$skip", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"results": [{"Id": "p1", "Name": "Website relaunch"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = client(&mock_server)
        .projects()
        .select(&["Id", "Name"])
        .filter("Name eq 'Website relaunch'")
        .order_by("Name", true)
        .order_by("StartDate", false)
        .top(5)
        .skip(10)
        .get()
        .await
        .unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].display_name(), "Website relaunch");
}

#[tokio::test]
async fn test_query_string_parses_back() {
    let mock_server = MockServer::start().await;
    let url = client(&mock_server)
        .calendars()
        .select(&["Id", "Name"])
        .top(25)
        .to_url()
        .unwrap();

    let parsed: HashMap<String, String> = serde_qs::from_str(url.query().unwrap()).unwrap();
    assert_eq!(parsed.get("$select").map(String::as_str), Some("Id,Name"));
    assert_eq!(parsed.get("$top").map(String::as_str), Some("25"));
    assert!(!parsed.contains_key("$skip"));
}

#[tokio::test]
async fn test_get_page_reports_next_link() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/_api/ProjectServer/Calendars?$skiptoken=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"results": [calendar("c1"), calendar("c2")], "__next": next}
        })))
        .mount(&mock_server)
        .await;

    let page = client(&mock_server).calendars().get_page().await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more());
    assert_eq!(page.next_link.as_deref(), Some(next.as_str()));
}

#[tokio::test]
async fn test_get_all_follows_next_links() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .and(query_param_is_missing("$skiptoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {
                "results": [calendar("c1"), calendar("c2")],
                "__next": format!("{uri}/_api/ProjectServer/Calendars?$skiptoken=2")
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .and(query_param("$skiptoken", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {
                "results": [calendar("c3")],
                "__next": format!("{uri}/_api/ProjectServer/Calendars?$skiptoken=3")
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .and(query_param("$skiptoken", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"results": [calendar("c4")]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let calendars = client(&mock_server).calendars().get_all().await.unwrap();

    let ids: Vec<&str> = calendars.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3", "c4"]);
}

#[tokio::test]
async fn test_get_returns_first_page_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Phases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {
                "results": [{"Id": "ph1", "Name": "Create"}],
                "__next": format!("{}/_api/ProjectServer/Phases?$skip=1", mock_server.uri())
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let phases = client(&mock_server).phases().get().await.unwrap();
    assert_eq!(phases.len(), 1);
}

#[tokio::test]
async fn test_nometadata_collection_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Stages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"Id": "s1", "Name": "Propose"}, {"Id": "s2", "Name": "Select"}]
        })))
        .mount(&mock_server)
        .await;

    let stages = client(&mock_server).stages().get_all().await.unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[1].name.as_deref(), Some("Select"));
}

#[tokio::test]
async fn test_malformed_collection_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": {"Id": "c1"}})))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).calendars().get().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_all_stops_at_page_limit() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/_api/ProjectServer/Calendars?$skiptoken=again", mock_server.uri());

    // Every page points at another page
    Mock::given(method("GET"))
        .and(path("/_api/ProjectServer/Calendars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"results": [calendar("c1"), calendar("c2")], "__next": next}
        })))
        .expect(1000)
        .mount(&mock_server)
        .await;

    let calendars = client(&mock_server).calendars().get_all().await.unwrap();

    assert_eq!(DEFAULT_MAX_PAGES, 1000);
    assert_eq!(calendars.len(), 2 * 1000);
}
