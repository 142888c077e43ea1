//! CLI argument parsing tests.

use clap::Parser;
use projectserver::cli::{Cli, Command, Entity, WaitArgs};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from([
        "projectserver",
        "get",
        "project",
        "263fc8d7-427c-e111-92fc-00155d3ba208",
    ]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert!(matches!(entity, Entity::Project));
            assert_eq!(id, "263fc8d7-427c-e111-92fc-00155d3ba208");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["projectserver", "list", "projects"]);

    assert!(!cli.json);
    match cli.command {
        Command::List { entity, all, .. } => {
            assert!(matches!(entity, Entity::Project));
            assert!(!all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["projectserver", "--json", "list", "projects"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["projectserver", "list", "projects", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_list_query_args() {
    let cli = Cli::parse_from([
        "projectserver",
        "list",
        "calendars",
        "--top",
        "5",
        "--skip",
        "10",
        "--filter",
        "Name eq 'Standard'",
        "--all",
    ]);

    match cli.command {
        Command::List {
            entity,
            top,
            skip,
            filter,
            all,
        } => {
            assert_eq!(entity, Entity::Calendar);
            assert_eq!(top, Some(5));
            assert_eq!(skip, Some(10));
            assert_eq!(filter.as_deref(), Some("Name eq 'Standard'"));
            assert!(all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_entity_aliases() {
    let cases = [
        ("project", Entity::Project),
        ("custom-field", Entity::CustomField),
        ("custom-fields", Entity::CustomField),
        ("resources", Entity::EnterpriseResource),
        ("epts", Entity::EnterpriseProjectType),
        ("lookup-tables", Entity::LookupTable),
        ("timesheet-periods", Entity::TimesheetPeriod),
    ];
    for (arg, expected) in cases {
        let cli = Cli::parse_from(["projectserver", "list", arg]);
        match cli.command {
            Command::List { entity, .. } => assert_eq!(entity, expected, "alias {arg}"),
            _ => panic!("Expected List command"),
        }
    }
}

#[test]
fn test_tasks_draft_flag() {
    let cli = Cli::parse_from(["projectserver", "tasks", "p1", "--draft"]);
    match cli.command {
        Command::Tasks { project_id, draft } => {
            assert_eq!(project_id, "p1");
            assert!(draft);
        }
        _ => panic!("Expected Tasks command"),
    }
}

#[test]
fn test_publish_with_wait_and_timeout() {
    let cli = Cli::parse_from([
        "projectserver",
        "publish",
        "p1",
        "--check-in",
        "--wait",
        "--timeout",
        "30",
    ]);
    match cli.command {
        Command::Publish {
            project_id,
            check_in,
            wait,
        } => {
            assert_eq!(project_id, "p1");
            assert!(check_in);
            assert_eq!(
                wait,
                WaitArgs {
                    wait: true,
                    timeout: Some(30)
                }
            );
        }
        _ => panic!("Expected Publish command"),
    }
}

#[test]
fn test_timeout_requires_wait() {
    let result = Cli::try_parse_from(["projectserver", "check-in", "p1", "--timeout", "30"]);
    assert!(result.is_err());
}

#[test]
fn test_job_cancel_conflicts_with_wait() {
    let result = Cli::try_parse_from(["projectserver", "job", "p1", "j1", "--cancel", "--wait"]);
    assert!(result.is_err());

    let cli = Cli::parse_from(["projectserver", "job", "p1", "j1", "--cancel"]);
    match cli.command {
        Command::Job {
            project_id,
            job_id,
            cancel,
            wait,
        } => {
            assert_eq!(project_id, "p1");
            assert_eq!(job_id, "j1");
            assert!(cancel);
            assert!(!wait.wait);
        }
        _ => panic!("Expected Job command"),
    }
}

#[test]
fn test_missing_required_args() {
    let result = Cli::try_parse_from(["projectserver", "get", "project"]);
    assert!(result.is_err());

    let result = Cli::try_parse_from(["projectserver", "list", "widgets"]);
    assert!(result.is_err());
}
