//! Project Server CLI binary.
//!
//! A command-line interface for interacting with the Project Server REST API.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use projectserver::cli::{Cli, Command, Entity, WaitArgs};
use projectserver::output::PrettyPrint;
use projectserver::{
    kind, Calendar, Collection, Created, CustomField, EnterpriseProjectType, EnterpriseResource,
    Get, Instance, Kind, List, LookupTable, Page, Phase, Project, ProjectClient, ProjectError,
    QueueJobResult, Stage, Task, TimeSheetPeriod, WaitOptions,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ProjectClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ProjectError::ConfigMissing(_)) {
                eprintln!("Hint: Set PROJECT_SERVER_URL to the PWA site URL");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ProjectClient, cli: Cli) -> projectserver::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::List {
            entity,
            top,
            skip,
            filter,
            all,
        } => {
            let options = ListOptions {
                top,
                skip,
                filter,
                all,
            };
            handle_list(client, entity, &options, json).await
        }
        Command::Get { entity, id } => handle_get(client, entity, id, json).await,
        Command::Tasks { project_id, draft } => {
            handle_tasks(client, project_id, draft, json).await
        }
        Command::CheckOut { project_id } => handle_check_out(client, project_id, json).await,
        Command::Publish {
            project_id,
            check_in,
            wait,
        } => {
            let draft = client.projects().get_by_id(project_id).draft();
            let job = draft.publish(check_in).await?;
            finish_job(job, &wait, json).await
        }
        Command::CheckIn {
            project_id,
            force,
            wait,
        } => {
            let draft = client.projects().get_by_id(project_id).draft();
            let job = draft.check_in(force).await?;
            finish_job(job, &wait, json).await
        }
        Command::Job {
            project_id,
            job_id,
            cancel,
            wait,
        } => handle_job(client, project_id, job_id, cancel, &wait, json).await,
    }
}

struct ListOptions {
    top: Option<u32>,
    skip: Option<u32>,
    filter: Option<String>,
    all: bool,
}

impl ListOptions {
    fn apply<K: Kind>(&self, mut collection: Collection<K>) -> Collection<K> {
        if let Some(top) = self.top {
            collection = collection.top(top);
        }
        if let Some(skip) = self.skip {
            collection = collection.skip(skip);
        }
        if let Some(ref filter) = self.filter {
            collection = collection.filter(filter);
        }
        collection
    }
}

async fn handle_list(
    client: &ProjectClient,
    entity: Entity,
    options: &ListOptions,
    json: bool,
) -> projectserver::Result<()> {
    match entity {
        Entity::Project => {
            list(options.apply(client.projects()), options.all, json, |p: &Project| {
                ProjectRow::from(p)
            })
            .await
        }
        Entity::Calendar => {
            list(options.apply(client.calendars()), options.all, json, |c: &Calendar| {
                NamedRow::new(&c.id, c.name.as_deref())
            })
            .await
        }
        Entity::CustomField => {
            list(options.apply(client.custom_fields()), options.all, json, |f: &CustomField| {
                NamedRow::new(&f.id, f.name.as_deref())
            })
            .await
        }
        Entity::EnterpriseResource => {
            list(
                options.apply(client.enterprise_resources()),
                options.all,
                json,
                |r: &EnterpriseResource| NamedRow::new(&r.id, r.name.as_deref()),
            )
            .await
        }
        Entity::EnterpriseProjectType => {
            list(
                options.apply(client.enterprise_project_types()),
                options.all,
                json,
                |t: &EnterpriseProjectType| NamedRow::new(&t.id, t.name.as_deref()),
            )
            .await
        }
        Entity::LookupTable => {
            list(options.apply(client.lookup_tables()), options.all, json, |t: &LookupTable| {
                NamedRow::new(&t.id, t.name.as_deref())
            })
            .await
        }
        Entity::Phase => {
            list(options.apply(client.phases()), options.all, json, |p: &Phase| {
                NamedRow::new(&p.id, p.name.as_deref())
            })
            .await
        }
        Entity::Stage => {
            list(options.apply(client.stages()), options.all, json, |s: &Stage| {
                NamedRow::new(&s.id, s.name.as_deref())
            })
            .await
        }
        Entity::TimesheetPeriod => {
            list(
                options.apply(client.timesheet_periods()),
                options.all,
                json,
                |p: &TimeSheetPeriod| NamedRow::new(&p.id, p.name.as_deref()),
            )
            .await
        }
    }
}

async fn handle_get(
    client: &ProjectClient,
    entity: Entity,
    id: String,
    json: bool,
) -> projectserver::Result<()> {
    match entity {
        Entity::Project => show(client.projects().get_by_id(id), json).await,
        Entity::Calendar => show(client.calendars().get_by_id(id), json).await,
        Entity::CustomField => show(client.custom_fields().get_by_id(id), json).await,
        Entity::EnterpriseResource => {
            show(client.enterprise_resources().get_by_id(id), json).await
        }
        Entity::EnterpriseProjectType => {
            show(client.enterprise_project_types().get_by_id(id), json).await
        }
        Entity::LookupTable => show(client.lookup_tables().get_by_id(id), json).await,
        Entity::Phase => show(client.phases().get_by_id(id), json).await,
        Entity::Stage => show(client.stages().get_by_id(id), json).await,
        Entity::TimesheetPeriod => show(client.timesheet_periods().get_by_id(id), json).await,
    }
}

async fn handle_tasks(
    client: &ProjectClient,
    project_id: String,
    draft: bool,
    json: bool,
) -> projectserver::Result<()> {
    let project = client.projects().get_by_id(project_id);
    if draft {
        list(project.draft().tasks(), true, json, |t: &Task| TaskRow::from(t)).await
    } else {
        list(project.tasks(), true, json, |t: &Task| TaskRow::from(t)).await
    }
}

async fn handle_check_out(
    client: &ProjectClient,
    project_id: String,
    json: bool,
) -> projectserver::Result<()> {
    let draft = client.projects().get_by_id(project_id).check_out().await?;
    output_single(&draft.data, json)
}

async fn handle_job(
    client: &ProjectClient,
    project_id: String,
    job_id: String,
    cancel: bool,
    wait: &WaitArgs,
    json: bool,
) -> projectserver::Result<()> {
    let job: Instance<kind::QueueJob> = client
        .projects()
        .get_by_id(project_id)
        .queue_jobs()
        .get_by_id(job_id);

    if cancel {
        job.cancel().await?;
        eprintln!("Cancel requested");
    }

    if wait.wait {
        let result = job.wait_for_job(wait_options(wait)).await?;
        return output_job_result(&result, json);
    }

    output_single(&job.get().await?, json)
}

/// Print a freshly queued job, waiting on it first when asked to.
async fn finish_job(
    job: Created<kind::QueueJob>,
    wait: &WaitArgs,
    json: bool,
) -> projectserver::Result<()> {
    if !wait.wait {
        return output_single(&job.data, json);
    }
    let result = job.wait(wait_options(wait)).await?;
    output_job_result(&result, json)
}

fn wait_options(wait: &WaitArgs) -> WaitOptions {
    let options = WaitOptions::default();
    match wait.timeout {
        Some(secs) => options.with_timeout(Duration::from_secs(secs)),
        None => options,
    }
}

fn output_job_result(result: &QueueJobResult, json: bool) -> projectserver::Result<()> {
    output_single(&result.data, json)?;
    if result.timed_out {
        eprintln!("Timed out waiting for the job; it is still {}", result.state());
    }
    Ok(())
}

async fn show<K>(instance: Instance<K>, json: bool) -> projectserver::Result<()>
where
    K: Kind,
    K::Data: Serialize + PrettyPrint,
{
    let item = instance.get().await?;
    output_single(&item, json)
}

async fn list<K, R, F>(
    collection: Collection<K>,
    all: bool,
    json: bool,
    to_row: F,
) -> projectserver::Result<()>
where
    K: Kind,
    K::Data: Serialize,
    R: Tabled,
    F: Fn(&K::Data) -> R,
{
    let page = if all {
        Page::new(collection.get_all().await?, None)
    } else {
        collection.get_page().await?
    };
    output_page(&page, json, to_row)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> projectserver::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> projectserver::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if page.has_more() {
            println!("\n{} items (more available, use --all)", page.len());
        } else {
            println!("\n{} items", page.len());
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    id: String,
    name: String,
    #[tabled(rename = "checked out")]
    checked_out: String,
    published: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.display_name().to_string(),
            checked_out: if p.is_checked_out { "yes" } else { "no" }.to_string(),
            published: p
                .last_published_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TaskRow {
    id: String,
    name: String,
    duration: String,
    #[tabled(rename = "%")]
    percent: String,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone().unwrap_or_default(),
            duration: t.duration.clone().unwrap_or_default(),
            percent: t
                .percent_complete
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct NamedRow {
    id: String,
    name: String,
}

impl NamedRow {
    fn new(id: &str, name: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.unwrap_or_default().to_string(),
        }
    }
}
