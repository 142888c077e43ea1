//! Basic example demonstrating the Project Server client.
//!
//! Run with:
//! ```
//! PROJECT_SERVER_URL=https://contoso.sharepoint.com/sites/pwa \
//! PROJECT_SERVER_TOKEN=your-token cargo run --example basic
//! ```

use projectserver::{
    Add, Get, List, ProjectClient, ProjectCreationInformation, TaskCreationInformation,
    WaitOptions,
};

#[tokio::main]
async fn main() -> projectserver::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Project Server client...");
    let client = ProjectClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of projects
    println!("\n--- Listing Projects (first page) ---");
    let page = client
        .projects()
        .select(&["Id", "Name", "IsCheckedOut"])
        .top(10)
        .get_page()
        .await?;
    println!("Found {} projects (more: {})", page.len(), page.has_more());

    for project in &page {
        println!("  - {} ({})", project.display_name(), project.id);
    }

    // Create a project and give it a first task
    println!("\n--- Creating Project ---");
    let created = client
        .projects()
        .add(&ProjectCreationInformation::new("TestProject"))
        .await?;
    tracing::info!(id = %created.data.id, "created project");

    let draft = created.instance.check_out().await?.instance;
    let mut task = TaskCreationInformation::new("Kick-off");
    task.duration = Some("1d".to_string());
    draft.tasks().add(&task).await?;

    // Publish, check in and wait for the queue
    println!("\n--- Publishing ---");
    let job = draft.publish(true).await?;
    let result = job.wait(WaitOptions::default()).await?;
    if result.timed_out {
        println!("Still {} when the wait gave up", result.state());
    } else {
        println!("Publish finished as {}", result.state());
    }

    let project = created.instance.get().await?;
    println!("Project: {}", project.display_name());
    println!("  ID: {}", project.id);
    println!("  Checked out: {}", project.is_checked_out);

    Ok(())
}
