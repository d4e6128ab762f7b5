use std::sync::Arc;

use journal_client::Result;
use journal_client::adapters::HttpGateway;
use journal_client::config::Config;
use journal_client::domain::Invocation;
use journal_client::services::{JournalWorkflow, ProfileResolver, WorkflowSettings};

use super::output;

pub async fn run(
    config: &Config,
    resolver: ProfileResolver,
    invocation: &Invocation,
    json: bool,
) -> Result<()> {
    let gateway = Arc::new(HttpGateway::new(&config.gateway)?);
    let workflow = JournalWorkflow::new(gateway, resolver, WorkflowSettings::from(config));

    let spinner = output::commit_spinner(invocation, &config.contract);
    let outcome = workflow.run(invocation).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    output::print_outcome(&outcome?, json)
}
