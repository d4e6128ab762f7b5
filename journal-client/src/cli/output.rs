use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use journal_client::Result;
use journal_client::domain::{Invocation, TransactionKind};
use journal_client::services::WorkflowOutcome;

/// Spinner on stderr while a submit waits for commitment. Only shown when
/// stderr is a terminal.
pub fn commit_spinner(invocation: &Invocation, contract: &str) -> Option<ProgressBar> {
    if !invocation.operation.has_submit(contract) || !Term::stderr().is_term() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Waiting for journal {} to commit...",
        invocation.operation.journal()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn print_outcome(outcome: &WorkflowOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    for step in &outcome.steps {
        println!();
        println!(
            "{} {} Transaction: {}",
            style("-->").cyan(),
            step.kind,
            step.transaction
        );
        match step.kind {
            TransactionKind::Submit => {
                println!("*** Result: committed");
                if !step.result.is_empty() {
                    println!("{}", step.result.pretty());
                }
            }
            TransactionKind::Query => println!("*** Result: {}", step.result.pretty()),
        }
    }
    Ok(())
}
