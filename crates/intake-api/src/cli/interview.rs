//! Interactive interview loop.
//!
//! The loop asks for input in whatever form the current step needs
//! (yes/no, a category pick, free text), hands it to the session
//! controller, and renders the outcome. Every error is reported and the
//! same step is asked again.

use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use intake_core::chat::controller::{HandleOutcome, SessionController};
use intake_core::chat::session::Session;
use intake_types::error::SessionError;
use intake_types::interview::InterviewStep;
use intake_types::turn::Speaker;

use crate::state::AppState;

use super::commands::{self, InterviewCommand};

/// What the loop should do after a step.
enum Flow {
    Continue,
    Quit,
}

/// Run one interactive session until the user quits.
pub async fn run_interview(state: &AppState, quiet: bool) -> anyhow::Result<()> {
    let model = state.model()?;
    let controller = state.controller();
    let mut session = Session::new(model);

    tracing::info!(
        session_id = %session.id(),
        provider = session.model().name(),
        model = %state.config.model.model,
        "Interview session started"
    );

    if !quiet {
        print_banner(state, &session);
    }

    loop {
        let flow = match session.step() {
            InterviewStep::AwaitingConfirmation => ask_confirmation(&controller, &mut session).await?,
            InterviewStep::CategorySelection => ask_category(&controller, &mut session).await?,
            InterviewStep::DetailEntry | InterviewStep::OpenDialogue => {
                ask_text(&controller, &mut session).await?
            }
            InterviewStep::Declined => offer_restart(&controller, &mut session)?,
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    tracing::info!(
        session_id = %session.id(),
        turns = session.transcript().len(),
        "Interview session ended"
    );
    println!();
    println!("  {}", style("Goodbye.").dim());
    Ok(())
}

async fn ask_confirmation(
    controller: &SessionController,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    let confirmed = Confirm::new()
        .with_prompt(controller.prompt_for(InterviewStep::AwaitingConfirmation))
        .default(true)
        .interact()?;

    let answer = if confirmed { "yes" } else { "no" };
    report(controller.handle(session, answer).await, session);
    Ok(Flow::Continue)
}

async fn ask_category(
    controller: &SessionController,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    let categories = controller.machine().categories();
    let index = Select::new()
        .with_prompt(controller.prompt_for(InterviewStep::CategorySelection))
        .items(categories)
        .default(0)
        .interact()?;

    report(controller.handle(session, &categories[index]).await, session);
    Ok(Flow::Continue)
}

async fn ask_text(controller: &SessionController, session: &mut Session) -> anyhow::Result<Flow> {
    println!();
    println!("  {}", style(controller.prompt_for(session.step())).dim());
    let line: String = Input::new()
        .with_prompt(format!("{}", style("You").green().bold()))
        .allow_empty(true)
        .interact_text()?;

    if let Some(command) = commands::parse(&line) {
        return Ok(run_command(command, controller, session));
    }

    let spinner = thinking_spinner();
    let result = controller.handle(session, &line).await;
    spinner.finish_and_clear();

    report(result, session);
    Ok(Flow::Continue)
}

fn offer_restart(controller: &SessionController, session: &mut Session) -> anyhow::Result<Flow> {
    println!();
    println!("  {}", controller.prompt_for(InterviewStep::Declined));
    println!();

    let restart = Confirm::new()
        .with_prompt("Start over?")
        .default(false)
        .interact()?;

    if restart {
        controller.reset(session);
        Ok(Flow::Continue)
    } else {
        Ok(Flow::Quit)
    }
}

fn run_command(
    command: InterviewCommand,
    controller: &SessionController,
    session: &mut Session,
) -> Flow {
    match command {
        InterviewCommand::Help => commands::print_help(),
        InterviewCommand::Reset => {
            controller.reset(session);
            println!();
            println!("  {} Interview restarted.", style("↺").cyan());
        }
        InterviewCommand::Transcript => print_transcript(session),
        InterviewCommand::Quit => return Flow::Quit,
        InterviewCommand::Unknown(name) => {
            println!(
                "  {} Unknown command {}. Type {} for the list.",
                style("?").yellow().bold(),
                style(name).bold(),
                style("/help").cyan()
            );
        }
    }
    Flow::Continue
}

/// Print the assistant reply after a model call, or the error that kept the
/// session where it was.
fn report(result: Result<HandleOutcome, SessionError>, session: &Session) {
    match result {
        Ok(outcome) => {
            if !outcome.delta.is_empty() {
                println!();
                println!("  {} {}", style("Assistant:").cyan().bold(), outcome.display);
            }
        }
        Err(SessionError::Validation(err)) => {
            println!("  {} {err}", style("!").yellow().bold());
        }
        Err(err) => {
            tracing::debug!(session_id = %session.id(), step = %session.step(), "Reporting error to user");
            eprintln!(
                "  {} {err}. Nothing was recorded; please try again.",
                style("✗").red().bold()
            );
        }
    }
}

fn print_transcript(session: &Session) {
    let transcript = session.transcript();
    println!();
    if transcript.is_empty() {
        println!("  {}", style("No conversation yet.").dim());
        return;
    }
    for turn in transcript.turns() {
        let label = match turn.speaker {
            Speaker::User => style("You").green().bold(),
            Speaker::Assistant => style("Assistant").cyan().bold(),
        };
        println!(
            "  {} {} {}",
            style(format!("[{}]", turn.id)).dim(),
            label,
            turn.text
        );
    }
}

fn print_banner(state: &AppState, session: &Session) {
    println!();
    println!("  {}", style("Intake").bold());
    println!(
        "  {} {} {}",
        style("backend:").dim(),
        session.model().name(),
        style(&state.config.model.model).dim()
    );
    println!(
        "  {} {}",
        style("Type /help during text entry for commands.").dim(),
        style(format!("session {}", session.id())).dim()
    );
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(template);
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
