use anyhow::{bail, Context, Result};
use newsroom::cli::commands::{RunCommand, SchoolsCommand};
use newsroom::cli::output::{
    create_spinner, format_output, format_run_stats, format_stage_banner, format_stage_stats,
    style, CHECK, CROSS, FLOPPY, INFO, PENCIL, ROCKET, WARN,
};
use newsroom::cli::{Cli, Command};
use newsroom::core::knowledge::SCHOOLS;
use newsroom::{
    create_client, save_results, PipelineState, Runner, SaveOutcome, Settings, StageId,
    StageResult,
};
use std::io::{self, Write as _};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd).await?,
        Command::Stages => list_stages(),
        Command::Schools(cmd) => show_schools(cmd),
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    let mut settings = Settings::from_env().context("configuration error")?;
    if let Some(max_tokens) = cmd.max_tokens {
        settings.max_tokens = max_tokens;
    }
    if let Some(temperature) = cmd.temperature {
        settings.temperature = temperature;
    }
    if let Some(output_dir) = &cmd.output_dir {
        settings.output_dir = output_dir.clone();
    }

    let topic = cmd.topic.trim();
    if topic.is_empty() {
        bail!("topic must not be empty");
    }

    let client = create_client(&settings).context("failed to build backend client")?;
    let mut runner = Runner::new(client, &settings);
    let mut state = runner.reset(topic);

    println!(
        "{} {} {}",
        ROCKET,
        style("newsroom").bold(),
        style(format!("— topic: {topic}")).dim()
    );
    println!(
        "{} model: {}  temperature: {}",
        INFO,
        style(&settings.model).cyan(),
        settings.temperature
    );
    println!();

    if cmd.step {
        run_step_mode(&mut runner, &mut state, cmd, &settings).await
    } else {
        run_auto(&mut runner, &mut state, cmd, &settings).await
    }
}

/// Auto mode: run every remaining stage in order, save on completion.
async fn run_auto(
    runner: &mut Runner,
    state: &mut PipelineState,
    cmd: &RunCommand,
    settings: &Settings,
) -> Result<()> {
    let first = state.current_step;
    let spinner = create_spinner(format_stage_banner(StageId::ALL[first], first));
    let mut on_stage = |result: &StageResult| {
        spinner.println(format!(
            "{} {} {}",
            CHECK,
            style(result.label.as_str()).green(),
            format_stage_stats(result)
        ));
        spinner.println(format_output(&result.output_text, 8));
        spinner.println("");
        let next = result.stage.index() + 1;
        if next < StageId::ALL.len() {
            spinner.set_message(format_stage_banner(StageId::ALL[next], next));
        }
    };

    let outcome = if cmd.no_save {
        runner
            .run_to_completion(state, &mut on_stage)
            .await
            .map(|()| None)
    } else {
        runner
            .run_to_completion_saving(state, &mut on_stage, |s| {
                save_results(s, &settings.output_dir)
            })
            .await
            .map(Some)
    };
    spinner.finish_and_clear();

    let saved = match outcome {
        Ok(saved) => saved,
        Err(e) => {
            println!("{} {}", CROSS, style(&e).red());
            std::process::exit(1);
        }
    };

    println!("{} all stages complete", CHECK);
    println!();
    println!("{}", format_run_stats(state));

    match saved {
        Some(SaveOutcome::Saved(path)) => {
            println!(
                "\n{} Results saved to {}",
                FLOPPY,
                style(path.display()).cyan()
            );
        }
        Some(SaveOutcome::Failed(e)) => {
            // The run itself completed; only the save failed.
            println!("{} Save failed: {:#}", WARN, style(&e).red());
            return Err(e).context("saving results");
        }
        None => {}
    }

    Ok(())
}

/// Step mode: pause after every stage for review, optional edits, and an
/// explicit save decision at the end.
async fn run_step_mode(
    runner: &mut Runner,
    state: &mut PipelineState,
    cmd: &RunCommand,
    settings: &Settings,
) -> Result<()> {
    while !state.is_complete() {
        let step = state.current_step;
        let stage = StageId::ALL[step];
        println!(
            "{} next: {} {} — {}",
            INFO,
            stage.icon(),
            style(stage.label()).bold(),
            style(stage.description()).dim()
        );
        let answer = prompt_line("[Enter] run   [q] quit > ")?;
        if answer.eq_ignore_ascii_case("q") {
            println!("{} stopped before {}", INFO, stage.label());
            return Ok(());
        }

        let spinner = create_spinner(format_stage_banner(stage, step));
        let outcome = runner.execute_step(state, step).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(result) => {
                println!(
                    "{} {} {}",
                    CHECK,
                    style(result.label.as_str()).green(),
                    format_stage_stats(result)
                );
                println!("{}", format_output(&result.output_text, 12));
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                println!(
                    "{} pipeline stays at step {}; run the stage again to retry",
                    INFO, state.current_step
                );
                continue;
            }
        }

        // The latest output may still be edited before it is handed to
        // the next stage; after that it is locked.
        if !state.is_complete() {
            let choice = prompt_line("[Enter] continue   [e] edit output   [q] quit > ")?;
            if choice.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            if choice.eq_ignore_ascii_case("e") {
                let text = read_multiline()?;
                match state.apply_edit(stage, &text) {
                    Ok(()) => {
                        let edited = state.result(stage).map(|r| r.edited).unwrap_or(false);
                        if edited {
                            println!("{} edited output will feed the next stage", PENCIL);
                        } else {
                            println!("{} edit matches the original output; keeping it", INFO);
                        }
                    }
                    Err(e) => println!("{} {}", WARN, style(&e).yellow()),
                }
            }
        }
        println!();
    }

    println!("{} all stages complete", CHECK);
    println!();
    println!("{}", format_run_stats(state));

    if cmd.no_save {
        return Ok(());
    }
    loop {
        let choice = prompt_line("\n[Enter] save results   [s] skip > ")?;
        if choice.eq_ignore_ascii_case("s") {
            return Ok(());
        }
        match runner.save_completed(state, |s| save_results(s, &settings.output_dir)) {
            SaveOutcome::Saved(path) => {
                println!(
                    "{} Results saved to {}",
                    FLOPPY,
                    style(path.display()).cyan()
                );
                return Ok(());
            }
            SaveOutcome::Failed(e) => {
                // Completed results stay in memory; offer another attempt.
                println!("{} Save failed: {:#}", WARN, style(&e).red());
            }
        }
    }
}

fn list_stages() {
    println!("{} Pipeline stages:", INFO);
    for (i, stage) in StageId::ALL.into_iter().enumerate() {
        println!(
            "  {}. {} {} ({})",
            i + 1,
            stage.icon(),
            style(stage.label()).bold(),
            style(stage.key()).dim()
        );
        println!("     {}", style(stage.description()).dim());
    }
}

fn show_schools(cmd: &SchoolsCommand) {
    println!("{} Sci-fi philosophy map — 8 schools:", INFO);
    println!();
    for (i, school) in SCHOOLS.iter().enumerate() {
        println!(
            "{}. {} {}",
            i + 1,
            style(school.name).bold(),
            style(format!("({})", school.route)).dim()
        );
        println!("   {}", school.core_thesis);
        println!("   {}", style(school.key_question).italic());
        if cmd.full {
            for work in school.works {
                let author = if work.author.is_empty() {
                    String::new()
                } else {
                    format!(" — {}", work.author)
                };
                println!("     • {}{}", style(work.title).cyan(), style(author).dim());
                println!("       {}", style(work.note).dim());
            }
        } else {
            let titles = school
                .works
                .iter()
                .map(|w| w.title)
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {}", style(titles).dim());
        }
        println!();
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read stdin")?;
    Ok(line.trim().to_string())
}

fn read_multiline() -> Result<String> {
    println!(
        "{} Enter replacement text; finish with a single '.' on its own line:",
        PENCIL
    );
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line).context("read stdin")?;
        if read == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == "." {
            break;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines.join("\n"))
}
