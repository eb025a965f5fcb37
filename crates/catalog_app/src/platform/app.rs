use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{bail, Context};
use catalog_core::{scan_references, update, AppState, Msg, Notice};
use catalog_engine::{
    BuiltinSeed, CodeforcesApi, KattisClient, ProblemStore, ReqwestFetcher, SqliteStore,
    SubmissionService,
};
use catalog_logging::{catalog_debug, catalog_info};
use clap::Parser;
use log::LevelFilter;

use super::cli::{Cli, Command};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging::{self, parse_level};
use super::persistence::load_feedback_record;
use super::render;

pub async fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?.resolve_paths(&cli.config);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.log_level)
    };
    logging::initialize(config.log_destination, level);
    catalog_debug!("config: {:?}", config);

    let sqlite = Arc::new(
        SqliteStore::open(&config.database)
            .with_context(|| format!("opening {}", config.database.display()))?,
    );

    if let Command::Seed = cli.command {
        let added = sqlite.seed(&BuiltinSeed)?;
        catalog_info!("seeded {} problems", added);
        println!("Seeded {added} problems.");
        return Ok(());
    }

    let store: Arc<dyn ProblemStore> = sqlite;
    let runner = build_runner(&config, store.clone());

    let mut state = AppState::new();
    for msg in [
        Msg::CatalogLoaded(store.list().await?),
        Msg::FeedbackRecordRestored(load_feedback_record(&config.feedback_file)),
    ] {
        state = dispatch(state, msg, &runner).await;
    }

    match &cli.command {
        Command::List(args) => {
            print!("{}", render::catalog_table(&state.view(&args.to_filter())));
        }
        Command::Show { identifier } => {
            let Some(problem) = state.problem(identifier) else {
                bail!("no problem {identifier} in the catalog");
            };
            print!(
                "{}",
                render::problem_details(problem, state.feedback_record().get(identifier))
            );
        }
        Command::Check { site, references } => {
            let scan = scan_references(*site, &references.join("\n"));
            print!("{}", render::scan_report(&scan));
        }
        Command::Add(args) => {
            state = dispatch(state, Msg::InputChanged(args.input()), &runner).await;
            let submit = Msg::SubmitClicked {
                source: args.site,
                details: args.details(&config.submitter),
            };
            state = dispatch(state, submit, &runner).await;
            report_notices(&state)?;
        }
        Command::Like { .. } | Command::Dislike { .. } => {
            let Some((identifier, feedback)) = cli.command.feedback() else {
                return Ok(());
            };
            if state.problem(identifier).is_none() {
                bail!("no problem {identifier} in the catalog");
            }
            let clicked = Msg::FeedbackClicked {
                identifier: identifier.to_string(),
                feedback,
            };
            state = dispatch(state, clicked, &runner).await;
            report_notices(&state)?;
            if let Some(problem) = state.problem(identifier) {
                print!(
                    "{}",
                    render::problem_details(problem, state.feedback_record().get(identifier))
                );
            }
        }
        Command::Seed => {}
    }
    Ok(())
}

fn build_runner(config: &AppConfig, store: Arc<dyn ProblemStore>) -> EffectRunner {
    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.to_settings()));
    let submissions = SubmissionService::new(store.clone(), fetcher.clone())
        .with_codeforces(CodeforcesApi::new(fetcher.clone()).with_base_url(&config.codeforces_api))
        .with_kattis(KattisClient::new(fetcher).with_base_url(&config.kattis_base));
    EffectRunner::new(store, submissions, config.feedback_file.clone())
}

/// Feeds `msg` through `update`, running effects until nothing is left.
async fn dispatch(mut state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let mut inbox = VecDeque::from([msg]);
    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        if !effects.is_empty() {
            inbox.extend(runner.run_all(effects, &state).await);
        }
    }
    state
}

/// Prints this run's notices; fails if any of them is an error.
fn report_notices(state: &AppState) -> anyhow::Result<()> {
    let mut failures = 0;
    for notice in state.notices() {
        println!("{}", render::notice_line(notice));
        if matches!(
            notice,
            Notice::SubmissionFailed { .. }
                | Notice::FeedbackFailed { .. }
                | Notice::FeedbackRecordNotSaved(_)
        ) {
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} operation(s) failed");
    }
    Ok(())
}
