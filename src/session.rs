use std::io::{BufRead, Write};

use anyhow::Result;

use crate::advisor::{evaluate, BrewParams, GoalTag, Method, Recommendation, TasteTag};
use crate::config::Config;
use crate::history::{LogEntry, LogStore};
use crate::output::render_recommendation;

/// Where the wizard currently is. Selecting "balanced" skips the goal
/// question; any field edit while a recommendation is shown re-evaluates
/// in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    NoTaste,
    GoalPending,
    RecommendationShown,
}

struct SessionState {
    stage: Stage,
    taste: Option<TasteTag>,
    params: BrewParams,
    coffee_name: Option<String>,
}

/// Interactive taste → goal → recommendation loop. Generic over the
/// reader and writer so tests can drive it with canned input.
pub fn run_session<R: BufRead, W: Write>(
    config: &Config,
    store: &mut LogStore,
    input: R,
    output: &mut W,
) -> Result<()> {
    let mut state = SessionState {
        stage: Stage::NoTaste,
        taste: None,
        params: BrewParams {
            method: config.brew.method,
            goal: config.brew.goal,
            ..BrewParams::default()
        },
        coffee_name: None,
    };

    let hint = config.hint_for(config.brew.method);
    writeln!(output, "brew-compass session ({})", config.brew.method)?;
    writeln!(
        output,
        "typical recipe: {}g in, {}g out, {}s",
        hint.dose, hint.yield_g, hint.time
    )?;
    prompt_taste(output)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        match state.stage {
            Stage::NoTaste => handle_taste_selection(&mut state, trimmed, output)?,
            Stage::GoalPending => {
                match trimmed.parse::<GoalTag>() {
                    Ok(goal) => state.params.goal = goal,
                    Err(_) => {
                        writeln!(output, "unknown goal, keeping \"{}\"", state.params.goal)?;
                    }
                }
                state.stage = Stage::RecommendationShown;
                show_recommendation(&state, output)?;
            }
            Stage::RecommendationShown => {
                handle_command(&mut state, store, trimmed, output)?;
            }
        }
    }
    Ok(())
}

fn handle_taste_selection<W: Write>(
    state: &mut SessionState,
    raw: &str,
    output: &mut W,
) -> Result<()> {
    match raw.parse::<TasteTag>() {
        Ok(TasteTag::Balanced) => {
            state.taste = Some(TasteTag::Balanced);
            state.stage = Stage::RecommendationShown;
            show_recommendation(state, output)?;
        }
        Ok(taste) => {
            state.taste = Some(taste);
            state.stage = Stage::GoalPending;
            writeln!(output, "What would you like more of? (acidic/sweet/body/fix)")?;
        }
        Err(_) => {
            writeln!(output, "unrecognized taste: {raw}")?;
            prompt_taste(output)?;
        }
    }
    Ok(())
}

fn handle_command<W: Write>(
    state: &mut SessionState,
    store: &mut LogStore,
    raw: &str,
    output: &mut W,
) -> Result<()> {
    let (command, arg) = match raw.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (raw, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "dose" => state.params.dose = non_empty(arg),
        "yield" => state.params.yield_g = non_empty(arg),
        "time" => state.params.time = non_empty(arg),
        "temp" | "temperature" => state.params.temperature = non_empty(arg),
        "method" => state.params.method = Method::from_raw(non_empty(arg).as_deref()),
        "name" => {
            state.coffee_name = non_empty(arg);
            return Ok(());
        }
        "taste" => match arg.parse::<TasteTag>() {
            Ok(taste) => state.taste = Some(taste),
            Err(_) => {
                writeln!(output, "unrecognized taste: {arg}")?;
                return Ok(());
            }
        },
        "goal" => match arg.parse::<GoalTag>() {
            Ok(goal) => state.params.goal = goal,
            Err(_) => {
                writeln!(output, "unrecognized goal: {arg}")?;
                return Ok(());
            }
        },
        "save" => return save_entry(state, store, output),
        "reset" => {
            state.taste = None;
            state.stage = Stage::NoTaste;
            prompt_taste(output)?;
            return Ok(());
        }
        _ => {
            writeln!(
                output,
                "commands: dose/yield/time/temp/method/name/taste/goal <value>, save, reset, quit"
            )?;
            return Ok(());
        }
    }

    // Any accepted edit recomputes immediately.
    show_recommendation(state, output)?;
    Ok(())
}

fn save_entry<W: Write>(
    state: &SessionState,
    store: &mut LogStore,
    output: &mut W,
) -> Result<()> {
    if state.params.dose_g() <= 0.0 || state.params.yield_out_g() <= 0.0 {
        writeln!(output, "Enter dose and yield before logging this brew.")?;
        return Ok(());
    }
    let entry = LogEntry::from_params(
        &state.params,
        state.coffee_name.clone(),
        state.taste.map(|t| t.as_slug().to_string()),
    );
    let id = store.append(entry)?;
    writeln!(output, "Logged brew {id}.")?;
    Ok(())
}

fn show_recommendation<W: Write>(state: &SessionState, output: &mut W) -> Result<()> {
    let rec: Recommendation = evaluate(state.taste, &state.params);
    writeln!(output, "{}", render_recommendation(&rec))?;
    Ok(())
}

fn prompt_taste<W: Write>(output: &mut W) -> Result<()> {
    writeln!(
        output,
        "How does it taste? (sour/bitter/balanced/weak/strong/salty/hollow/astringent/muddled)"
    )?;
    Ok(())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
