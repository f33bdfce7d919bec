//! Line-based wizard session.
//!
//! Walks the four steps over any `BufRead`/`Write` pair. Each step edits a
//! `StepForm` and only writes to the shared state when it moves on, so a
//! blocked gate keeps the user's edits on screen without persisting them.
//!
//! Input conventions on every prompt:
//!
//! - empty line keeps the value shown in brackets;
//! - `:back` goes to the previous step;
//! - `:quit` ends the session.

use std::io::{self, BufRead, Write};

use archdecide_engine::answers::{BusinessGoal, BusinessWeights, Requirement, TextField};
use archdecide_engine::flow::{self, progress, NavigationError, Step, StepForm, StepStatus};
use archdecide_engine::recommend::ScoringWeights;
use archdecide_engine::WizardState;
use archdecide_report::Report;

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    Quit,
    /// Input ran out on `step`. `blocked` is the last gate refusal on that
    /// step, if the user had tried to move on.
    EndOfInput {
        step: Step,
        blocked: Option<NavigationError>,
    },
}

enum Line {
    Value(String),
    Back,
    Quit,
    Eof,
}

enum Flow {
    Goto(Step),
    Blocked(NavigationError),
    Quit,
    Eof,
}

pub fn run<R: BufRead, W: Write>(
    state: &WizardState,
    weights: &ScoringWeights,
    input: &mut R,
    out: &mut W,
) -> io::Result<SessionEnd> {
    let mut step = Step::ProjectOverview;
    let mut form = StepForm::mount(step, state);
    let mut blocked = None;

    loop {
        write_progress(out, step)?;
        let flow = match step {
            Step::ProjectOverview => overview(&mut form, state, input, out)?,
            Step::TechnicalRequirements => technical(&mut form, state, input, out)?,
            Step::BusinessGoals => business(&mut form, state, input, out)?,
            Step::Results => results(&form, state, weights, input, out)?,
        };

        match flow {
            Flow::Goto(next) => {
                step = next;
                form = StepForm::mount(step, state);
                blocked = None;
            }
            Flow::Blocked(err) => {
                writeln!(out, "cannot continue: {err}")?;
                blocked = Some(err);
            }
            Flow::Quit => return Ok(SessionEnd::Quit),
            Flow::Eof => return Ok(SessionEnd::EndOfInput { step, blocked }),
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

fn overview<R: BufRead, W: Write>(
    form: &mut StepForm,
    state: &WizardState,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow> {
    for field in TextField::ALL {
        loop {
            let current = form.draft().text(field);
            if current.is_empty() {
                write!(out, "{} ({}): ", field.label(), field.placeholder())?;
            } else {
                write!(out, "{} [{}]: ", field.label(), current)?;
            }
            out.flush()?;

            match read_line(input)? {
                Line::Eof => return Ok(Flow::Eof),
                Line::Quit => return Ok(Flow::Quit),
                Line::Back => {
                    writeln!(out, "already at the first step")?;
                    continue;
                }
                Line::Value(v) if v.is_empty() => {}
                Line::Value(v) => form.set_text(field, v),
            }
            break;
        }
    }
    Ok(advance(form, state))
}

fn technical<R: BufRead, W: Write>(
    form: &mut StepForm,
    state: &WizardState,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow> {
    for field in Requirement::ALL {
        loop {
            let (low, high) = field.scale();
            write!(
                out,
                "{} (0 {low} - 100 {high}) [{}]: ",
                field.label(),
                form.draft().requirement(field)
            )?;
            out.flush()?;

            match read_line(input)? {
                Line::Eof => return Ok(Flow::Eof),
                Line::Quit => return Ok(Flow::Quit),
                Line::Back => return Ok(retreat(form, state)),
                Line::Value(v) if v.is_empty() => {}
                Line::Value(v) => match v.trim().parse::<u8>() {
                    Ok(n) => {
                        if let Err(e) = form.set_requirement(field, n) {
                            writeln!(out, "{e}")?;
                            continue;
                        }
                    }
                    Err(_) => {
                        writeln!(out, "enter a whole number from 0 to 100")?;
                        continue;
                    }
                },
            }
            break;
        }
    }
    Ok(advance(form, state))
}

fn business<R: BufRead, W: Write>(
    form: &mut StepForm,
    state: &WizardState,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow> {
    loop {
        write_weights(out, form.draft().business_weights())?;
        write!(out, "Adjust a goal as <t|c|f>=<0-100>, or press Enter to continue: ")?;
        out.flush()?;

        match read_line(input)? {
            Line::Eof => return Ok(Flow::Eof),
            Line::Quit => return Ok(Flow::Quit),
            Line::Back => return Ok(retreat(form, state)),
            Line::Value(v) if v.trim().is_empty() => return Ok(advance(form, state)),
            Line::Value(v) => match parse_goal_assignment(&v) {
                Ok((goal, value)) => {
                    if let Err(e) = form.drag_goal(goal, value) {
                        writeln!(out, "{e}")?;
                    }
                }
                Err(msg) => writeln!(out, "{msg}")?,
            },
        }
    }
}

fn results<R: BufRead, W: Write>(
    form: &StepForm,
    state: &WizardState,
    weights: &ScoringWeights,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow> {
    let report = Report::build_with(weights, &state.get_data());
    writeln!(out)?;
    write!(out, "{}", report.to_markdown())?;
    writeln!(out)?;

    loop {
        write!(out, "[r]estart, [b]ack or [q]uit: ")?;
        out.flush()?;

        match read_line(input)? {
            Line::Eof => return Ok(Flow::Eof),
            Line::Quit => return Ok(Flow::Quit),
            Line::Back => return Ok(retreat(form, state)),
            Line::Value(v) => match v.trim().to_ascii_lowercase().as_str() {
                "r" | "restart" => return Ok(Flow::Goto(flow::restart(state))),
                "b" | "back" => return Ok(retreat(form, state)),
                "q" | "quit" => return Ok(Flow::Quit),
                _ => writeln!(out, "choose r, b or q")?,
            },
        }
    }
}

fn advance(form: &StepForm, state: &WizardState) -> Flow {
    match form.advance(state) {
        Ok(next) => Flow::Goto(next),
        Err(e) => Flow::Blocked(e),
    }
}

fn retreat(form: &StepForm, state: &WizardState) -> Flow {
    Flow::Goto(form.retreat(state).unwrap_or(form.step()))
}

// ============================================================================
// Input / output helpers
// ============================================================================

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Line> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(Line::Eof);
    }
    let line = buf.trim_end_matches(['\n', '\r']);
    Ok(match line.trim() {
        ":back" => Line::Back,
        ":quit" => Line::Quit,
        _ => Line::Value(line.to_string()),
    })
}

/// Parse `t=50`, `cost=40`, `flexibility = 10` and similar.
fn parse_goal_assignment(s: &str) -> Result<(BusinessGoal, u8), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <goal>=<value>, got '{}'", s.trim()))?;

    let goal = match key.trim().to_ascii_lowercase().as_str() {
        "t" | "ttm" | "time-to-market" | "timetomarket" => BusinessGoal::TimeToMarket,
        "c" | "cost" => BusinessGoal::Cost,
        "f" | "flex" | "flexibility" => BusinessGoal::Flexibility,
        other => return Err(format!("unknown goal '{other}' (use t, c or f)")),
    };
    let value = value
        .trim()
        .parse::<u8>()
        .map_err(|_| "enter a whole number from 0 to 100".to_string())?;
    Ok((goal, value))
}

fn write_progress<W: Write>(out: &mut W, current: Step) -> io::Result<()> {
    writeln!(out)?;
    let markers: Vec<String> = progress(current)
        .into_iter()
        .map(|p| {
            let mark = match p.status {
                StepStatus::Completed => "x",
                StepStatus::Current => ">",
                StepStatus::Upcoming => " ",
            };
            format!("[{mark}] {}", p.step.label())
        })
        .collect();
    writeln!(out, "{}", markers.join("  "))?;
    writeln!(
        out,
        "Step {} of {}: {}",
        current.index() + 1,
        Step::ALL.len(),
        current.label()
    )
}

fn write_weights<W: Write>(out: &mut W, weights: BusinessWeights) -> io::Result<()> {
    for goal in BusinessGoal::ALL {
        writeln!(out, "  {:<28}{:>3}%", goal.label(), weights.get(goal))?;
    }
    writeln!(out, "  {:<28}{:>3}%", "Total", weights.total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdecide_engine::WizardAnswers;
    use std::io::Cursor;

    fn drive(state: &WizardState, script: &str) -> (SessionEnd, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let end = run(state, &ScoringWeights::default(), &mut input, &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    const OVERVIEW: &str = "Atlas\n5 devs\n1k users\nbilling\n";

    #[test]
    fn full_pass_reaches_results() {
        let state = WizardState::new();
        let script = format!("{OVERVIEW}90\n\n80\nf=60\n\nq\n");
        let (end, out) = drive(&state, &script);

        assert_eq!(end, SessionEnd::Quit);
        let data = state.get_data();
        assert_eq!(data.project_name, "Atlas");
        assert_eq!((data.scalability, data.performance, data.expertise_level), (90, 50, 80));
        assert_eq!(data.business_weights(), BusinessWeights::new(20, 20, 60));
        assert!(out.contains("**Recommended Architecture:** Microservices"));
        assert!(out.contains("**Confidence Score:** 71%"));
        assert!(out.contains("Step 4 of 4: Results"));
    }

    #[test]
    fn blocked_overview_persists_nothing() {
        let state = WizardState::new();
        let (end, out) = drive(&state, "Atlas\n\n\n\n");

        assert_eq!(
            end,
            SessionEnd::EndOfInput {
                step: Step::ProjectOverview,
                blocked: Some(NavigationError::MissingFields(vec![
                    TextField::TeamSize,
                    TextField::UserLoad,
                    TextField::CriticalFeatures,
                ])),
            }
        );
        assert!(out.contains("cannot continue: missing required answers"));
        assert_eq!(state.get_data().project_name, "");
    }

    #[test]
    fn blocked_step_keeps_draft_for_retry() {
        let state = WizardState::new();
        let script = "Atlas\n\n\n\n\n5 devs\n1k users\nbilling\n";
        let (end, out) = drive(&state, script);

        assert_eq!(
            end,
            SessionEnd::EndOfInput { step: Step::TechnicalRequirements, blocked: None }
        );
        assert!(out.contains("Project Name [Atlas]: "));
        assert_eq!(state.get_data().project_name, "Atlas");
    }

    #[test]
    fn back_from_technical_saves_draft() {
        let state = WizardState::new();
        let script = format!("{OVERVIEW}70\n:back\n");
        let (end, _) = drive(&state, &script);

        assert_eq!(end, SessionEnd::EndOfInput { step: Step::ProjectOverview, blocked: None });
        assert_eq!(state.get_data().scalability, 70);
    }

    #[test]
    fn invalid_numbers_are_asked_again() {
        let state = WizardState::new();
        let script = format!("{OVERVIEW}150\nabc\n40\n");
        let (_, out) = drive(&state, &script);

        assert!(out.contains("scalability must be between 0 and 100, got 150"));
        assert!(out.contains("enter a whole number from 0 to 100"));
    }

    #[test]
    fn empty_input_keeps_existing_answers() {
        let mut answers = WizardAnswers::default();
        for field in TextField::ALL {
            answers.set_text(field, "set");
        }
        answers.cost = 10;
        answers.time_to_market = 40;
        answers.flexibility = 50;
        let state = WizardState::with_answers(answers.clone());

        let (end, _) = drive(&state, "\n\n\n\n\n\n\n\n");
        assert_eq!(end, SessionEnd::EndOfInput { step: Step::Results, blocked: None });
        assert_eq!(state.get_data(), answers);
    }

    #[test]
    fn unbalanced_goals_block_until_dragged() {
        let mut answers = WizardAnswers::default();
        for field in TextField::ALL {
            answers.set_text(field, "set");
        }
        answers.cost = 50;
        let state = WizardState::with_answers(answers);

        // 33 + 50 + 34 = 117 blocks; dragging cost rebalances to 100.
        let (end, out) = drive(&state, "\n\n\n\n\n\n\n\nc=50\n\n:quit\n");
        assert!(out.contains("business goal weights total 117%, expected 100%"));
        assert_eq!(end, SessionEnd::Quit);
        assert!(state.get_data().business_weights().is_balanced());
    }

    #[test]
    fn restart_resets_answers() {
        let state = WizardState::new();
        let script = format!("{OVERVIEW}\n\n\n\nr\n");
        let (end, _) = drive(&state, &script);

        assert_eq!(end, SessionEnd::EndOfInput { step: Step::ProjectOverview, blocked: None });
        assert_eq!(state.get_data(), WizardAnswers::default());
    }

    #[test]
    fn results_back_returns_to_goals_without_writing() {
        let state = WizardState::new();
        let script = format!("{OVERVIEW}\n\n\n\nb\n");
        let (end, _) = drive(&state, &script);
        assert_eq!(end, SessionEnd::EndOfInput { step: Step::BusinessGoals, blocked: None });
        assert_eq!(state.get_data().project_name, "Atlas");
    }

    #[test]
    fn goal_assignment_parsing() {
        assert_eq!(parse_goal_assignment("t=50"), Ok((BusinessGoal::TimeToMarket, 50)));
        assert_eq!(parse_goal_assignment(" Cost = 40 "), Ok((BusinessGoal::Cost, 40)));
        assert_eq!(parse_goal_assignment("flexibility=0"), Ok((BusinessGoal::Flexibility, 0)));
        assert!(parse_goal_assignment("speed=10").is_err());
        assert!(parse_goal_assignment("t50").is_err());
        assert!(parse_goal_assignment("t=-1").is_err());
    }
}
