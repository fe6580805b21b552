use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Args;
use maisonvital_core::{Config, Database, Event, ReviewAction, ReviewCard, ReviewEngine};

use super::{open_engine, print_json, CmdResult};

#[derive(Args)]
pub struct ReviewArgs {
    /// Assets to review; defaults to the tracked inventory.
    /// Named assets not yet tracked start being tracked.
    pub asset_ids: Vec<String>,
    /// Answers for each card, in queue order (done-recently, do-now, not-done).
    /// When they run out the review is aborted.
    #[arg(long, value_delimiter = ',')]
    pub answers: Option<Vec<ReviewAction>>,
}

enum Answer {
    Action(ReviewAction),
    Quit,
}

pub fn run(args: ReviewArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut engine = open_engine(&config)?;

    let selection = if args.asset_ids.is_empty() {
        engine.home().tracked().to_vec()
    } else {
        args.asset_ids
    };

    let mut events = engine.start_review(&selection)?;
    match args.answers {
        Some(answers) => {
            let mut answers = answers.into_iter().map(Answer::Action);
            drive(&mut engine, &mut events, || Ok(answers.next().unwrap_or(Answer::Quit)), None)?;
        }
        None => {
            let delay = Duration::from_millis(config.review.transition_delay_ms);
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            drive(&mut engine, &mut events, || prompt(&mut lines), Some(delay))?;
        }
    }
    print_json(&events)
}

/// Submit answers until the queue is exhausted or the source runs dry.
fn drive(
    engine: &mut ReviewEngine<Database>,
    events: &mut Vec<Event>,
    mut next_answer: impl FnMut() -> io::Result<Answer>,
    delay: Option<Duration>,
) -> CmdResult {
    while let Some(card) = engine.current_card() {
        show_card(&card);
        match next_answer()? {
            Answer::Action(action) => {
                events.extend(engine.submit_outcome(action)?);
                if let Some(delay) = delay.filter(|_| engine.current_card().is_some()) {
                    std::thread::sleep(delay);
                }
            }
            Answer::Quit => {
                events.extend(engine.abort_review()?);
                break;
            }
        }
    }
    Ok(())
}

fn show_card(card: &ReviewCard<'_>) {
    let asset = card.asset;
    eprintln!(
        "[{}/{}] {} {} ({} min, every {} months)",
        card.position, card.total, asset.icon, asset.name, asset.duration_minutes, asset.frequency_months
    );
    eprintln!("    risk: {}", asset.risk_description);
}

/// Ask on stderr, read one answer from stdin. End of input quits.
fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Answer> {
    loop {
        eprint!("    (r) done recently, (d) do it now, (n) not done, (q) quit > ");
        io::stderr().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(Answer::Quit);
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Answer::Quit);
        }
        match line.parse::<ReviewAction>() {
            Ok(action) => return Ok(Answer::Action(action)),
            Err(e) => eprintln!("    {e}"),
        }
    }
}
