//! Line-oriented terminal front end over `QuizController`.

use chrono::Local;
use quiz_core::model::CategoryFilter;
use services::quiz::{QuestionView, ResultView};
use services::{
    AppServices, HistoryOverview, HistoryService, QuizController, QuizEvent, QuizIntent,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

enum Screen {
    Home,
    Quiz,
    Result,
}

/// Drive the home, quiz and result screens until the user leaves.
pub async fn run(
    services: &AppServices,
    mut initial: Option<CategoryFilter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut ctl = services.controller();
    let mut screen = Screen::Home;

    loop {
        screen = match screen {
            Screen::Home => {
                print_history(&load_overview(&services.history()).await);

                let filter = match initial.take() {
                    Some(filter) => filter,
                    None => match choose_category(&mut input).await? {
                        Some(filter) => filter,
                        None => return Ok(()),
                    },
                };
                match ctl.dispatch(QuizIntent::Start(filter)).await? {
                    QuizEvent::Finished(_) => Screen::Result,
                    _ => Screen::Quiz,
                }
            }
            Screen::Quiz => match play(&mut ctl, &mut input).await? {
                Some(next) => next,
                None => return Ok(()),
            },
            Screen::Result => {
                if let Some(view) = ctl.result_view() {
                    print_result(&view);
                }
                let Some(line) = prompt(&mut input, "[r] retry  [b] back  [q] quit > ").await?
                else {
                    return Ok(());
                };
                match line.as_str() {
                    "r" => match ctl.dispatch(QuizIntent::Retry).await? {
                        QuizEvent::Started { .. } => Screen::Quiz,
                        _ => Screen::Result,
                    },
                    "b" => {
                        ctl.dispatch(QuizIntent::Quit).await?;
                        Screen::Home
                    }
                    "q" => return Ok(()),
                    _ => Screen::Result,
                }
            }
        };
    }
}

/// History for the home screen. An unreadable history is logged and shown as
/// empty so a quiz can still be taken.
async fn load_overview(history: &HistoryService) -> HistoryOverview {
    match history.overview().await {
        Ok(overview) => overview,
        Err(err) => {
            tracing::warn!(error = %err, "history unavailable");
            HistoryOverview::default()
        }
    }
}

/// Ask for a category until a valid one is given. `None` means leave.
async fn choose_category(
    input: &mut Input,
) -> Result<Option<CategoryFilter>, Box<dyn std::error::Error>> {
    loop {
        let Some(line) = prompt(
            input,
            "category [all/journal/calculation/financial/term], q to quit > ",
        )
        .await?
        else {
            return Ok(None);
        };
        if line == "q" {
            return Ok(None);
        }
        let raw = if line.is_empty() { CategoryFilter::ALL_TAG } else { line.as_str() };
        match raw.parse::<CategoryFilter>() {
            Ok(filter) => return Ok(Some(filter)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Run questions until the session finishes or is abandoned.
///
/// Returns the screen to show next, or `None` when input ended.
async fn play(
    ctl: &mut QuizController,
    input: &mut Input,
) -> Result<Option<Screen>, Box<dyn std::error::Error>> {
    while let Some(view) = ctl.question_view() {
        print_question(&view);

        if view.is_answered() {
            let Some(line) = prompt(input, "Enter for next, q to quit > ").await? else {
                return Ok(None);
            };
            if line == "q" {
                if confirm_quit(ctl, input).await? {
                    return Ok(Some(Screen::Home));
                }
                continue;
            }
            if let QuizEvent::Finished(_) = ctl.dispatch(QuizIntent::Next).await? {
                return Ok(Some(Screen::Result));
            }
            continue;
        }

        let label = format!("answer 1-{}, q to quit > ", view.options.len());
        let Some(line) = prompt(input, &label).await? else {
            return Ok(None);
        };
        if line == "q" {
            if confirm_quit(ctl, input).await? {
                return Ok(Some(Screen::Home));
            }
            continue;
        }
        let Some(index) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            println!("enter an option number");
            continue;
        };
        if let QuizEvent::Ignored = ctl.dispatch(QuizIntent::Select(index)).await? {
            println!("no such option");
            continue;
        }
        ctl.dispatch(QuizIntent::Submit).await?;
    }

    Ok(Some(Screen::Result))
}

async fn confirm_quit(
    ctl: &mut QuizController,
    input: &mut Input,
) -> Result<bool, Box<dyn std::error::Error>> {
    let answer = prompt(input, "quit this quiz? progress is not saved [y/N] > ").await?;
    if matches!(answer.as_deref(), Some("y" | "Y")) {
        ctl.dispatch(QuizIntent::Quit).await?;
        return Ok(true);
    }
    Ok(false)
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>, std::io::Error> {
    let mut out = tokio::io::stdout();
    out.write_all(label.as_bytes()).await?;
    out.flush().await?;
    Ok(input.next_line().await?.map(|line| line.trim().to_owned()))
}

// ─── RENDERING ──────────────────────────────────────────────────────────────

pub fn print_history(overview: &HistoryOverview) {
    println!();
    println!("== 学習履歴 ==");
    if overview.recent.is_empty() {
        println!("  (no sessions yet)");
    }
    for item in &overview.recent {
        let date = item.date.with_timezone(&Local).format("%Y/%m/%d %H:%M");
        println!("  {date}  {:<8} {:>3}%", item.category_label, item.score);
    }
    let stats = &overview.stats;
    println!(
        "  total {} questions, {} correct, accuracy {}%",
        stats.total_questions, stats.correct_answers, stats.accuracy
    );
    println!();
}

fn print_question(view: &QuestionView) {
    println!();
    println!(
        "[{}] Q{}/{} ({}%)",
        view.category_label, view.number, view.total, view.progress_percent
    );
    println!("{}", view.text);
    for (i, option) in view.options.iter().enumerate() {
        let marker = match &view.feedback {
            Some(fb) if i == fb.correct_answer => "o",
            Some(fb) if i == fb.selected => "x",
            _ => " ",
        };
        println!("  {marker} {}. {option}", i + 1);
    }
    if let Some(fb) = &view.feedback {
        println!("{}", if fb.is_correct { "正解!" } else { "不正解" });
        if !fb.explanation.is_empty() {
            println!("{}", fb.explanation);
        }
    }
}

fn print_result(view: &ResultView) {
    println!();
    println!("== 結果 ==");
    println!(
        "  {}%  ({}/{})  time {}",
        view.percentage, view.correct, view.total, view.elapsed
    );
    for line in &view.answers {
        let mark = if line.is_correct { "o" } else { "x" };
        println!("  {mark} Q{} {}", line.number, line.snippet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CategoryFilter, HistoryEntry};
    use quiz_core::time::fixed_now;
    use storage::history::HISTORY_SLOT_KEY;
    use storage::repository::{HistoryRepository, KeyValueStore, Storage};

    #[tokio::test]
    async fn unreadable_history_shows_as_empty() {
        let storage = Storage::in_memory();
        storage
            .slots
            .put_slot(HISTORY_SLOT_KEY, "{not json")
            .await
            .unwrap();

        let overview = load_overview(&HistoryService::new(storage.history.clone())).await;
        assert_eq!(overview, HistoryOverview::default());
    }

    #[tokio::test]
    async fn readable_history_is_passed_through() {
        let storage = Storage::in_memory();
        let entry = HistoryEntry::new(fixed_now(), CategoryFilter::All, 1, 2).unwrap();
        storage.history.append(&entry).await.unwrap();

        let overview = load_overview(&HistoryService::new(storage.history.clone())).await;
        assert_eq!(overview.recent.len(), 1);
        assert_eq!(overview.stats.accuracy, 50);
    }
}
