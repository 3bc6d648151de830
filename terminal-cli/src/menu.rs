use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use rosterwatch_client::{PlayerSource, Store};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

use crate::actions::{Action, Pipeline};

const MENU: &str = "\
 ROSTERWATCH PLAYER SYSTEM
1. Exit
2. View Raw Player Data
3. Inactive Player Analysis + Upload
4. List & Upload Level <= 10 Players
5. VIP Rewards + Upload
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Exit,
    Run(Action),
}

pub fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim() {
        "1" => Some(Choice::Exit),
        "2" => Some(Choice::Run(Action::Raw)),
        "3" => Some(Choice::Run(Action::Inactive)),
        "4" => Some(Choice::Run(Action::LowLevel)),
        "5" => Some(Choice::Run(Action::Vip)),
        _ => None,
    }
}

/// Reads one line, `None` at end of input.
///
/// The read is awaited so pooled HTTP connections keep being driven while
/// the user sits at a prompt.
async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

async fn pause<R, W>(input: &mut R, out: &mut W, prompt: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{prompt}")?;
    out.flush()?;
    Ok(read_line(input).await?.is_some())
}

/// Runs the interactive menu until the user exits or input ends.
///
/// A failed action is reported and the menu resumes.
pub async fn run<S, D, R, W>(pipeline: &Pipeline<S, D>, mut input: R, out: &mut W) -> Result<()>
where
    S: PlayerSource,
    D: Store,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        write!(out, "{MENU}Choose (1-5): ")?;
        out.flush()?;

        let Some(line) = read_line(&mut input).await? else {
            break;
        };
        let action = match parse_choice(&line) {
            Some(Choice::Exit) => break,
            Some(Choice::Run(action)) => action,
            None => {
                if !pause(&mut input, out, "Invalid input. Press Enter to try again.")
                    .await?
                {
                    break;
                }
                continue;
            }
        };

        if let Err(err) = pipeline.run(action, out).await {
            error!(?action, "action failed: {err:#}");
            writeln!(out, "\nAction failed: {err:#}")?;
        }
        if !pause(&mut input, out, "\nPress Enter to continue...").await? {
            break;
        }
    }
    Ok(())
}
