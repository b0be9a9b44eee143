#[macro_use]
extern crate log;

pub mod form;
pub mod messaging;
pub mod service;

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Notify;

use form::{Command, Form, USAGE};
use messaging::client::MessagingClient;
use service::session::{SendGuard, Submission};

pub const DEFAULT_TOKEN: &str = "ExponentPushToken[xxxxxxxxxxxxxxxxxxxxxx]";
pub const DEFAULT_TITLE: &str = "Test Notification";
pub const DEFAULT_BODY: &str = "This is a test notification.";

#[derive(Debug, PartialEq)]
pub struct Config {
    pub defaults: Form,
}

impl Config {
    pub fn new(args: &[String]) -> Result<Config, &'static str> {
        if args.len() > 2 {
            return Err("too many arguments");
        }
        let token = args.get(1).map(String::as_str).unwrap_or(DEFAULT_TOKEN);
        Ok(Config {
            defaults: Form {
                token: token.to_owned(),
                title: DEFAULT_TITLE.to_owned(),
                body: DEFAULT_BODY.to_owned(),
            },
        })
    }
}

/// Runs one interactive session until `quit`, end of input or shutdown.
pub async fn run<C, R, W>(
    config: Config,
    client: &C,
    input: R,
    output: &mut W,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn Error>>
where
    C: MessagingClient + Sync + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = config.defaults;
    let mut guard = SendGuard::default();
    let mut lines = input.lines();

    writeln!(output, "Expo Push Notification Sender\n")?;
    writeln!(output, "{}", USAGE)?;
    writeln!(output, "{}", form.render())?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = shutdown.notified() => {
                info!("Interrupted");
                Ok(None)
            }
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Ignoring input line: {}", e);
                writeln!(output, "Input is not valid UTF-8, line ignored.")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let command = Command::parse(&line);
        match &command {
            Command::SetToken(_) | Command::SetTitle(_) | Command::SetBody(_) => form.apply(&command),
            Command::Send => {
                writeln!(output, "Sending notification...")?;
                output.flush()?;
                let (next, submission) = guard.submit(client, &form.request()).await;
                guard = next;
                report(output, &submission)?;
            }
            Command::Reset if guard.is_sent() => {
                guard = guard.reset();
                writeln!(output, "Ready to send a new notification.")?;
            }
            Command::Reset => writeln!(output, "Nothing to reset.")?,
            Command::Show => writeln!(output, "{}", form.render())?,
            Command::Help => writeln!(output, "{}", USAGE)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(output, "Unknown command `{}`, type `help` for usage.", text)?
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

fn report<W: Write>(output: &mut W, submission: &Submission) -> Result<(), Box<dyn Error>> {
    if let Some(result) = submission.result() {
        writeln!(output, "{}", serde_json::to_string_pretty(&result.to_json())?)?;
    }
    match submission {
        Submission::Delivered(_) => {
            writeln!(output, "Notification sent successfully!")?;
            writeln!(output, "Type `reset` to send a new notification.")?;
        }
        Submission::Rejected(_) => writeln!(output, "Notification could not be sent!")?,
        Submission::Blocked => {
            writeln!(output, "A notification was already sent. Type `reset` to send a new one.")?
        }
    }
    Ok(())
}
