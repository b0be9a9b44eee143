//! Line based terminal form: three editable fields and a handful of commands.

use crate::service::models::NotificationRequest;

pub const USAGE: &str = "\
How to use
  1. The push token is filled in from the defaults (change it with `token <value>`)
  2. Set the notification title with `title <value>`
  3. Set the notification message with `body <value>`
  4. Type `send` to deliver the notification
  5. Check the JSON result printed below
  6. Type `reset` to allow sending another notification

Other commands: `show` prints the current fields, `help` prints this text,
`quit` ends the session.

Notes
  - Results are printed as JSON exactly as the delivery service returned them
  - Only one notification is sent per session until you `reset`
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetToken(String),
    SetTitle(String),
    SetBody(String),
    Show,
    Send,
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.find(char::is_whitespace) {
            Some(idx) => (&trimmed[..idx], trimmed[idx..].trim()),
            None => (trimmed, ""),
        };

        match word {
            "token" => Command::SetToken(rest.to_owned()),
            "title" => Command::SetTitle(rest.to_owned()),
            "body" => Command::SetBody(rest.to_owned()),
            "show" if rest.is_empty() => Command::Show,
            "send" if rest.is_empty() => Command::Send,
            "reset" if rest.is_empty() => Command::Reset,
            "help" if rest.is_empty() => Command::Help,
            "quit" | "exit" if rest.is_empty() => Command::Quit,
            "" => Command::Empty,
            _ => Command::Unknown(trimmed.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub token: String,
    pub title: String,
    pub body: String,
}

impl Form {
    pub fn request(&self) -> NotificationRequest {
        NotificationRequest::new(&self.token, &self.title, &self.body)
    }

    /// Applies a field edit. Other commands leave the form untouched.
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::SetToken(value) => self.token = value.clone(),
            Command::SetTitle(value) => self.title = value.clone(),
            Command::SetBody(value) => self.body = value.clone(),
            _ => {}
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Expo push token : {}\nTitle           : {}\nMessage         : {}",
            self.token, self.title, self.body
        )
    }
}
