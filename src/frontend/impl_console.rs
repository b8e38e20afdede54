use crate::app::core::{ModelGallery, Msg};
use crate::app::main::App;
use crate::app::view::render_text;
use crate::frontend::interface::Frontend;
use crate::image_reference::ImageReference;
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::mpsc::{channel, TryRecvError};
use std::time::Duration;

const HELP: &str = "commands: list | select <index|path> | analyze | back | refresh | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(Selection),
    Analyze,
    Back,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Path(String),
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name.to_lowercase().as_str() {
        "list" | "ls" => Ok(Command::List),
        "select" | "s" if rest.is_empty() => Err("select needs an index or a path".to_string()),
        "select" | "s" => Ok(Command::Select(match rest.parse::<usize>() {
            Ok(index) => Selection::Index(index),
            Err(_) => Selection::Path(rest.to_string()),
        })),
        "analyze" | "a" => Ok(Command::Analyze),
        "back" | "b" => Ok(Command::Back),
        "refresh" | "r" => Ok(Command::Refresh),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {}", other)),
    }
}

enum Step {
    Continue,
    Redraw,
    Say(String),
    Quit,
}

fn apply_command(app: &mut App, command: Command) -> Step {
    match command {
        Command::List => Step::Redraw,
        Command::Help => Step::Say(HELP.to_string()),
        Command::Quit => Step::Quit,
        Command::Analyze => {
            app.dispatch(Msg::AnalyzePressed);
            Step::Continue
        }
        Command::Back => {
            app.dispatch(Msg::BackPressed);
            Step::Continue
        }
        Command::Refresh => {
            app.dispatch(Msg::RefreshGallery);
            Step::Continue
        }
        Command::Select(Selection::Path(path)) => {
            app.dispatch(Msg::ImageSelected(ImageReference::new(path)));
            Step::Continue
        }
        Command::Select(Selection::Index(index)) => {
            let image = match &app.model().gallery {
                ModelGallery::Loaded(images) => images.get(index).cloned(),
                _ => None,
            };
            match image {
                Some(image) => {
                    app.dispatch(Msg::ImageSelected(image));
                    Step::Continue
                }
                None => Step::Say(format!("no image at index {}", index)),
            }
        }
    }
}

/// Line-driven frontend. When input ends it waits for a pending analysis,
/// prints the final screen and returns.
pub struct FrontendConsole<R, W> {
    input: R,
    output: W,
    poll_rate: Duration,
}

impl FrontendConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio(poll_rate: Duration) -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout(), poll_rate)
    }
}

impl<R, W> FrontendConsole<R, W> {
    pub fn new(input: R, output: W, poll_rate: Duration) -> Self {
        Self {
            input,
            output,
            poll_rate,
        }
    }
}

impl<R, W> Frontend for FrontendConsole<R, W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    fn run(self: Box<Self>, mut app: App) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let FrontendConsole {
            input,
            mut output,
            poll_rate,
        } = *self;

        let (line_sender, line_receiver) = channel();
        std::thread::spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if line_sender.send(line).is_err() {
                    break;
                }
            }
        });

        app.start();
        writeln!(output, "{}", HELP)?;

        let mut last_view = None;
        let mut input_open = true;

        loop {
            if input_open {
                loop {
                    match line_receiver.try_recv() {
                        Ok(line) if line.trim().is_empty() => {}
                        Ok(line) => {
                            let step = match parse_command(&line) {
                                Ok(command) => apply_command(&mut app, command),
                                Err(message) => Step::Say(message),
                            };
                            match step {
                                Step::Continue => {}
                                Step::Redraw => last_view = None,
                                Step::Say(message) => writeln!(output, "{}", message)?,
                                Step::Quit => return Ok(()),
                            }
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            input_open = false;
                            break;
                        }
                    }
                }
            } else if !app.model().picker.is_loading() {
                return Ok(());
            }

            app.pump_timeout(poll_rate);

            let current = app.view();
            if last_view.as_ref() != Some(&current) {
                writeln!(output, "{}", render_text(&current))?;
                output.flush()?;
                last_view = Some(current);
            }
        }
    }
}
