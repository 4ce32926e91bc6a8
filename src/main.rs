use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use filmfinder::config::{self, ClientConfig};
use filmfinder::page::{render_dropdown_text, render_text, PageRenderer};
use filmfinder::{Backend, HttpBackend, Key, Session};

#[derive(Debug, PartialEq)]
enum Interaction {
    Type(String),
    Key(Key),
    Click(usize),
    Blur,
    Submit,
    Quit,
    Unknown(String),
}

fn parse_interaction(line: &str) -> Interaction {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Interaction::Type(line.to_owned());
    };
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("down"), None) => Interaction::Key(Key::ArrowDown),
        (Some("up"), None) => Interaction::Key(Key::ArrowUp),
        (Some("enter"), None) => Interaction::Key(Key::Enter),
        (Some("esc"), None) => Interaction::Key(Key::Escape),
        // items are numbered from 1 on screen
        (Some("click"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Interaction::Click(n - 1),
            _ => Interaction::Unknown(line.to_owned()),
        },
        (Some("blur"), None) => Interaction::Blur,
        (Some("submit"), None) => Interaction::Submit,
        (Some("quit"), None) => Interaction::Quit,
        _ => Interaction::Unknown(line.to_owned()),
    }
}

fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level.parse()?))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn print_session<B: Backend>(session: &Session<B>) {
    let controller = session.controller();
    print!("{}", render_dropdown_text(controller.dropdown()));
    print!("{}", render_text(controller.page()));
}

fn interactive<B: Backend>(session: &mut Session<B>, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Type a title, or :down :up :enter :esc :click N :blur :submit :quit");
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match parse_interaction(&line) {
            Interaction::Type(text) => {
                // a line stands for a burst of keystrokes followed by a pause
                let now = Instant::now();
                session.type_text(now, &text);
                session.advance(now + config.debounce);
            }
            Interaction::Key(key) => session.key(key),
            Interaction::Click(index) => session.click(index),
            Interaction::Blur => session.dismiss(),
            Interaction::Submit => session.submit(),
            Interaction::Quit => break,
            Interaction::Unknown(line) => {
                log::warn!(target: "cli", "Unknown command: {line}");
                continue;
            }
        }
        println!("[{}]", session.controller().input());
        print_session(session);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = clap::Command::new("filmfinder")
    .about("Search a film catalog with live suggestions")
    .args(config::args())
    .arg(clap::Arg::new("log-level").long("log-level").global(true).default_value("info"))
    .subcommand_required(true)
    .subcommand(clap::Command::new("suggest").about("Show autocomplete suggestions for a partial title")
        .arg(clap::Arg::new("text").required(true)))
    .subcommand(clap::Command::new("search").about("Search links for a title, optionally \"Title (YYYY)\"")
        .arg(clap::Arg::new("text").required(true))
        .arg(clap::Arg::new("output").long("output").help("Write the result page as HTML instead of printing it")))
    .subcommand(clap::Command::new("interactive").about("Drive the search box from stdin"))
    .get_matches();

    init_logging(app.get_one::<String>("log-level").map(String::as_str).unwrap_or("info"))?;
    let config = ClientConfig::from_matches(&app)?;
    let mut session = Session::new(HttpBackend::new(&config)?, &config);
    log::debug!("Using backend at {}", config.base_url);

    match app.subcommand() {
        Some(("suggest", args)) => {
            let text = args.get_one::<String>("text").map(String::as_str).unwrap_or_default();
            let now = Instant::now();
            session.type_text(now, text);
            session.advance(now + config.debounce);
            print!("{}", render_dropdown_text(session.controller().dropdown()));
        }
        Some(("search", args)) => {
            let text = args.get_one::<String>("text").map(String::as_str).unwrap_or_default();
            session.type_text(Instant::now(), text);
            session.submit();
            match args.get_one::<String>("output") {
                Some(output) => {
                    let controller = session.controller();
                    let html = PageRenderer::new()?.render_html(controller.input(), controller.dropdown(), controller.page())?;
                    log::info!(target: "cli", "Writing {output}");
                    std::fs::write(Path::new(output), html)?;
                }
                None => print_session(&session),
            }
        }
        Some(("interactive", _)) => interactive(&mut session, &config)?,
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{parse_interaction, Interaction};
    use filmfinder::Key;

    #[test]
    fn test_parse_interaction() {
        assert_eq!(parse_interaction("The Matrix"), Interaction::Type("The Matrix".into()));
        assert_eq!(parse_interaction(" :down "), Interaction::Key(Key::ArrowDown));
        assert_eq!(parse_interaction(":esc"), Interaction::Key(Key::Escape));
        assert_eq!(parse_interaction(":click 2"), Interaction::Click(1));
        assert_eq!(parse_interaction(":click 0"), Interaction::Unknown(":click 0".into()));
        assert_eq!(parse_interaction(":submit"), Interaction::Submit);
        assert_eq!(parse_interaction(":dance"), Interaction::Unknown(":dance".into()));
    }
}
