use deck_history::Slide;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Slide),
    Remove(usize),
    Focus(usize),
    Select(String),
    Undo,
    Redo,
    Status,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));
        match name.to_lowercase().as_str() {
            "add" => parse_slide(rest).map(Self::Add),
            "remove" | "rm" => parse_index(rest).map(Self::Remove),
            "focus" | "go" => parse_index(rest).map(Self::Focus),
            "select" if !rest.is_empty() => Ok(Self::Select(rest.to_string())),
            "select" => Err("select needs an element id".to_string()),
            "undo" | "u" => Ok(Self::Undo),
            "redo" | "r" => Ok(Self::Redo),
            "status" => Ok(Self::Status),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

/// Bare text becomes a slide with that title; anything that parses as JSON is kept as is.
fn parse_slide(raw: &str) -> Result<Slide, String> {
    if raw.is_empty() {
        return Err("add needs a slide".to_string());
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::json!({ "title": raw }));
    Ok(Slide::new(value))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse().map_err(|_| format!("expected a slide index, got '{raw}'"))
}

pub const HELP: &str = "\
add <title|json>   append a slide
remove <index>     delete a slide
focus <index>      view another slide
select <id>        select an element
undo | redo        step through history
status | show      print history or deck
quit";
