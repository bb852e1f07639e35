#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    SetOption(Vec<String>),
    Quit,
    Unknown(String),
}

/// Classify one input line; `None` for blank lines.
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let keyword = parts.first()?.clone();

    Some(match keyword.as_str() {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "quit" => UciCommand::Quit,
        "position" => UciCommand::Position(parts),
        "go" => UciCommand::Go(parts),
        "setoption" => UciCommand::SetOption(parts),
        _ => UciCommand::Unknown(line.trim().to_string()),
    })
}

/// The `depth N` argument of a `go` command.
#[must_use]
pub fn parse_go_depth(parts: &[&str]) -> Option<u32> {
    parts
        .iter()
        .position(|p| *p == "depth")
        .and_then(|i| parts.get(i + 1))
        .and_then(|v| v.parse::<u32>().ok())
}
