//! Line commands accepted by the interactive client.

use whois_lookup_core::LookupType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Empty,
    Help,
    Quit,
    Dismiss,
    SetType(LookupType),
    Search {
        domain: String,
        lookup_type: Option<LookupType>,
    },
}

/// Parse one line of input: `<domain> [domain|contact]` or a slash command.
pub fn parse_prompt(line: &str) -> Result<PromptCommand, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(PromptCommand::Empty);
    };

    let command = match first {
        "/quit" | "/exit" | "/q" => PromptCommand::Quit,
        "/help" | "/h" => PromptCommand::Help,
        "/dismiss" | "/d" => PromptCommand::Dismiss,
        "/type" | "/t" => {
            let value = words
                .next()
                .ok_or_else(|| "usage: /type <domain|contact>".to_string())?;
            PromptCommand::SetType(parse_type(value)?)
        }
        other if other.starts_with('/') => {
            return Err(format!("Unknown command: {other}. Type '/help' for available commands"));
        }
        domain => PromptCommand::Search {
            domain: domain.to_string(),
            lookup_type: words.next().map(parse_type).transpose()?,
        },
    };

    if words.next().is_some() {
        return Err("too many arguments".to_string());
    }

    Ok(command)
}

fn parse_type(value: &str) -> Result<LookupType, String> {
    value
        .to_ascii_lowercase()
        .parse::<LookupType>()
        .map_err(|_| format!("unknown lookup type {value:?}; expected domain or contact"))
}
