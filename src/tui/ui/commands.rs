use crate::schemas::OutboundRecord;
use crate::tui::domain::models::SearchRequest;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum Command {
    None,
    Batch(Vec<Command>),
    FetchStreams,
    CreateStream(String),
    DeleteStream(String),
    Publish(OutboundRecord),
    Export { stream: String, path: PathBuf },
    StartIngestion(String),
    ExecuteSearch(SearchRequest),
    ScheduleToastExpiry { id: u64, after: Duration },
    Quit,
}

impl Command {
    /// Combine two commands, dropping `None`s.
    pub fn and(self, other: Command) -> Command {
        match (self, other) {
            (Command::None, other) => other,
            (this, Command::None) => this,
            (Command::Batch(mut list), other) => {
                list.push(other);
                Command::Batch(list)
            }
            (this, other) => Command::Batch(vec![this, other]),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    /// Flatten into a list of concrete commands, in execution order.
    pub fn into_vec(self) -> Vec<Command> {
        match self {
            Command::None => Vec::new(),
            Command::Batch(list) => list.into_iter().flat_map(Command::into_vec).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_drops_none() {
        assert!(Command::None.and(Command::None).is_none());
        assert!(matches!(Command::None.and(Command::FetchStreams), Command::FetchStreams));
        assert!(matches!(Command::FetchStreams.and(Command::None), Command::FetchStreams));
    }

    #[test]
    fn test_into_vec_flattens_in_order() {
        let command = Command::FetchStreams
            .and(Command::CreateStream("a".to_string()))
            .and(Command::Batch(vec![Command::Quit, Command::None]));
        let flat = command.into_vec();
        assert_eq!(flat.len(), 3);
        assert!(matches!(flat[0], Command::FetchStreams));
        assert!(matches!(&flat[1], Command::CreateStream(name) if name == "a"));
        assert!(matches!(flat[2], Command::Quit));
    }
}
