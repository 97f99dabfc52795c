//! # Command Registry
//!
//! Static mapping from command name to handler metadata. Populated once at
//! startup from a fixed declarative set and immutable thereafter, so it can
//! be shared across concurrent dispatches without synchronization.

/// A declared command parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    /// A remainder parameter is bound to the entire unparsed rest of the
    /// message, which allows multi-word arguments without quoting.
    pub is_remainder: bool,
}

/// Metadata for a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamSpec],
}

pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands = vec![
            Command {
                name: "wiki",
                summary: "Searches Wikipedia for a term.",
                params: &[ParamSpec {
                    name: "term",
                    is_remainder: true,
                }],
            },
            Command {
                name: "usage",
                summary: "Explains how to use WikiBot.",
                params: &[],
            },
            Command {
                name: "help",
                summary: "Lists available commands.",
                params: &[],
            },
        ];
        debug_assert!(
            {
                let mut names: Vec<_> = commands.iter().map(|c| c.name).collect();
                names.sort_unstable();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "command names must be unique"
        );
        Self { commands }
    }

    /// Case-sensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
