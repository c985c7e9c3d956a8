//! CLI commands

mod changelog;
mod completions;
mod init;
mod show;
mod validate;

pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
