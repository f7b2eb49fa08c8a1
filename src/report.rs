mod json;
mod text;

pub use json::JsonReport;
pub use text::TextReport;

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// progress lines, a failure table and a summary
    #[default]
    #[value(name = "text")]
    Text,
    /// a single JSON document on stdout
    #[value(name = "json")]
    Json,
}
