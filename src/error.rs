use miette::Diagnostic;
use thiserror::Error;

/// Main error type for nanopages operations
#[derive(Error, Diagnostic, Debug)]
pub enum PagesError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(nanopages::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Cannot read page '{request_path}': it does not exist")]
    #[diagnostic(
        code(nanopages::read_missing),
        help("Check Page::exists() before reading")
    )]
    ReadMissing { request_path: String },

    #[error("Unsupported frontmatter language '{lang}'")]
    #[diagnostic(
        code(nanopages::frontmatter),
        help("Use ---, ---json, ---yaml or ---yml to open the frontmatter")
    )]
    UnsupportedLanguage { lang: String },

    #[error("Invalid JSON frontmatter: {message}")]
    #[diagnostic(code(nanopages::frontmatter::json))]
    InvalidJson { message: String },

    #[error("Invalid YAML frontmatter: {message}")]
    #[diagnostic(code(nanopages::frontmatter::yaml))]
    InvalidYaml { message: String },

    #[error("{lang} frontmatter must be a key/value mapping, found {found}")]
    #[diagnostic(code(nanopages::frontmatter), help("Use key: value pairs"))]
    NotAMapping { lang: &'static str, found: String },

    #[error("Cannot load YAML, nanopages was built without the `yaml` feature")]
    #[diagnostic(
        code(nanopages::yaml_unavailable),
        help("Rebuild with --features yaml, or switch to ---json frontmatter")
    )]
    YamlUnavailable,

    #[error("No page at {url}")]
    #[diagnostic(
        code(nanopages::not_found),
        help("Run `nanopages list` to see the available pages")
    )]
    NotFound { url: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(nanopages::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PagesError>;
