use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("\"{0}\" is not a pattern")]
    NotAPattern(String),

    #[error("Unknown pattern type: @{0}@")]
    UnknownType(String),

    #[error("Unknown expander: {0}")]
    UnknownExpander(String),

    #[error("{0}")]
    Arity(String),

    #[error("Syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Invalid regular expression \"{pattern}\": {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("\"{expander}\" expects {expected} as argument {index}")]
    InvalidArgument {
        expander: &'static str,
        index: usize,
        expected: &'static str,
    },
}
