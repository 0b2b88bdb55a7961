use miette::Diagnostic;
use thiserror::Error;

/// Result type for engine operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("definition '{name}' could not be registered")]
    #[diagnostic(code(uischema::definition))]
    Definition {
        name: String,
        #[source]
        #[diagnostic_source]
        source: uischema_catalogue::Error,
    },

    #[error("type '{name}' is already defined")]
    #[diagnostic(
        code(uischema::duplicate_definition),
        help("every qualified name has exactly one definition; rename one of them")
    )]
    DuplicateDefinition { name: String },

    #[error("unknown type '{name}'")]
    #[diagnostic(code(uischema::unknown_type))]
    UnknownType { name: String },

    #[error("'{name}' takes {expected} generic argument(s) but {supplied} were supplied")]
    #[diagnostic(code(uischema::arity))]
    Arity {
        name: String,
        expected: usize,
        supplied: usize,
    },

    #[error(
        "field '{field}' is declared by both '{first}' ({first_type}) and '{second}' ({second_type})"
    )]
    #[diagnostic(
        code(uischema::composition_conflict),
        help("peer supertypes have no precedence; declare '{field}' on the composing type to override both")
    )]
    CompositionConflict {
        field: String,
        first: String,
        first_type: String,
        second: String,
        second_type: String,
    },

    #[error("'{name}' is not a struct type and cannot be composed")]
    #[diagnostic(code(uischema::not_a_struct))]
    NotAStruct { name: String },

    #[error("supertype cycle: {cycle}")]
    #[diagnostic(code(uischema::cyclic_supertype))]
    CyclicSupertype { cycle: String },

    #[error("resolving '{name}' exceeded the instantiation depth limit of {limit}")]
    #[diagnostic(
        code(uischema::depth_limit),
        help("a generic type probably instantiates itself with ever larger arguments")
    )]
    DepthLimit { name: String, limit: usize },

    #[error("value at '{path}' was already visited")]
    #[diagnostic(code(uischema::cyclic_value), help("widget state must be tree-shaped"))]
    CyclicValue { path: String },

    #[error("'{schema}' has no field '{field}'")]
    #[diagnostic(code(uischema::unknown_field))]
    UnknownField { schema: String, field: String },

    #[error("{count} definition(s) failed")]
    #[diagnostic(code(uischema::build))]
    Build {
        count: usize,
        #[related]
        errors: Vec<Error>,
    },
}

impl Error {
    pub fn unknown_type(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownType { name: name.into() })
    }

    pub fn not_a_struct(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::NotAStruct { name: name.into() })
    }

    /// Collapse collected failures: one error stays as-is, several become `Build`.
    pub fn collect(mut errors: Vec<Error>) -> Option<Box<Self>> {
        match errors.len() {
            0 => None,
            1 => errors.pop().map(Box::new),
            count => Some(Box::new(Error::Build { count, errors })),
        }
    }
}
