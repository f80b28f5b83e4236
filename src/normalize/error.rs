use thiserror::Error;

/// Errors produced while normalizing a document into the IR.
///
/// Every variant names the offending schema path or operation location so a
/// failure can be traced without re-reading the document. Normalization has
/// no partial-success mode: the first error aborts the whole run.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{location}: {keyword} schemas are not supported")]
    Combinator {
        location: String,
        keyword: &'static str,
    },

    #[error("{location}: additionalProperties is not supported")]
    OpenObject { location: String },

    #[error("{location}: schema must declare exactly one type (no implicit typing)")]
    UntypedSchema { location: String },

    #[error("{location}: schema type {typ:?} is not supported (must be object/array/string/number/integer/boolean or enum)")]
    UnsupportedType { location: String, typ: String },

    #[error("{location}: enum values must be strings only")]
    NonStringEnum { location: String },

    #[error("{location}: array must define items")]
    MissingItems { location: String },

    #[error("{location}: only $ref to #/components/schemas/* is supported; got {reference:?}")]
    ForeignRef { location: String, reference: String },

    #[error("{location}: $ref target {name:?} is not a declared component schema")]
    DanglingRef { location: String, name: String },

    #[error("components.schemas.{name}: $ref entries are not supported; define the schema inline")]
    IndirectComponent { name: String },

    #[error("components.schemas contains an empty schema name")]
    EmptyComponentName,

    #[error("paths.{path}: $ref path items are not supported; define the path inline")]
    RefPathItem { path: String },

    #[error("{location}: $ref parameters are not supported; define parameters inline")]
    RefParam { location: String },

    #[error("{location}: $ref request bodies are not supported; define the body inline")]
    RefRequestBody { location: String },

    #[error("{location}: $ref responses are not supported; define the response inline")]
    RefResponse { location: String },

    #[error("{location}: missing operationId")]
    MissingOperationId { location: String },

    #[error("{location}: operationId {name:?} is not a legal identifier")]
    IllegalOperationId { location: String, name: String },

    #[error("{location}: duplicate operationId {name:?}; first declared at {first}")]
    DuplicateOperationId {
        location: String,
        name: String,
        first: String,
    },

    #[error("{location}: GET operations must not declare a requestBody")]
    BodyOnRead { location: String },

    #[error("{location}: parameter {name:?} in {place:?} is not supported (only path/query)")]
    UnsupportedParamLocation {
        location: String,
        name: String,
        place: String,
    },

    #[error("{location}: parameter has an empty name")]
    EmptyParamName { location: String },

    #[error("{location}: parameter {name:?} must define a schema")]
    ParamMissingSchema { location: String, name: String },

    #[error("{location}: must declare application/json content with a schema")]
    MissingJsonContent { location: String },

    #[error("{location}: responses must contain exactly \"200\"; found [{found}]")]
    ResponsesNot200 { location: String, found: String },

    #[error("paths.{path}: HTTP method {method:?} is not supported (only get/post)")]
    UnsupportedMethod { path: String, method: String },

    #[error("document declares no usable server base URL")]
    MissingBaseUrl,
}
