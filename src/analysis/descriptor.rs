use serde::Serialize;

use super::error::SourcePosition;

/// Generated variable holding the incoming request inside a handler closure
pub const REQUEST_VAR: &str = "r";
/// Generated variable holding the response writer inside a handler closure
pub const RESPONSE_WRITER_VAR: &str = "w";

/// Variable name for the `index`-th declared parameter
#[must_use]
pub fn parameter_var_name(index: usize) -> String {
    format!("a{index}")
}

/// Variable name for the `index`-th result
#[must_use]
pub fn result_var_name(index: usize) -> String {
    format!("r{index}")
}

/// How a parameter is supplied to the handler function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterRole {
    /// Decoded into a zero-initialized local of `type_name`
    DataByValue { type_name: String },
    /// Decoded into a freshly allocated `Box<type_name>`
    DataByPointer { type_name: String },
    /// The incoming request, passed through
    InjectedRequest,
    /// The response writer, passed through
    InjectedResponseWriter,
}

impl ParameterRole {
    /// Whether the slot participates in request decoding
    #[must_use]
    pub fn is_decodable(&self) -> bool {
        matches!(
            self,
            ParameterRole::DataByValue { .. } | ParameterRole::DataByPointer { .. }
        )
    }

    /// Generation-ready type name for data slots
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ParameterRole::DataByValue { type_name } | ParameterRole::DataByPointer { type_name } => {
                Some(type_name)
            }
            ParameterRole::InjectedRequest | ParameterRole::InjectedResponseWriter => None,
        }
    }
}

/// One declared parameter of a handler function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSlot {
    /// Pattern as written in the source
    pub source_name: String,
    /// Classification of the parameter
    pub role: ParameterRole,
    /// Variable the generated closure uses for this slot
    pub generated_var_name: String,
}

/// How a returned value is handed to the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultRole {
    ByValue,
    ByPointer,
}

/// One returned value of a handler function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSlot {
    pub role: ResultRole,
    pub generated_var_name: String,
}

/// Everything the emitter needs to know about one handler function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    /// Function identifier; also the route key
    pub name: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterSlot>,
    /// Results in declaration order
    pub results: Vec<ResultSlot>,
    /// Whether the results come back as a tuple, including `(T,)`
    pub returns_tuple: bool,
    /// Number of parameters decoded from the request
    pub decodable_parameter_count: usize,
    /// Where the function is declared
    pub position: SourcePosition,
}

impl FunctionDescriptor {
    /// Parameters that are decoded from the request, in declaration order
    pub fn decodable_parameters(&self) -> impl Iterator<Item = &ParameterSlot> {
        self.parameters.iter().filter(|p| p.role.is_decodable())
    }
}
