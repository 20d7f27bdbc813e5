use askama::Template;

use crate::analysis::{
    FunctionDescriptor, GenerationContext, ImportEntry, ParameterRole, ParameterSlot, ResultRole,
    ResultSlot,
};

/// One `use` line of the dispatch file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    /// Module path
    pub path: String,
    /// ` as alias`, or empty when the path already ends with the alias
    pub alias_clause: String,
}

impl From<&ImportEntry> for ImportLine {
    fn from(entry: &ImportEntry) -> Self {
        let alias_clause = if entry.needs_alias() {
            format!(" as {}", entry.alias)
        } else {
            String::new()
        };
        Self {
            path: entry.path.clone(),
            alias_clause,
        }
    }
}

/// Pre-rendered pieces of one handler registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerView {
    /// Function name and route key
    pub name: String,
    /// Shared collaborators the closure captures
    pub shared: Vec<String>,
    /// Local declarations, one statement each
    pub locals: Vec<String>,
    /// Arguments of the decode call, empty when nothing is decoded
    pub decode_args: String,
    /// Call of the handler function, including result bindings
    pub call: String,
    /// Arguments of the encode call, empty when nothing is returned
    pub encode_args: String,
}

impl From<&FunctionDescriptor> for HandlerView {
    fn from(desc: &FunctionDescriptor) -> Self {
        let decodes = desc.decodable_parameter_count > 0;
        let encodes = !desc.results.is_empty();

        let mut shared = Vec::new();
        if decodes || encodes {
            shared.push("msg_codec".to_string());
        }
        if decodes {
            shared.push("on_request_error".to_string());
        }
        if encodes {
            shared.push("on_response_error".to_string());
        }

        Self {
            name: desc.name.clone(),
            shared,
            locals: desc.parameters.iter().filter_map(local_declaration).collect(),
            decode_args: desc
                .decodable_parameters()
                .filter_map(decode_argument)
                .collect::<Vec<_>>()
                .join(", "),
            call: call_statement(desc),
            encode_args: desc
                .results
                .iter()
                .map(encode_argument)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Template data for the generated dispatch file
#[derive(Template)]
#[template(path = "dispatch.rs.txt", escape = "none")]
pub struct DispatchTemplateData {
    /// Analyzed module name
    pub module_name: String,
    /// Setup function name
    pub setup_fn: String,
    /// Alias of the transport module
    pub transport: String,
    /// Alias of the runtime support module
    pub web: String,
    /// Import block
    pub imports: Vec<ImportLine>,
    /// One registration per handler, in declaration order
    pub handlers: Vec<HandlerView>,
}

impl From<&GenerationContext> for DispatchTemplateData {
    fn from(ctx: &GenerationContext) -> Self {
        Self {
            module_name: ctx.module_name.clone(),
            setup_fn: ctx.setup_fn.clone(),
            transport: ctx.transport_alias.clone(),
            web: ctx.runtime_alias.clone(),
            imports: ctx.imports.entries().iter().map(ImportLine::from).collect(),
            handlers: ctx.descriptors.iter().map(HandlerView::from).collect(),
        }
    }
}

/// Render the dispatch source file for an analyzed module.
///
/// Rendering is a pure function of the context, so regenerating an
/// unchanged module yields the same bytes.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_dispatch(ctx: &GenerationContext) -> anyhow::Result<String> {
    Ok(DispatchTemplateData::from(ctx).render()?)
}

/// Declaration of the local that receives a data slot
///
/// Value slots start from `Default::default()`, pointer slots from a freshly
/// allocated default pointee. Injected slots have no local.
#[must_use]
pub fn local_declaration(slot: &ParameterSlot) -> Option<String> {
    let var = &slot.generated_var_name;
    match &slot.role {
        ParameterRole::DataByValue { type_name } => {
            Some(format!("let mut {var}: {type_name} = Default::default();"))
        }
        ParameterRole::DataByPointer { type_name } => {
            Some(format!("let mut {var}: Box<{type_name}> = Box::default();"))
        }
        ParameterRole::InjectedRequest | ParameterRole::InjectedResponseWriter => None,
    }
}

/// Decode target for a data slot: the local's address, or the boxed pointee
#[must_use]
pub fn decode_argument(slot: &ParameterSlot) -> Option<String> {
    let var = &slot.generated_var_name;
    match &slot.role {
        ParameterRole::DataByValue { .. } => Some(format!("&mut {var}")),
        ParameterRole::DataByPointer { .. } => Some(format!("&mut *{var}")),
        ParameterRole::InjectedRequest | ParameterRole::InjectedResponseWriter => None,
    }
}

/// Encode source for a result slot
#[must_use]
pub fn encode_argument(slot: &ResultSlot) -> String {
    let var = &slot.generated_var_name;
    match slot.role {
        ResultRole::ByValue => format!("&{var}"),
        ResultRole::ByPointer => format!("&*{var}"),
    }
}

/// The handler call with every parameter in declaration order.
///
/// The handler is named through `super::` so that locals of the generated
/// closure cannot shadow it.
#[must_use]
pub fn call_statement(desc: &FunctionDescriptor) -> String {
    let args = desc
        .parameters
        .iter()
        .map(|p| p.generated_var_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!("super::{}({args});", desc.name);
    match desc.results.as_slice() {
        [] => call,
        [single] if !desc.returns_tuple => format!("let {} = {call}", single.generated_var_name),
        [single] => format!("let ({},) = {call}", single.generated_var_name),
        many => {
            let vars = many
                .iter()
                .map(|r| r.generated_var_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("let ({vars}) = {call}")
        }
    }
}
