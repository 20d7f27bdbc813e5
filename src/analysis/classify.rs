//! Signature classification.
//!
//! Turns one `pub fn` into a [`FunctionDescriptor`]. Parameters are judged by
//! their underlying shape: local `type` aliases are expanded first, then the
//! shape decides the role.
//!
//! | Shape                                   | Role                      |
//! |-----------------------------------------|---------------------------|
//! | `&Request`                              | `InjectedRequest`         |
//! | `&mut dyn ResponseWriter`               | `InjectedResponseWriter`  |
//! | `Box<T>` with T named or scalar         | `DataByPointer`           |
//! | scalar primitive, `String`              | `DataByValue`             |
//! | named struct / enum / imported type     | `DataByValue`             |
//! | anything else                           | error                     |

use std::path::Path;

use quote::ToTokens;
use syn::spanned::Spanned;

use super::descriptor::{
    parameter_var_name, result_var_name, FunctionDescriptor, ParameterRole, ParameterSlot,
    ResultRole, ResultSlot, REQUEST_VAR, RESPONSE_WRITER_VAR,
};
use super::error::{ClassificationError, ClassificationErrorKind, InjectedKind, SourcePosition};
use super::resolver::TypeResolver;
use super::scope::{LocalType, ModuleScope, Resolution};

/// Types that decode as plain scalars
const SCALAR_TYPES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "String",
];

/// Alias chains longer than this are treated as cycles
const MAX_ALIAS_DEPTH: usize = 32;

/// Underlying shape of a parameter type, after alias expansion
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Scalar(String),
    Named(Resolution),
    Boxed(Box<Shape>),
    Reference { mutable: bool, inner: Box<Shape> },
    /// `dyn Trait` or `impl Trait`. `bound` is the first trait bound;
    /// only a `dyn` object can stand in for the injected writer.
    Interface {
        bound: Option<Resolution>,
        dyn_object: bool,
    },
    Unresolved(String),
    Unsupported(String),
}

/// Whether a top-level function is a handler candidate
#[must_use]
pub fn is_handler_candidate(item: &syn::ItemFn) -> bool {
    matches!(item.vis, syn::Visibility::Public(_))
}

/// Classifies handler signatures against one module scope
#[derive(Debug)]
pub struct Classifier<'a> {
    scope: &'a ModuleScope,
    request_type: String,
    response_writer: String,
}

impl<'a> Classifier<'a> {
    /// `request_type` and `response_writer` are the full paths of the two
    /// injected transport types, e.g. `handlergen::transport::Request`.
    #[must_use]
    pub fn new(scope: &'a ModuleScope, request_type: &str, response_writer: &str) -> Self {
        Self {
            scope,
            request_type: request_type.trim_start_matches("::").to_string(),
            response_writer: response_writer.trim_start_matches("::").to_string(),
        }
    }

    /// Build the descriptor of `item`, declared in `file`.
    ///
    /// The first unsupported parameter aborts the function.
    pub fn classify(
        &self,
        item: &syn::ItemFn,
        file: &Path,
        resolver: &mut TypeResolver,
    ) -> Result<FunctionDescriptor, ClassificationError> {
        let sig = &item.sig;
        let name = sig.ident.to_string();
        let fn_position = SourcePosition::from_span(file, sig.ident.span());
        let fail = |position: SourcePosition, kind| ClassificationError {
            position,
            function: name.clone(),
            kind,
        };

        if let Some(reason) = unsupported_signature(sig) {
            return Err(fail(
                fn_position,
                ClassificationErrorKind::UnsupportedSignature {
                    reason: reason.to_string(),
                },
            ));
        }

        let mut parameters = Vec::with_capacity(sig.inputs.len());
        let mut seen_request = false;
        let mut seen_writer = false;

        for (index, input) in sig.inputs.iter().enumerate() {
            let syn::FnArg::Typed(pat_type) = input else {
                return Err(fail(
                    SourcePosition::from_span(file, input.span()),
                    ClassificationErrorKind::UnsupportedSignature {
                        reason: "functions taking `self` are not supported".to_string(),
                    },
                ));
            };
            let source_name = pattern_name(&pat_type.pat);
            let position = SourcePosition::from_span(file, pat_type.ty.span());
            let shape = self.shape_of(&pat_type.ty, 0);

            let role = self
                .parameter_role(shape, &source_name, resolver)
                .map_err(|kind| fail(position.clone(), kind))?;

            let generated_var_name = match role {
                ParameterRole::InjectedRequest => {
                    if seen_request {
                        return Err(fail(
                            position,
                            ClassificationErrorKind::DuplicateInjected {
                                parameter: source_name,
                                role: InjectedKind::Request,
                            },
                        ));
                    }
                    seen_request = true;
                    REQUEST_VAR.to_string()
                }
                ParameterRole::InjectedResponseWriter => {
                    if seen_writer {
                        return Err(fail(
                            position,
                            ClassificationErrorKind::DuplicateInjected {
                                parameter: source_name,
                                role: InjectedKind::ResponseWriter,
                            },
                        ));
                    }
                    seen_writer = true;
                    RESPONSE_WRITER_VAR.to_string()
                }
                ParameterRole::DataByValue { .. } | ParameterRole::DataByPointer { .. } => {
                    parameter_var_name(index)
                }
            };

            parameters.push(ParameterSlot {
                source_name,
                role,
                generated_var_name,
            });
        }

        let (results, returns_tuple) = self.classify_results(&sig.output);
        let decodable_parameter_count = parameters.iter().filter(|p| p.role.is_decodable()).count();

        Ok(FunctionDescriptor {
            name,
            parameters,
            results,
            returns_tuple,
            decodable_parameter_count,
            position: fn_position,
        })
    }

    fn parameter_role(
        &self,
        shape: Shape,
        parameter: &str,
        resolver: &mut TypeResolver,
    ) -> Result<ParameterRole, ClassificationErrorKind> {
        let parameter = parameter.to_string();
        match shape {
            Shape::Reference { mutable, inner } => match (mutable, *inner) {
                (false, Shape::Named(res)) if self.is_well_known(&res, &self.request_type) => {
                    Ok(ParameterRole::InjectedRequest)
                }
                (
                    true,
                    Shape::Interface {
                        bound: Some(res),
                        dyn_object: true,
                    },
                ) if self.is_well_known(&res, &self.response_writer) =>
                {
                    Ok(ParameterRole::InjectedResponseWriter)
                }
                (_, Shape::Interface { .. }) => {
                    Err(ClassificationErrorKind::UnsupportedInterface { parameter })
                }
                (_, Shape::Unresolved(name)) => {
                    Err(ClassificationErrorKind::UnresolvedType { parameter, name })
                }
                _ => Err(ClassificationErrorKind::BorrowedParameter { parameter }),
            },
            Shape::Interface { .. } => {
                Err(ClassificationErrorKind::UnsupportedInterface { parameter })
            }
            Shape::Boxed(inner) => match *inner {
                Shape::Scalar(type_name) => Ok(ParameterRole::DataByPointer { type_name }),
                Shape::Named(res) => Ok(ParameterRole::DataByPointer {
                    type_name: resolver.qualify(&res),
                }),
                Shape::Interface { .. } => {
                    Err(ClassificationErrorKind::UnsupportedInterface { parameter })
                }
                Shape::Unresolved(name) => {
                    Err(ClassificationErrorKind::UnresolvedType { parameter, name })
                }
                Shape::Unsupported(shape) => Err(ClassificationErrorKind::UnsupportedType {
                    parameter,
                    shape: format!("Box of {shape}"),
                }),
                Shape::Boxed(_) | Shape::Reference { .. } => {
                    Err(ClassificationErrorKind::UnsupportedType {
                        parameter,
                        shape: "nested pointer".to_string(),
                    })
                }
            },
            Shape::Scalar(type_name) => Ok(ParameterRole::DataByValue { type_name }),
            Shape::Named(res) => Ok(ParameterRole::DataByValue {
                type_name: resolver.qualify(&res),
            }),
            Shape::Unresolved(name) => {
                Err(ClassificationErrorKind::UnresolvedType { parameter, name })
            }
            Shape::Unsupported(shape) => {
                Err(ClassificationErrorKind::UnsupportedType { parameter, shape })
            }
        }
    }

    fn is_well_known(&self, res: &Resolution, target: &str) -> bool {
        match res {
            Resolution::External { .. } => res
                .full_path()
                .is_some_and(|p| p.trim_start_matches("::") == target),
            Resolution::Glob(ident) => self
                .scope
                .glob_modules()
                .iter()
                .any(|g| format!("{}::{}", g.join("::"), ident) == target),
            Resolution::Local(_) | Resolution::Unresolved => false,
        }
    }

    fn shape_of(&self, ty: &syn::Type, depth: usize) -> Shape {
        match ty {
            syn::Type::Paren(p) => self.shape_of(&p.elem, depth),
            syn::Type::Group(g) => self.shape_of(&g.elem, depth),
            syn::Type::Reference(r) => Shape::Reference {
                mutable: r.mutability.is_some(),
                inner: Box::new(self.shape_of(&r.elem, depth)),
            },
            syn::Type::TraitObject(t) => Shape::Interface {
                bound: self.first_trait(&t.bounds),
                dyn_object: true,
            },
            syn::Type::ImplTrait(t) => Shape::Interface {
                bound: self.first_trait(&t.bounds),
                dyn_object: false,
            },
            syn::Type::Path(p) if p.qself.is_none() => self.path_shape(&p.path, depth),
            syn::Type::Path(_) => Shape::Unsupported("qualified associated type".to_string()),
            syn::Type::Slice(_) => Shape::Unsupported("slice".to_string()),
            syn::Type::Array(_) => Shape::Unsupported("array".to_string()),
            syn::Type::Tuple(t) if t.elems.is_empty() => {
                Shape::Unsupported("unit type".to_string())
            }
            syn::Type::Tuple(_) => Shape::Unsupported("tuple".to_string()),
            syn::Type::BareFn(_) => Shape::Unsupported("function pointer".to_string()),
            syn::Type::Ptr(_) => Shape::Unsupported("raw pointer".to_string()),
            syn::Type::Never(_) => Shape::Unsupported("never type".to_string()),
            syn::Type::Infer(_) => Shape::Unsupported("inferred type".to_string()),
            syn::Type::Macro(_) => Shape::Unsupported("type macro".to_string()),
            _ => Shape::Unsupported(format!("type `{}`", ty.to_token_stream())),
        }
    }

    fn path_shape(&self, path: &syn::Path, depth: usize) -> Shape {
        let Some(last) = path.segments.last() else {
            return Shape::Unsupported("empty path".to_string());
        };
        let ident = last.ident.to_string();
        let single = path.segments.len() == 1 && path.leading_colon.is_none();

        if single && self.scope.local_type(&ident).is_none() {
            if ident == "str" {
                return Shape::Unsupported("unsized `str`".to_string());
            }
            if SCALAR_TYPES.contains(&ident.as_str()) && last.arguments.is_none() {
                return Shape::Scalar(ident);
            }
        }
        if is_std_path(path, &["string", "String"]) && last.arguments.is_none() {
            return Shape::Scalar("String".to_string());
        }
        if let Some(inner) = box_argument(path, self.scope) {
            return Shape::Boxed(Box::new(self.shape_of(inner, depth)));
        }
        if path.segments.iter().any(|s| !s.arguments.is_none()) {
            return Shape::Unsupported(format!("generic type `{ident}`"));
        }

        let res = self.scope.resolve(path);
        match &res {
            Resolution::Local(name) => match self.scope.local_type(name) {
                Some(LocalType::Alias { generic: true, .. }) => {
                    Shape::Unsupported(format!("generic type alias `{name}`"))
                }
                Some(LocalType::Alias { target, .. }) => {
                    if depth >= MAX_ALIAS_DEPTH {
                        return Shape::Unsupported(format!("recursive type alias `{name}`"));
                    }
                    self.shape_of(target, depth + 1)
                }
                Some(LocalType::Trait) => Shape::Interface {
                    bound: Some(res.clone()),
                    dyn_object: false,
                },
                _ => Shape::Named(res.clone()),
            },
            Resolution::External { .. } | Resolution::Glob(_) => Shape::Named(res.clone()),
            Resolution::Unresolved => Shape::Unresolved(path_display(path)),
        }
    }

    fn first_trait(
        &self,
        bounds: &syn::punctuated::Punctuated<syn::TypeParamBound, syn::Token![+]>,
    ) -> Option<Resolution> {
        bounds.iter().find_map(|b| match b {
            syn::TypeParamBound::Trait(t) => Some(self.scope.resolve(&t.path)),
            _ => None,
        })
    }

    /// Result slots, and whether the function returns them as a tuple
    fn classify_results(&self, output: &syn::ReturnType) -> (Vec<ResultSlot>, bool) {
        let syn::ReturnType::Type(_, ty) = output else {
            return (Vec::new(), false);
        };
        let ty = self.expand_aliases(ty, 0);
        let (elems, tuple): (Vec<&syn::Type>, bool) = match ty {
            syn::Type::Tuple(t) => (t.elems.iter().collect(), !t.elems.is_empty()),
            other => (vec![other], false),
        };
        let slots = elems
            .into_iter()
            .enumerate()
            .map(|(index, elem)| {
                let boxed = match self.expand_aliases(elem, 0) {
                    syn::Type::Path(p) if p.qself.is_none() => {
                        box_argument(&p.path, self.scope).is_some()
                    }
                    _ => false,
                };
                ResultSlot {
                    role: if boxed {
                        ResultRole::ByPointer
                    } else {
                        ResultRole::ByValue
                    },
                    generated_var_name: result_var_name(index),
                }
            })
            .collect();
        (slots, tuple)
    }

    /// Follow local, non-generic aliases to the type they name
    fn expand_aliases<'t>(&'t self, ty: &'t syn::Type, depth: usize) -> &'t syn::Type {
        if depth >= MAX_ALIAS_DEPTH {
            return ty;
        }
        match ty {
            syn::Type::Paren(p) => self.expand_aliases(&p.elem, depth),
            syn::Type::Group(g) => self.expand_aliases(&g.elem, depth),
            syn::Type::Path(p) if p.qself.is_none() && p.path.segments.len() == 1 => {
                let ident = p.path.segments[0].ident.to_string();
                match self.scope.local_type(&ident) {
                    Some(LocalType::Alias {
                        target,
                        generic: false,
                    }) => self.expand_aliases(target, depth + 1),
                    _ => ty,
                }
            }
            _ => ty,
        }
    }
}

fn unsupported_signature(sig: &syn::Signature) -> Option<&'static str> {
    if sig.asyncness.is_some() {
        Some("async functions are not supported")
    } else if sig.unsafety.is_some() {
        Some("unsafe functions are not supported")
    } else if sig.abi.is_some() {
        Some("extern functions are not supported")
    } else if sig.variadic.is_some() {
        Some("variadic functions are not supported")
    } else if sig.generics.type_params().next().is_some()
        || sig.generics.const_params().next().is_some()
    {
        Some("generic functions are not supported")
    } else {
        None
    }
}

/// The `T` of `Box<T>`, `std::boxed::Box<T>` or `alloc::boxed::Box<T>`
fn box_argument<'p>(path: &'p syn::Path, scope: &ModuleScope) -> Option<&'p syn::Type> {
    let last = path.segments.last()?;
    if last.ident != "Box" {
        return None;
    }
    let prelude = path.segments.len() == 1 && scope.local_type("Box").is_none();
    if !prelude && !is_std_path(path, &["boxed", "Box"]) {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|a| match a {
        syn::GenericArgument::Type(t) => Some(t),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(t), None) => Some(t),
        _ => None,
    }
}

/// Whether `path` is `std::<tail>` or `alloc::<tail>`
fn is_std_path(path: &syn::Path, tail: &[&str]) -> bool {
    let idents: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    idents.len() == tail.len() + 1
        && matches!(idents[0].as_str(), "std" | "alloc")
        && idents[1..].iter().zip(tail).all(|(a, b)| a == b)
}

fn path_display(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

fn pattern_name(pat: &syn::Pat) -> String {
    match pat {
        syn::Pat::Ident(p) => p.ident.to_string(),
        other => other.to_token_stream().to_string(),
    }
}
