/// Function values, arity checks and call evaluation.
///
/// Defines [`core::Function`], the callable stored in a context, and
/// [`core::Arity`], the inclusive argument-count range it accepts.
pub mod core;

/// Built-in function implementations.
///
/// Contains the functions of the basic and scientific presets together with
/// the tables the presets are built from.
pub mod builtin;
