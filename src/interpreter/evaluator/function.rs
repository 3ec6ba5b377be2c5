use crate::{
    ast::Function,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::usize_to_f64_checked,
};

/// Type alias for reduction handlers.
///
/// A reduction receives the folded arguments, of which there is at least
/// one, and returns the folded result.
type ReduceFn = fn(&[f64]) -> EvalResult<f64>;

/// Defines the built-in functions by generating a lookup table and a name
/// list.
///
/// Each entry provides:
/// - the upper case name used in expressions,
/// - the [`Function`] it parses to,
/// - a function pointer implementing the reduction.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup by name),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names),
/// - `reducer` (an exhaustive match from [`Function`] to its reduction).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                function: $function:path,
                reduce: $reduce:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:     &'static str,
            function: Function,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, function: $function },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
        fn reducer(function: Function) -> ReduceFn {
            match function {
                $($function => $reduce,)*
            }
        }
    };
}

builtin_functions! {
    "SUM" => { function: Function::Sum, reduce: sum },
    "PRD" => { function: Function::Prd, reduce: product },
    "MIN" => { function: Function::Min, reduce: minimum },
    "MAX" => { function: Function::Max, reduce: maximum },
    "AVG" => { function: Function::Avg, reduce: mean },
}

/// Finds a built-in function by name, ignoring case.
///
/// # Example
/// ```
/// use lazycalc::{ast::Function, interpreter::evaluator::function::lookup};
///
/// assert_eq!(lookup("avg"), Some(Function::Avg));
/// assert_eq!(lookup("Prd"), Some(Function::Prd));
/// assert_eq!(lookup("mean"), None);
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<Function> {
    BUILTIN_TABLE.iter()
                 .find(|def| def.name.eq_ignore_ascii_case(name))
                 .map(|def| def.function)
}

/// Applies a built-in function to its folded arguments.
///
/// # Errors
/// - [`RuntimeError::NoArguments`] if `args` is empty.
/// - [`RuntimeError::TooManyArguments`] if `AVG` cannot represent the
///   argument count.
///
/// # Example
/// ```
/// use lazycalc::{ast::Function, interpreter::evaluator::function::apply};
///
/// assert_eq!(apply(Function::Sum, &[1.0, 2.0, 3.0]), Ok(6.0));
/// assert_eq!(apply(Function::Min, &[5.0, -1.0, 2.0]), Ok(-1.0));
/// assert!(apply(Function::Max, &[]).is_err());
/// ```
pub fn apply(function: Function, args: &[f64]) -> EvalResult<f64> {
    if args.is_empty() {
        return Err(RuntimeError::NoArguments { function });
    }
    reducer(function)(args)
}

#[allow(clippy::unnecessary_wraps)]
fn sum(args: &[f64]) -> EvalResult<f64> {
    Ok(args.iter().sum())
}

#[allow(clippy::unnecessary_wraps)]
fn product(args: &[f64]) -> EvalResult<f64> {
    Ok(args.iter().product())
}

/// Picks the argument that is `better` than all others. A NaN argument
/// makes the result NaN, as it does for the other reductions.
fn extremum(args: &[f64], better: fn(f64, f64) -> bool) -> f64 {
    let mut result = args[0];
    for &candidate in &args[1..] {
        if result.is_nan() {
            break;
        }
        if candidate.is_nan() || better(candidate, result) {
            result = candidate;
        }
    }
    result
}

#[allow(clippy::unnecessary_wraps)]
fn minimum(args: &[f64]) -> EvalResult<f64> {
    Ok(extremum(args, |a, b| a < b))
}

#[allow(clippy::unnecessary_wraps)]
fn maximum(args: &[f64]) -> EvalResult<f64> {
    Ok(extremum(args, |a, b| a > b))
}

fn mean(args: &[f64]) -> EvalResult<f64> {
    let count = usize_to_f64_checked(args.len(),
                                     RuntimeError::TooManyArguments { function: Function::Avg,
                                                                      count:    args.len(), })?;
    Ok(args.iter().sum::<f64>() / count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Function; 5] =
        [Function::Sum, Function::Prd, Function::Min, Function::Max, Function::Avg];

    #[test]
    fn every_function_is_in_the_table() {
        for function in ALL {
            assert_eq!(lookup(function.name()), Some(function));
            assert!(BUILTIN_FUNCTIONS.contains(&function.name()));
        }
        assert_eq!(BUILTIN_FUNCTIONS.len(), 5);
    }

    #[test]
    fn reductions() {
        assert_eq!(apply(Function::Sum, &[1.0, 2.0, 3.0]), Ok(6.0));
        assert_eq!(apply(Function::Prd, &[2.0, 3.0, 4.0]), Ok(24.0));
        assert_eq!(apply(Function::Min, &[5.0, -1.0, 2.0]), Ok(-1.0));
        assert_eq!(apply(Function::Max, &[5.0, -1.0, 2.0]), Ok(5.0));
        assert_eq!(apply(Function::Avg, &[2.0, 4.0]), Ok(3.0));
    }

    #[test]
    fn single_argument_is_identity() {
        for function in ALL {
            assert_eq!(apply(function, &[7.5]), Ok(7.5));
        }
    }

    #[test]
    fn reductions_ignore_order() {
        let forward = [3.0, -2.0, 8.0, 0.5];
        let backward = [0.5, 8.0, -2.0, 3.0];
        for function in ALL {
            assert_eq!(apply(function, &forward), apply(function, &backward));
        }
    }

    #[test]
    fn nan_arguments_propagate_through_extrema() {
        for function in ALL {
            assert!(apply(function, &[f64::NAN, 1.0, 2.0]).unwrap().is_nan(), "{function}");
            assert!(apply(function, &[1.0, f64::NAN, 2.0]).unwrap().is_nan(), "{function}");
            assert!(apply(function, &[1.0, 2.0, f64::NAN]).unwrap().is_nan(), "{function}");
        }
    }

    #[test]
    fn every_function_has_a_reduction() {
        for function in ALL {
            assert_eq!(reducer(function)(&[4.0]), Ok(4.0));
        }
    }

    #[test]
    fn empty_argument_list_fails() {
        assert_eq!(apply(Function::Avg, &[]),
                   Err(RuntimeError::NoArguments { function: Function::Avg }));
    }
}
