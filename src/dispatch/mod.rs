use crate::errors::{method_not_found, PipeError, PipeResult};
use lazy_static::lazy_static;
use tracing::debug;

pub mod chain;
pub mod standard;
pub mod table;
pub mod value;

pub use chain::{Chain, Step};
pub use table::{Handler, Method, MethodTable};
pub use value::{Arity, Value, ValueKind};

lazy_static! {
    /// The shared table of core methods, built on first use.
    pub static ref STANDARD: MethodTable = standard::standard_table();
}

/// Resolves `method` on the receiver's kind and calls it with the receiver as
/// implicit subject and `args` positionally. The result is returned as is.
pub fn pipe_in(table: &MethodTable, receiver: &Value, method: &str, args: &[Value]) -> PipeResult<Value> {
    let kind = receiver.kind();
    let resolved = match table.resolve(kind, method) {
        Some(resolved) => resolved,
        None => {
            debug!("{} does not respond to `{}'", kind, method);
            return Err(method_not_found(kind, method));
        }
    };

    if !resolved.arity.accepts(args.len()) {
        debug!("`{}' on {} takes {} arguments, got {}", method, kind, resolved.arity, args.len());
        return Err(PipeError::ArgumentMismatch {
            method: method.to_string(),
            expected: resolved.arity,
            given: args.len(),
        });
    }

    debug!("{}#{} with {} argument(s)", kind, method, args.len());
    resolved.call(receiver, args)
}

/// [`pipe_in`] against the [`STANDARD`] table.
pub fn pipe(receiver: &Value, method: &str, args: &[Value]) -> PipeResult<Value> {
    pipe_in(&STANDARD, receiver, method, args)
}

impl Value {
    pub fn pipe(&self, method: &str, args: &[Value]) -> PipeResult<Value> {
        pipe(self, method, args)
    }

    pub fn pipe_in(&self, table: &MethodTable, method: &str, args: &[Value]) -> PipeResult<Value> {
        pipe_in(table, self, method, args)
    }

    pub fn responds_to(&self, method: &str) -> bool {
        STANDARD.responds_to(self.kind(), method)
    }
}

/// Continues a dynamic chain from a previous step's result, short-circuiting
/// on the first failure.
pub trait TryPipe {
    fn pipe(self, method: &str, args: &[Value]) -> PipeResult<Value>;

    fn pipe_in(self, table: &MethodTable, method: &str, args: &[Value]) -> PipeResult<Value>;
}

impl TryPipe for PipeResult<Value> {
    fn pipe(self, method: &str, args: &[Value]) -> PipeResult<Value> {
        self.and_then(|value| value.pipe(method, args))
    }

    fn pipe_in(self, table: &MethodTable, method: &str, args: &[Value]) -> PipeResult<Value> {
        self.and_then(|value| value.pipe_in(table, method, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Value {
        Value::from(vec!["A", "V", "O", "T", "E", "M"])
    }

    #[test]
    fn test_pipe_scenarios() {
        assert_eq!(Value::from("Metova").pipe("upcase", &[]).unwrap(), Value::from("METOVA"));
        assert_eq!(Value::from("METOVA").pipe("reverse", &[]).unwrap(), Value::from("AVOTEM"));
        assert_eq!(
            Value::from("AVOTEM").pipe("split", &[Value::from("")]).unwrap(),
            letters()
        );
    }

    #[test]
    fn test_full_chain() {
        let result = Value::from("Metova")
            .pipe("upcase", &[])
            .pipe("reverse", &[])
            .pipe("split", &[Value::from("")])
            .unwrap();
        assert_eq!(result, letters());
        assert_eq!(result.to_string(), r#"["A", "V", "O", "T", "E", "M"]"#);
    }

    #[test]
    fn test_method_not_found() {
        let err = Value::Int(42).pipe("nonexistent_method", &[]).unwrap_err();
        assert!(matches!(
            err,
            PipeError::MethodNotFound { receiver: ValueKind::Integer, ref method } if method == "nonexistent_method"
        ));
    }

    #[test]
    fn test_argument_mismatch() {
        let err = Value::from("abc").pipe("upcase", &[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, PipeError::ArgumentMismatch { given: 1, expected: Arity::Exact(0), .. }));

        let err = Value::from("abc").pipe("split", &[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, PipeError::TypeMismatch { expected: ValueKind::String, found: ValueKind::Integer, .. }));
    }

    #[test]
    fn test_chain_short_circuits() {
        let err = Value::Int(1)
            .pipe("upcase", &[])
            .pipe("reverse", &[])
            .unwrap_err();
        assert_eq!(err.kind(), "method_not_found");
    }

    #[test]
    fn test_custom_table() {
        fn double(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
            let n = receiver.as_int().unwrap_or_default();
            Ok(Value::Int(n * 2))
        }

        let mut table = MethodTable::new();
        table.register(ValueKind::Integer, "double", Arity::Exact(0), double);

        let result = Value::Int(5).pipe_in(&table, "double", &[]).pipe_in(&table, "double", &[]);
        assert_eq!(result.unwrap(), Value::Int(20));
        assert!(!Value::Int(5).responds_to("double"));
        assert!(Value::Int(5).pipe_in(&table, "succ", &[]).is_err());
    }
}
