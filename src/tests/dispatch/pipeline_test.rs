#[cfg(test)]
mod tests {
    use pipes::config::{AppConfig, LogConfig, DEFAULT_CHAIN};
    use pipes::dispatch::{Arity, Chain, MethodTable, Value, ValueKind, STANDARD};
    use pipes::{PipeError, PipeResult, TryPipe};

    fn config(input: &str, chain: &str) -> AppConfig {
        AppConfig {
            app_name: "pipes".to_string(),
            app_version: "test".to_string(),
            input: input.to_string(),
            chain: chain.to_string(),
            log: LogConfig { trace_steps: true },
        }
    }

    #[test]
    fn test_demo_expression() {
        let result = pipes::run(&config("Metova", DEFAULT_CHAIN)).unwrap();
        assert_eq!(result.to_string(), r#"["A", "V", "O", "T", "E", "M"]"#);
    }

    #[test]
    fn test_dynamic_and_parsed_forms_agree() {
        let dynamic = Value::from("Metova")
            .pipe("upcase", &[])
            .pipe("reverse", &[])
            .pipe("split", &[Value::from("")])
            .unwrap();
        let chain: Chain = DEFAULT_CHAIN.parse().unwrap();
        assert_eq!(chain.run(&STANDARD, Value::from("Metova")).unwrap(), dynamic);
    }

    #[test]
    fn test_chaining_matches_nested_calls() {
        let nested = Value::from("abc")
            .pipe("upcase", &[])
            .unwrap()
            .pipe("chars", &[])
            .unwrap()
            .pipe("join", &[Value::from("-")])
            .unwrap();
        let chained = Value::from("abc")
            .pipe("upcase", &[])
            .pipe("chars", &[])
            .pipe("join", &[Value::from("-")])
            .unwrap();
        assert_eq!(nested, chained);
        assert_eq!(chained, Value::from("A-B-C"));
    }

    #[test]
    fn test_unknown_method_on_integer() {
        let err = pipes::run(&config("42", "nonexistent_method")).unwrap_err();
        let err = err.downcast::<PipeError>().unwrap();
        assert!(matches!(err, PipeError::MethodNotFound { receiver: ValueKind::Integer, .. }));
    }

    #[test]
    fn test_wrong_arity_through_run() {
        let err = pipes::run(&config("Metova", r#"upcase ["x"]"#)).unwrap_err();
        let err = err.downcast::<PipeError>().unwrap();
        assert_eq!(err.to_string(), "wrong number of arguments for `upcase' (given 1, expected 0)");
    }

    #[test]
    fn test_invalid_chain_through_run() {
        let err = pipes::run(&config("Metova", "upcase | | reverse")).unwrap_err();
        assert!(err.to_string().contains("Invalid PIPES_CHAIN"));
    }

    #[test]
    fn test_extending_a_table() {
        fn shout(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
            let times = args.first().and_then(Value::as_int).unwrap_or(1).max(0) as usize;
            Ok(Value::Str(format!("{}{}", receiver.to_s(), "!".repeat(times))))
        }

        let mut table: MethodTable = STANDARD.clone();
        table.register(ValueKind::String, "shout", Arity::Range(0, 1), shout);

        let chain: Chain = "upcase | shout [3]".parse().unwrap();
        assert_eq!(chain.run(&table, Value::from("hey")).unwrap(), Value::from("HEY!!!"));
        assert!(chain.run(&STANDARD, Value::from("hey")).is_err());
    }
}
