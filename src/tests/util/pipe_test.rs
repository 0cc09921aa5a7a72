#[cfg(test)]
mod tests {
    use pipes::{pipe, Pipe, Piped};

    fn upcase(s: &str) -> String {
        s.to_uppercase()
    }

    fn reverse(s: String) -> String {
        s.chars().rev().collect()
    }

    fn split(s: String, sep: &str) -> Vec<String> {
        match sep {
            "" => s.chars().map(String::from).collect(),
            sep => s.split(sep).map(String::from).collect(),
        }
    }

    const LETTERS: [&str; 6] = ["A", "V", "O", "T", "E", "M"];

    #[test]
    fn test_single_stages() {
        assert_eq!("Metova".pipe(upcase), "METOVA");
        assert_eq!("METOVA".to_string().pipe(reverse), "AVOTEM");
        assert_eq!("AVOTEM".to_string().pipe_with(split, ("",)), LETTERS);
    }

    #[test]
    fn test_full_chain() {
        let result = "Metova".pipe(upcase).pipe(reverse).pipe_with(split, ("",));
        assert_eq!(result, split(reverse(upcase("Metova")), ""));
        assert_eq!(result, LETTERS);
    }

    #[test]
    fn test_equivalent_to_direct_calls() {
        let inputs = ["", "a", "Hello, World", "ünïcödé"];
        for input in inputs {
            assert_eq!(input.pipe(upcase), upcase(input));
            assert_eq!(input.pipe(upcase).pipe(reverse), reverse(upcase(input)));
            assert_eq!(input.to_string().pipe_with(split, (",",)), split(input.to_string(), ","));
        }
    }

    #[test]
    fn test_methods_as_function_values() {
        assert_eq!("  padded ".pipe(str::trim), "padded");
        assert_eq!(vec![1, 2, 3].pipe_ref(Vec::len), 3);
        assert_eq!("a-b".pipe_with(str::replace, ("-", "+")), "a+b");
        assert_eq!(Some(2).pipe_with(Option::unwrap_or, (0,)), 2);
    }

    #[test]
    fn test_wrapper_and_macro_agree() {
        let wrapped = Piped::new("Metova").then(upcase).then(reverse).then_with(split, ("",));
        let piped = pipe!("Metova" => upcase => reverse => (split, ""));
        assert_eq!(wrapped.into_inner(), piped);
    }
}
