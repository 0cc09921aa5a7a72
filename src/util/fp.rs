/// The Pipe trait provides a method to pipe a value through a transformation.
///
/// This trait allows for a more functional programming style by enabling
/// method chaining and easy value transformation.
///
/// # Examples
///
/// ```rust
/// use pipes::util::fp::Pipe;
/// let result = 5.pipe(|x| x * 2);  // result is 10
/// let string = "hello".pipe(str::to_uppercase);  // string is "HELLO"
/// let parts = "a,b".pipe_with(|s: &str, sep: char| s.split(sep).count(), (',',));  // 2
/// ```
pub trait Pipe {
    /// Transforms the current value by applying the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that takes the current value and returns a transformed value
    ///
    /// # Returns
    ///
    /// The result of applying the transformation function to the current value
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
        Self: Sized,
    {
        f(self)
    }

    /// Like [`Pipe::pipe`], but passes the extra arguments in `args` positionally
    /// after the current value: `x.pipe_with(f, (a, b))` is `f(x, a, b)`.
    fn pipe_with<F, A>(self, f: F, args: A) -> F::Output
    where
        F: Invoke<Self, A>,
        Self: Sized,
    {
        f.invoke(self, args)
    }

    /// Pipes a shared borrow of the current value.
    fn pipe_ref<'a, F, R>(&'a self, f: F) -> R
    where
        F: FnOnce(&'a Self) -> R,
    {
        f(self)
    }

    /// Pipes a mutable borrow of the current value.
    fn pipe_mut<'a, F, R>(&'a mut self, f: F) -> R
    where
        F: FnOnce(&'a mut Self) -> R,
    {
        f(self)
    }
}

impl<T: ?Sized> Pipe for T {}

/// A callable that takes a subject plus a tuple of extra arguments.
///
/// Implemented for every `FnOnce(S, A1, .., An)` with `n` in `0..=4`, where
/// `Args` is the tuple `(A1, .., An)`.
pub trait Invoke<S, Args> {
    type Output;

    fn invoke(self, subject: S, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, S, R, $($arg),*> Invoke<S, ($($arg,)*)> for Func
        where
            Func: FnOnce(S, $($arg),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn invoke(self, subject: S, ($($arg,)*): ($($arg,)*)) -> R {
                self(subject, $($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A1);
impl_invoke!(A1, A2);
impl_invoke!(A1, A2, A3);
impl_invoke!(A1, A2, A3, A4);

/// A chainable wrapper holding a value, for pipelines that read better as a
/// sequence of `then` calls than as nested `pipe`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Piped<T>(T);

impl<T> Piped<T> {
    pub fn new(value: T) -> Self {
        Piped(value)
    }

    pub fn then<F, R>(self, f: F) -> Piped<R>
    where
        F: FnOnce(T) -> R,
    {
        Piped(f(self.0))
    }

    pub fn then_with<F, A>(self, f: F, args: A) -> Piped<F::Output>
    where
        F: Invoke<T, A>,
    {
        Piped(f.invoke(self.0, args))
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Piped<T> {
    fn from(value: T) -> Self {
        Piped(value)
    }
}

/// Threads a value through a series of stages, left to right.
///
/// Each stage is either a callable expression, applied as `f(acc)`, or a
/// parenthesized group `(f, a, b)`, applied as `f(acc, a, b)`.
///
/// ```rust
/// use pipes::pipe;
/// let n = pipe!("a-b-c" => (str::split, '-') => (Iterator::count));
/// assert_eq!(n, 3);
/// ```
#[macro_export]
macro_rules! pipe {
    (@stage $acc:expr, ($f:expr $(, $arg:expr)* $(,)?)) => {
        ($f)($acc $(, $arg)*)
    };
    (@stage $acc:expr, $f:expr) => {
        ($f)($acc)
    };
    ($value:expr $(=> $stage:tt)+) => {{
        let acc = $value;
        $(
            let acc = $crate::pipe!(@stage acc, $stage);
        )+
        acc
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upcase(s: &str) -> String {
        s.to_uppercase()
    }

    fn reverse(s: String) -> String {
        s.chars().rev().collect()
    }

    fn split(s: String, sep: &str) -> Vec<String> {
        if sep.is_empty() {
            s.chars().map(String::from).collect()
        } else {
            s.split(sep).map(String::from).collect()
        }
    }

    #[test]
    fn test_pipe_equals_direct_call() {
        assert_eq!("Metova".pipe(upcase), upcase("Metova"));
        assert_eq!(7.pipe(|x: i32| x * 3), 21);
    }

    #[test]
    fn test_pipe_with_extra_args() {
        assert_eq!("AVOTEM".to_string().pipe_with(split, ("",)), vec!["A", "V", "O", "T", "E", "M"]);
        assert_eq!("a,b".to_string().pipe_with(split, (",",)), split("a,b".to_string(), ","));
        assert_eq!(1.pipe_with(|a: i32, b: i32, c: i32, d: i32, e: i32| a + b + c + d + e, (2, 3, 4, 5)), 15);
        assert_eq!(2.pipe_with(|x: i32| x + 1, ()), 3);
    }

    #[test]
    fn test_chaining_composes_left_to_right() {
        let chained = "Metova".pipe(upcase).pipe(reverse).pipe_with(split, ("",));
        assert_eq!(chained, vec!["A", "V", "O", "T", "E", "M"]);
        assert_eq!("Metova".pipe(upcase).pipe(reverse), reverse(upcase("Metova")));
    }

    #[test]
    fn test_pipe_borrows() {
        let mut items = vec![3, 1, 2];
        items.pipe_mut(|v| v.sort());
        assert_eq!(items.pipe_ref(|v| v.len()), 3);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_piped_wrapper() {
        let result = Piped::new("Metova")
            .then(upcase)
            .then(reverse)
            .then_with(split, ("",))
            .into_inner();
        assert_eq!(result, vec!["A", "V", "O", "T", "E", "M"]);
        assert_eq!(Piped::from(4).then(|x| x * x).get(), &16);
    }

    #[test]
    fn test_pipe_macro() {
        let result = pipe!("Metova" => upcase => reverse => (split, ""));
        assert_eq!(result, vec!["A", "V", "O", "T", "E", "M"]);
        assert_eq!(pipe!(10 => (|x, y| x - y, 4)), 6);
    }
}
