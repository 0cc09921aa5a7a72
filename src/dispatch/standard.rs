use crate::dispatch::table::MethodTable;
use crate::dispatch::value::{Arity, Value, ValueKind};
use crate::errors::{invalid_argument, type_mismatch, PipeResult};
use std::collections::HashSet;

use Arity::{Exact, Range};
use ValueKind::{Array, Bool, Integer, Nil, String as Str};

/// Upper bound, in bytes, on strings built by repetition.
pub const MAX_REPEAT_BYTES: usize = 64 * 1024 * 1024;

/// Builds the table of core methods every receiver exposes out of the box.
pub fn standard_table() -> MethodTable {
    let mut table = MethodTable::new();

    table
        .register_all("inspect", Exact(0), inspect)
        .register_all("to_s", Exact(0), to_s)
        .register_all("nil?", Exact(0), is_nil)
        .register_all("class", Exact(0), class);

    table
        .register(Str, "upcase", Exact(0), upcase)
        .register(Str, "downcase", Exact(0), downcase)
        .register(Str, "capitalize", Exact(0), capitalize)
        .register(Str, "swapcase", Exact(0), swapcase)
        .register(Str, "reverse", Exact(0), str_reverse)
        .register(Str, "strip", Exact(0), strip)
        .register(Str, "length", Exact(0), str_length)
        .register(Str, "size", Exact(0), str_length)
        .register(Str, "chars", Exact(0), chars)
        .register(Str, "split", Range(0, 1), split)
        .register(Str, "include?", Exact(1), str_include)
        .register(Str, "start_with?", Exact(1), start_with)
        .register(Str, "end_with?", Exact(1), end_with)
        .register(Str, "*", Exact(1), str_repeat)
        .register(Str, "+", Exact(1), str_concat)
        .register(Str, "to_i", Exact(0), to_i)
        .register(Str, "empty?", Exact(0), str_empty);

    table
        .register(Array, "reverse", Exact(0), list_reverse)
        .register(Array, "length", Exact(0), list_length)
        .register(Array, "size", Exact(0), list_length)
        .register(Array, "first", Exact(0), first)
        .register(Array, "last", Exact(0), last)
        .register(Array, "join", Range(0, 1), join)
        .register(Array, "include?", Exact(1), list_include)
        .register(Array, "sort", Exact(0), sort)
        .register(Array, "uniq", Exact(0), uniq)
        .register(Array, "compact", Exact(0), compact)
        .register(Array, "flatten", Exact(0), flatten)
        .register(Array, "push", Exact(1), push)
        .register(Array, "empty?", Exact(0), list_empty);

    table
        .register(Integer, "+", Exact(1), add)
        .register(Integer, "-", Exact(1), sub)
        .register(Integer, "*", Exact(1), mul)
        .register(Integer, "abs", Exact(0), abs)
        .register(Integer, "succ", Exact(0), succ)
        .register(Integer, "pred", Exact(0), pred)
        .register(Integer, "zero?", Exact(0), is_zero)
        .register(Integer, "even?", Exact(0), is_even)
        .register(Integer, "odd?", Exact(0), is_odd);

    table.register(Nil, "to_a", Exact(0), nil_to_a);

    // `!` is the one method booleans get beyond the common set.
    table.register(Bool, "!", Exact(0), not);

    table
}

fn recv_str<'a>(method: &str, receiver: &'a Value) -> PipeResult<&'a str> {
    receiver
        .as_str()
        .ok_or_else(|| type_mismatch(method, Str, receiver.kind()))
}

fn recv_list<'a>(method: &str, receiver: &'a Value) -> PipeResult<&'a [Value]> {
    receiver
        .as_list()
        .ok_or_else(|| type_mismatch(method, Array, receiver.kind()))
}

fn recv_int(method: &str, receiver: &Value) -> PipeResult<i64> {
    receiver
        .as_int()
        .ok_or_else(|| type_mismatch(method, Integer, receiver.kind()))
}

fn str_arg<'a>(method: &str, args: &'a [Value], index: usize) -> PipeResult<&'a str> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        Some(other) => Err(type_mismatch(method, Str, other.kind())),
        None => Err(type_mismatch(method, Str, Nil)),
    }
}

fn int_arg(method: &str, args: &[Value], index: usize) -> PipeResult<i64> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n),
        Some(other) => Err(type_mismatch(method, Integer, other.kind())),
        None => Err(type_mismatch(method, Integer, Nil)),
    }
}

fn map_str(method: &str, receiver: &Value, f: impl FnOnce(&str) -> String) -> PipeResult<Value> {
    recv_str(method, receiver).map(|s| Value::Str(f(s)))
}

fn inspect(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Str(receiver.to_string()))
}

fn to_s(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Str(receiver.to_s()))
}

fn is_nil(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(receiver.is_nil()))
}

fn class(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Str(receiver.kind().to_string()))
}

fn upcase(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("upcase", receiver, str::to_uppercase)
}

fn downcase(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("downcase", receiver, str::to_lowercase)
}

fn capitalize(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("capitalize", receiver, |s| {
        let mut chars = s.chars();
        match chars.next() {
            Some(head) => head.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
            None => String::new(),
        }
    })
}

fn swapcase(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("swapcase", receiver, |s| {
        s.chars()
            .flat_map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().collect::<Vec<_>>()
                } else {
                    c.to_uppercase().collect::<Vec<_>>()
                }
            })
            .collect()
    })
}

fn str_reverse(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("reverse", receiver, |s| s.chars().rev().collect())
}

fn strip(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    map_str("strip", receiver, |s| s.trim().to_string())
}

fn str_length(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("length", receiver)?;
    Ok(Value::Int(s.chars().count() as i64))
}

fn chars(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("chars", receiver)?;
    Ok(Value::List(s.chars().map(|c| Value::Str(c.to_string())).collect()))
}

// An empty separator yields one element per character; no separator (or a
// single space) splits on runs of whitespace. Trailing empty fields are dropped.
fn split(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("split", receiver)?;
    let sep = if args.is_empty() { " " } else { str_arg("split", args, 0)? };

    let mut parts: Vec<String> = match sep {
        "" => s.chars().map(String::from).collect(),
        " " => s.split_whitespace().map(String::from).collect(),
        sep => s.split(sep).map(String::from).collect(),
    };
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    Ok(Value::from(parts))
}

fn str_include(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("include?", receiver)?;
    Ok(Value::Bool(s.contains(str_arg("include?", args, 0)?)))
}

fn start_with(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("start_with?", receiver)?;
    Ok(Value::Bool(s.starts_with(str_arg("start_with?", args, 0)?)))
}

fn end_with(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("end_with?", receiver)?;
    Ok(Value::Bool(s.ends_with(str_arg("end_with?", args, 0)?)))
}

// Negative counts repeat zero times; results over MAX_REPEAT_BYTES are refused.
fn str_repeat(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("*", receiver)?;
    let times = usize::try_from(int_arg("*", args, 0)?.max(0))
        .map_err(|_| invalid_argument("*", "argument too big"))?;

    match s.len().checked_mul(times) {
        Some(len) if len <= MAX_REPEAT_BYTES => Ok(Value::Str(s.repeat(times))),
        _ => Err(invalid_argument("*", "argument too big")),
    }
}

fn str_concat(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("+", receiver)?;
    Ok(Value::Str(format!("{}{}", s, str_arg("+", args, 0)?)))
}

// Parses a leading optional sign and digits, ignoring the rest; 0 if none.
// Out-of-range numbers saturate at i64::MIN / i64::MAX.
fn to_i(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let s = recv_str("to_i", receiver)?.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(Value::Int(0));
    }

    let signed = if negative { format!("-{}", digits) } else { digits };
    let n = signed
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    Ok(Value::Int(n))
}

fn str_empty(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(recv_str("empty?", receiver)?.is_empty()))
}

fn list_reverse(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("reverse", receiver)?;
    Ok(Value::List(items.iter().rev().cloned().collect()))
}

fn list_length(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_list("length", receiver)?.len() as i64))
}

fn first(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(recv_list("first", receiver)?.first().cloned().unwrap_or_default())
}

fn last(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(recv_list("last", receiver)?.last().cloned().unwrap_or_default())
}

fn join_items(items: &[Value], sep: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::List(nested) => join_items(nested, sep),
            other => other.to_s(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

fn join(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("join", receiver)?;
    let sep = if args.is_empty() { "" } else { str_arg("join", args, 0)? };
    Ok(Value::Str(join_items(items, sep)))
}

fn list_include(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("include?", receiver)?;
    Ok(Value::Bool(args.first().is_some_and(|needle| items.contains(needle))))
}

// Only homogeneous arrays of integers or strings are comparable.
fn sort(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("sort", receiver)?;
    let Some(head) = items.first() else {
        return Ok(Value::List(Vec::new()));
    };

    let kind = head.kind();
    if !matches!(kind, Integer | Str) {
        return Err(type_mismatch("sort", Integer, kind));
    }
    if let Some(odd) = items.iter().find(|item| item.kind() != kind) {
        return Err(type_mismatch("sort", kind, odd.kind()));
    }

    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        _ => std::cmp::Ordering::Equal,
    });
    Ok(Value::List(sorted))
}

fn uniq(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("uniq", receiver)?;
    let mut seen = HashSet::new();
    let unique = items
        .iter()
        .filter(|item| seen.insert(item.to_string()))
        .cloned()
        .collect();
    Ok(Value::List(unique))
}

fn compact(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let items = recv_list("compact", receiver)?;
    Ok(Value::List(items.iter().filter(|item| !item.is_nil()).cloned().collect()))
}

fn flatten_into(items: &[Value], out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::List(nested) => flatten_into(nested, out),
            other => out.push(other.clone()),
        }
    }
}

fn flatten(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    let mut out = Vec::new();
    flatten_into(recv_list("flatten", receiver)?, &mut out);
    Ok(Value::List(out))
}

fn push(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    let mut items = recv_list("push", receiver)?.to_vec();
    items.extend(args.iter().cloned());
    Ok(Value::List(items))
}

fn list_empty(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(recv_list("empty?", receiver)?.is_empty()))
}

// Integer arithmetic wraps on overflow; `abs` saturates instead.
fn add(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("+", receiver)?.wrapping_add(int_arg("+", args, 0)?)))
}

fn sub(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("-", receiver)?.wrapping_sub(int_arg("-", args, 0)?)))
}

fn mul(receiver: &Value, args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("*", receiver)?.wrapping_mul(int_arg("*", args, 0)?)))
}

fn abs(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("abs", receiver)?.saturating_abs()))
}

fn succ(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("succ", receiver)?.wrapping_add(1)))
}

fn pred(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Int(recv_int("pred", receiver)?.wrapping_sub(1)))
}

fn is_zero(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(recv_int("zero?", receiver)? == 0))
}

fn is_even(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(recv_int("even?", receiver)? % 2 == 0))
}

fn is_odd(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::Bool(recv_int("odd?", receiver)? % 2 != 0))
}

fn nil_to_a(_receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    Ok(Value::List(Vec::new()))
}

fn not(receiver: &Value, _args: &[Value]) -> PipeResult<Value> {
    match receiver {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(type_mismatch("!", Bool, other.kind())),
    }
}
