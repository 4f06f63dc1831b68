//! Balanced-parenthesis helpers for rewriting function calls.

use regex::Regex;
use smallvec::SmallVec;

/// Raw argument slices of one call.
pub type Args<'a> = SmallVec<[&'a str; 4]>;

/// Split the argument list of the call whose `(` sits at byte `open`.
///
/// Returns the raw (untrimmed) arguments and the index of the matching `)`,
/// or `None` when the parentheses never balance. `f()` yields one empty
/// argument.
pub fn split_args(sql: &str, open: usize) -> Option<(Args<'_>, usize)> {
    let bytes = sql.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut start = open + 1;
    let mut args = Args::new();
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    args.push(&sql[start..i]);
                    return Some((args, i));
                }
            }
            b',' if depth == 1 => {
                args.push(&sql[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    None
}

/// Rewrite every call matched by `pattern`.
///
/// `pattern` must end in `\(` and capture the function name as written in
/// group 1. Arguments are rewritten first, so nested calls of the same
/// function are handled inside out. When `rewrite` returns `None` the call is
/// kept (with its rewritten arguments).
pub fn rewrite_calls<F>(sql: &str, pattern: &Regex, rewrite: &F) -> String
where
    F: Fn(&str, &[String]) -> Option<String>
{
    let mut out = String::with_capacity(sql.len());
    let mut pos = 0;

    while let Some(caps) = pattern.captures_at(sql, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let open = whole.end() - 1;

        let Some((raw_args, close)) = split_args(sql, open) else {
            out.push_str(&sql[pos..whole.end()]);
            pos = whole.end();
            continue;
        };

        let args: Vec<String> = raw_args
            .iter()
            .map(|arg| rewrite_calls(arg, pattern, rewrite))
            .collect();

        out.push_str(&sql[pos..whole.start()]);
        match rewrite(name, &args) {
            Some(replacement) => out.push_str(&replacement),
            None => {
                out.push_str(&sql[whole.start()..=open]);
                out.push_str(&args.join(","));
                out.push(')');
            }
        }
        pos = close + 1;
    }

    out.push_str(&sql[pos..]);
    out
}

/// Parenthesis depth in front of each byte, relative to the start of `sql`.
pub fn paren_depths(sql: &str) -> Vec<i32> {
    let mut depth = 0;
    sql.bytes()
        .map(|b| {
            let current = depth;
            match b {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            }
            current
        })
        .collect()
}

/// Index of the `)` that closes the scope `from` sits in, or the end of `sql`.
pub fn scope_end(sql: &str, from: usize) -> usize {
    let mut depth = 0usize;
    for (i, b) in sql.bytes().enumerate().skip(from) {
        match b {
            b'(' => depth += 1,
            b')' if depth == 0 => return i,
            b')' => depth -= 1,
            _ => {}
        }
    }
    sql.len()
}
