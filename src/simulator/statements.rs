//! Statement classification and pattern extraction
//!
//! A trimmed source line is classified into one of a closed set of statement
//! kinds ([`Statement`]) by substring and regex heuristics, not by parsing.
//! The same dispatch drives the top-level synchronous pass, inlined function
//! body replay, and callback body replay.
//!
//! The extraction helpers pull console messages and timer delays out of
//! matched lines.  They have no notion of actual data flow: a promise
//! callback logging its `result` parameter is substituted with the
//! descriptive text "Promise result".

use regex::Regex;
use std::sync::OnceLock;

static CALL_RE: OnceLock<Regex> = OnceLock::new();
static LOG_LITERAL_RE: OnceLock<Regex> = OnceLock::new();
static LOG_ARG_RE: OnceLock<Regex> = OnceLock::new();
static INLINE_DELAY_RE: OnceLock<Regex> = OnceLock::new();
static BRACE_DELAY_RE: OnceLock<Regex> = OnceLock::new();
static PAREN_DELAY_RE: OnceLock<Regex> = OnceLock::new();
static INTERVAL_DELAY_RE: OnceLock<Regex> = OnceLock::new();
static SINGLE_LINE_BODY_RE: OnceLock<Regex> = OnceLock::new();

fn call_re() -> &'static Regex {
    CALL_RE.get_or_init(|| Regex::new(r"^\s*(\w+)\s*\(\s*\)\s*;?\s*$").expect("call regex"))
}

fn log_literal_re() -> &'static Regex {
    LOG_LITERAL_RE.get_or_init(|| {
        Regex::new(r#"console\.log\s*\(\s*['"`]([^'"`]*)['"`]\s*\)"#).expect("log literal regex")
    })
}

fn log_arg_re() -> &'static Regex {
    LOG_ARG_RE
        .get_or_init(|| Regex::new(r"console\.log\s*\(\s*([^)]+?)\s*\)").expect("log arg regex"))
}

fn inline_delay_re() -> &'static Regex {
    INLINE_DELAY_RE.get_or_init(|| {
        Regex::new(r"setTimeout\s*\([^,]*,\s*(\d+)\s*\)").expect("inline delay regex")
    })
}

fn brace_delay_re() -> &'static Regex {
    BRACE_DELAY_RE.get_or_init(|| Regex::new(r"\},\s*(\d+)\s*\)").expect("brace delay regex"))
}

fn paren_delay_re() -> &'static Regex {
    PAREN_DELAY_RE.get_or_init(|| Regex::new(r"\),\s*(\d+)\s*\)").expect("paren delay regex"))
}

fn interval_delay_re() -> &'static Regex {
    INTERVAL_DELAY_RE.get_or_init(|| {
        Regex::new(r"setInterval\s*\(\s*.*?,\s*(\d+)\s*\)").expect("interval delay regex")
    })
}

fn single_line_body_re() -> &'static Regex {
    SINGLE_LINE_BODY_RE
        .get_or_init(|| Regex::new(r"\{([^}]*)\}").expect("single line body regex"))
}

/// How many following lines the delay extractor inspects when the delay
/// literal is not on the invocation line itself
const DELAY_LOOKAHEAD_LINES: usize = 5;

/// The closed set of statement kinds the simulator recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `setTimeout(...)` invocation
    SetTimeout,
    /// `Promise.resolve(...)` invocation
    PromiseResolve,
    /// `console.log(...)` with a string literal argument
    ConsoleLog,
    /// `setInterval(...)` invocation
    SetInterval,
    /// Bare zero-argument identifier call, `name();`
    Call(&'a str),
    /// Anything else: declarations, blank lines, unsupported constructs
    Other,
}

impl<'a> Statement<'a> {
    /// Classify a trimmed source line, in priority order
    pub fn classify(line: &'a str) -> Statement<'a> {
        if line.contains("setTimeout") {
            Statement::SetTimeout
        } else if line.contains("Promise.resolve") {
            Statement::PromiseResolve
        } else if line.contains("console.log") {
            Statement::ConsoleLog
        } else if line.contains("setInterval") {
            Statement::SetInterval
        } else if let Some(name) = bare_call_name(line) {
            Statement::Call(name)
        } else {
            Statement::Other
        }
    }
}

/// Match `name();` where `name` is not one of the built-in forms
fn bare_call_name(line: &str) -> Option<&str> {
    if line.contains("function") || line.contains("Promise") {
        return None;
    }
    call_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the quoted string literal from a `console.log` line
///
/// Falls back to "undefined" when the argument is not a quoted literal, the
/// same value a browser would print for a missing binding.
pub fn log_message(line: &str) -> String {
    log_literal_re()
        .captures(line)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| String::from("undefined"))
}

/// Extract the message logged inside a `.then()` callback
///
/// The bare parameter name `result` stands in for the resolved value and
/// becomes "Promise result"; quoted literals are unquoted; any other token
/// is used verbatim.
pub fn promise_log_message(line: &str) -> String {
    let Some(caps) = log_arg_re().captures(line) else {
        return String::from("result");
    };
    let param = caps[1].trim();
    if param == "result" {
        String::from("Promise result")
    } else if param.starts_with('\'') || param.starts_with('"') || param.starts_with('`') {
        param.replace(['\'', '"'], "")
    } else {
        param.to_string()
    }
}

/// Extract the delay of the `setTimeout` starting at `index`
///
/// The invocation line is searched for a trailing `, <int>)` literal first;
/// when the call spans multiple lines the closing `}, 1000)` sits below the
/// opening, so up to [`DELAY_LOOKAHEAD_LINES`] following lines are inspected.
/// Defaults to 0 when never found.
pub fn timeout_delay(lines: &[&str], index: usize) -> u64 {
    if let Some(delay) = delay_on_line(lines[index].trim()) {
        return delay;
    }
    for look_ahead in 1..=DELAY_LOOKAHEAD_LINES {
        let Some(line) = lines.get(index + look_ahead) else {
            break;
        };
        if let Some(delay) = delay_on_line(line.trim()) {
            return delay;
        }
    }
    0
}

fn delay_on_line(line: &str) -> Option<u64> {
    for re in [inline_delay_re(), brace_delay_re(), paren_delay_re()] {
        if let Some(caps) = re.captures(line) {
            if let Ok(delay) = caps[1].parse() {
                return Some(delay);
            }
        }
    }
    None
}

/// Extract the interval of a `setInterval` line, defaulting to 1000ms
pub fn interval_delay(line: &str) -> u64 {
    interval_delay_re()
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(1000)
}

/// Extract the body of a single-line function declaration, the content
/// between its braces
pub fn single_line_body(line: &str) -> Option<&str> {
    single_line_body_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
}
