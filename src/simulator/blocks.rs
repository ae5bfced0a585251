//! Source block identification
//!
//! This module locates the textual bounds of the constructs whose bodies are
//! replayed later instead of being scanned as top-level code:
//! - [`FunctionTable`]: zero-argument `function name() { ... }` declarations
//! - [`CallbackRegion`]: `setTimeout(...)` invocations and `.then(...)`
//!   continuations, each with the line its callback body starts on
//!
//! End lines are resolved by a per-character brace depth scan with no
//! string-literal awareness, a deliberate simplification.  If a region never
//! terminates before the source ends, its end line falls back to its start
//! line and the construct degrades to a no-op single line.  All line numbers
//! are 1-based and inclusive.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

static FUNCTION_DECL_RE: OnceLock<Regex> = OnceLock::new();

fn function_decl_re() -> &'static Regex {
    FUNCTION_DECL_RE
        .get_or_init(|| Regex::new(r"function\s+(\w+)\s*\(\s*\)\s*\{").expect("function decl regex"))
}

/// Line bounds of a user function declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDecl {
    pub start_line: usize,
    pub end_line: usize,
}

/// Mapping from function name to its declaration bounds
///
/// Built once per run and read-only afterwards.  Used to resolve
/// zero-argument calls to bodies for inlined step expansion.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<String, FunctionDecl>,
}

impl FunctionTable {
    /// Scan all source lines for `function <name>() {` declarations
    pub fn parse(lines: &[&str]) -> Self {
        let mut functions = FxHashMap::default();
        for (index, line) in lines.iter().enumerate() {
            if let Some(caps) = function_decl_re().captures(line.trim()) {
                let name = caps[1].to_string();
                let start_line = index + 1;
                let end_line = function_end_line(lines, index);
                functions.insert(name, FunctionDecl {
                    start_line,
                    end_line,
                });
            }
        }
        FunctionTable { functions }
    }

    pub fn get(&self, name: &str) -> Option<FunctionDecl> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Whether a line falls strictly inside some function body
    ///
    /// The declaration line itself is not inside; the closing brace line is.
    pub fn is_inside_body(&self, line_number: usize) -> bool {
        self.functions
            .values()
            .any(|f| line_number > f.start_line && line_number <= f.end_line)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Resolve the 1-based end line of the function starting at `start_index`
fn function_end_line(lines: &[&str], start_index: usize) -> usize {
    let start = lines[start_index];

    // Single-line body: opening and closing brace on the declaration line
    let opens = start.matches('{').count();
    let closes = start.matches('}').count();
    if opens > 0 && opens == closes {
        return start_index + 1;
    }

    let mut depth: i64 = 0;
    for (index, line) in lines.iter().enumerate().skip(start_index) {
        depth += line.matches('{').count() as i64;
        depth -= line.matches('}').count() as i64;
        if depth == 0 && index > start_index {
            return index + 1;
        }
    }
    start_index + 1
}

/// Textual bounds of a `setTimeout(...)` or `.then(...)` invocation
///
/// `end_line` is the line holding the closing `);`.  `body_start_line` is
/// the first non-empty line after the opening construct that is not part of
/// its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackRegion {
    pub start_line: usize,
    pub end_line: usize,
    pub body_start_line: usize,
}

impl CallbackRegion {
    /// Whether a line is strictly between the opening and closing lines
    pub fn contains_interior(&self, line_number: usize) -> bool {
        line_number > self.start_line && line_number < self.end_line
    }
}

/// Locate every `setTimeout(...)` region in the source
pub fn find_timeout_regions(lines: &[&str]) -> Vec<CallbackRegion> {
    let mut regions = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if line.contains("setTimeout") {
            regions.push(region_at(lines, index, "setTimeout", "},"));
        }
    }
    regions
}

/// Locate every `.then(...)` region in the source
pub fn find_promise_regions(lines: &[&str]) -> Vec<CallbackRegion> {
    let mut regions = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if line.contains(".then(") {
            regions.push(region_at(lines, index, ".then(", "});"));
        }
    }
    regions
}

/// Find the `.then(...)` region paired with a `Promise.resolve` at
/// `start_index`, scanning forward for the first `.then(` line
pub fn promise_region_after(lines: &[&str], start_index: usize) -> Option<CallbackRegion> {
    for (index, line) in lines.iter().enumerate().skip(start_index) {
        if line.contains(".then(") {
            return Some(region_at(lines, index, ".then(", "});"));
        }
    }
    None
}

fn region_at(lines: &[&str], start_index: usize, trigger: &str, closer: &str) -> CallbackRegion {
    let start_line = start_index + 1;
    let end_line = region_end_index(lines, start_index) + 1;

    // First body line: non-empty, not the construct signature, not a closer
    let mut body_start_line = start_line;
    for line_number in start_line..end_line {
        let text = lines[line_number - 1];
        if !text.trim().is_empty() && !text.contains(trigger) && !text.contains(closer) {
            body_start_line = line_number;
            break;
        }
    }

    CallbackRegion {
        start_line,
        end_line,
        body_start_line,
    }
}

/// 0-based index of the first line where brace depth returns to zero and the
/// line contains `);`.  Falls back to `start_index` when never found.
fn region_end_index(lines: &[&str], start_index: usize) -> usize {
    let mut depth: i64 = 0;
    for (index, line) in lines.iter().enumerate().skip(start_index) {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
        if depth == 0 && line.contains(");") {
            return index;
        }
    }
    start_index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<&str> {
        source.lines().collect()
    }

    #[test]
    fn test_function_table_multiline() {
        let source = "function greet() {\n  console.log('hi')\n}\n\ngreet();";
        let table = FunctionTable::parse(&lines(source));

        let decl = table.get("greet").unwrap();
        assert_eq!(decl.start_line, 1);
        assert_eq!(decl.end_line, 3);
        assert!(!table.is_inside_body(1));
        assert!(table.is_inside_body(2));
        assert!(table.is_inside_body(3));
        assert!(!table.is_inside_body(5));
    }

    #[test]
    fn test_function_table_single_line_body() {
        let source = "function third() { console.log('3') }\nthird();";
        let table = FunctionTable::parse(&lines(source));

        let decl = table.get("third").unwrap();
        assert_eq!(decl.start_line, 1);
        assert_eq!(decl.end_line, 1);
        assert!(!table.is_inside_body(2));
    }

    #[test]
    fn test_function_table_ignores_parameterized() {
        let source = "function add(a, b) {\n  return a + b\n}";
        let table = FunctionTable::parse(&lines(source));
        assert!(table.is_empty());
    }

    #[test]
    fn test_timeout_region_bounds() {
        let source = "console.log('a');\nsetTimeout(() => {\n  console.log('b');\n}, 1000);\nconsole.log('c');";
        let regions = find_timeout_regions(&lines(source));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start_line, 2);
        assert_eq!(regions[0].end_line, 4);
        assert_eq!(regions[0].body_start_line, 3);
        assert!(regions[0].contains_interior(3));
        assert!(!regions[0].contains_interior(4));
    }

    #[test]
    fn test_single_line_timeout_region() {
        let source = "setTimeout(() => { console.log('t') }, 500);";
        let regions = find_timeout_regions(&lines(source));

        // Open and close on one line: the region collapses to that line and
        // has no interior body lines
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start_line, 1);
        assert_eq!(regions[0].end_line, 1);
        assert_eq!(regions[0].body_start_line, 1);
    }

    #[test]
    fn test_unterminated_region_falls_back_to_start() {
        let source = "setTimeout(() => {\n  console.log('never closed')";
        let regions = find_timeout_regions(&lines(source));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start_line, 1);
        assert_eq!(regions[0].end_line, 1);
        assert_eq!(regions[0].body_start_line, 1);
    }

    #[test]
    fn test_promise_region_after_resolve() {
        let source = "Promise.resolve('x')\n  .then(result => {\n    console.log(result);\n  });";
        let region = promise_region_after(&lines(source), 0).unwrap();

        assert_eq!(region.start_line, 2);
        assert_eq!(region.end_line, 4);
        assert_eq!(region.body_start_line, 3);
    }

    #[test]
    fn test_promise_region_missing_then() {
        let source = "Promise.resolve('x');\nconsole.log('y');";
        assert!(promise_region_after(&lines(source), 0).is_none());
    }
}
