//! Built-in example programs
//!
//! A small catalog of JavaScript snippets covering the supported subset:
//! timers, promises, microtask/macrotask ordering, and nested function
//! calls.  The first sample loads when looptty starts without a file
//! argument.

/// Rough topic grouping for the sample list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCategory {
    Basic,
    Timers,
    Promises,
    Events,
}

impl SampleCategory {
    pub fn label(self) -> &'static str {
        match self {
            SampleCategory::Basic => "basic",
            SampleCategory::Timers => "timers",
            SampleCategory::Promises => "promises",
            SampleCategory::Events => "events",
        }
    }
}

/// One built-in example program
#[derive(Debug, Clone, Copy)]
pub struct CodeSample {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: SampleCategory,
    pub code: &'static str,
}

const SAMPLES: &[CodeSample] = &[
    CodeSample {
        id: "basic-timeout",
        title: "Basic setTimeout",
        description: "Simple setTimeout example showing the callback queue",
        category: SampleCategory::Timers,
        code: "console.log('Start');\n\nsetTimeout(() => {\n  console.log('Timeout callback');\n}, 1000);\n\nconsole.log('End');\n",
    },
    CodeSample {
        id: "nested-timeout",
        title: "Nested setTimeout",
        description: "Multiple setTimeout calls with different delays",
        category: SampleCategory::Timers,
        code: "console.log('First');\n\nsetTimeout(() => {\n  console.log('First timeout');\n  setTimeout(() => {\n    console.log('Nested timeout');\n  }, 500);\n}, 1000);\n\nsetTimeout(() => {\n  console.log('Second timeout');\n}, 2000);\n\nconsole.log('Last');\n",
    },
    CodeSample {
        id: "promise-basic",
        title: "Basic Promise",
        description: "Simple Promise example",
        category: SampleCategory::Promises,
        code: "console.log('Start');\n\nPromise.resolve('Promise result')\n  .then(result => {\n    console.log(result);\n  });\n\nconsole.log('End');\n",
    },
    CodeSample {
        id: "mixed-async",
        title: "Mixed Async Operations",
        description: "Combination of setTimeout and Promise",
        category: SampleCategory::Basic,
        code: "console.log('Start');\n\nsetTimeout(() => {\n  console.log('Timeout');\n}, 0);\n\nPromise.resolve().then(() => {\n  console.log('Promise');\n});\n\nconsole.log('End');\n",
    },
    CodeSample {
        id: "nested-functions",
        title: "Nested Function Calls",
        description: "Functions calling other functions with console.log",
        category: SampleCategory::Basic,
        code: "function third() {\n  console.log(\"3\")\n}\n\nfunction second() {\n  console.log(\"2 before\")\n  third()\n  console.log(\"2 after\")\n}\n\nfunction first() {\n  console.log(\"1 before\")\n  second()\n  console.log(\"1 after\")\n}\n\nfirst();\n",
    },
];

/// All built-in samples, in display order
pub fn all() -> &'static [CodeSample] {
    SAMPLES
}

/// Look up a sample by id
pub fn find(id: &str) -> Option<&'static CodeSample> {
    SAMPLES.iter().find(|s| s.id == id)
}

/// The sample loaded when no file is given
pub fn default_sample() -> &'static CodeSample {
    &SAMPLES[0]
}
