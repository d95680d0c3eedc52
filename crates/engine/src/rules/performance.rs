//! Performance rule catalog: inefficient loop shapes, allocation and I/O
//! inside loops, and complexity checks backed by the structural index.

use super::{RuleSpec, StructuralCheck};
use crate::core::severity::{Category::Performance, Severity};

pub fn rules() -> Vec<RuleSpec> {
    vec![
        // Loop shapes
        RuleSpec::pattern(
            "performance.loop.range-len",
            Performance,
            Severity::Medium,
            r"(?i)for\s+\w+\s+in\s+range\s*\(\s*len\s*\(",
            "Indexed loop over range(len()); iterate the collection directly",
        ),
        RuleSpec::pattern(
            "performance.loop.while-len",
            Performance,
            Severity::Medium,
            r"(?i)while\s+[^:\n{]*\blen\s*\([^)\n]*\)\s*>",
            "Loop condition recomputes a length on every iteration",
        ),
        // Allocation and copies in loops
        RuleSpec::pattern(
            "performance.memory.concat-assign",
            Performance,
            Severity::Medium,
            r"\+=\s*\[[^\]\n]*\]",
            "List concatenation via +=; extend or preallocate instead",
        ),
        RuleSpec::pattern(
            "performance.memory.pandas-concat-loop",
            Performance,
            Severity::High,
            r"pd\.concat\s*\([^)\n]*\bfor\b",
            "pandas concatenation inside a loop",
        ),
        RuleSpec::pattern(
            "performance.memory.numpy-concat-loop",
            Performance,
            Severity::Medium,
            r"np\.concatenate\s*\([^)\n]*\bfor\b",
            "numpy concatenation inside a loop",
        ),
        // I/O in loops
        RuleSpec::pattern(
            "performance.io.query-in-loop",
            Performance,
            Severity::High,
            r"(?i)\.execute\s*\([^)\n]*\bfor\b",
            "Database query inside a loop; batch the operation",
        ),
        RuleSpec::pattern(
            "performance.io.request-in-loop",
            Performance,
            Severity::High,
            r"(?i)requests\.(get|post)\s*\([^)\n]*\bfor\b",
            "HTTP request inside a loop without session reuse",
        ),
        RuleSpec::pattern(
            "performance.io.open-in-loop",
            Performance,
            Severity::Medium,
            r"(?i)\bopen\s*\([^)\n]*\bfor\b",
            "File opened inside a loop",
        ),
        // JavaScript-flavored sinks
        RuleSpec::pattern(
            "performance.js.dom-query-in-loop",
            Performance,
            Severity::High,
            r"(?i)document\.getElementById\s*\([^)\n]*\bfor\b",
            "DOM query inside a loop; cache the element",
        ),
        RuleSpec::pattern(
            "performance.js.inner-html-append",
            Performance,
            Severity::Medium,
            r"\.innerHTML\s*\+=",
            "innerHTML concatenation forces reflow",
        ),
        RuleSpec::pattern(
            "performance.js.regexp-in-loop",
            Performance,
            Severity::Medium,
            r"new\s+RegExp\s*\([^)\n]*\bfor\b",
            "RegExp compiled inside a loop",
        ),
        RuleSpec::pattern(
            "performance.js.json-deep-clone",
            Performance,
            Severity::Medium,
            r"JSON\.parse\s*\(\s*JSON\.stringify",
            "Deep clone via JSON round-trip",
        ),
        // Structural checks; these see function boundaries, not lines
        RuleSpec::structural(
            "performance.complexity.function",
            Performance,
            Severity::Medium,
            StructuralCheck::HighComplexity,
            "Function complexity exceeds the configured threshold",
        ),
        RuleSpec::structural(
            "performance.loop.deep-nesting",
            Performance,
            Severity::Medium,
            StructuralCheck::DeeplyNestedLoops,
            "Deeply nested loops",
        ),
    ]
}
