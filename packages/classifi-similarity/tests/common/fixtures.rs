//! Source fixtures

use classifi_similarity::{Language, SourceFile, SubmissionId, TemplateCode};

/// Six-line starter header handed out with the assignment
pub const PY_HEADER: &str = "# Assignment 3 starter code\nimport sys\nimport math\n\ndef read_input():\n    return sys.stdin.read().split()\n";

pub const BUBBLE_SORT_PY: &str = r#"def bubble_sort(items):
    n = len(items)
    for i in range(n):
        swapped = False
        for j in range(0, n - i - 1):
            if items[j] > items[j + 1]:
                items[j], items[j + 1] = items[j + 1], items[j]
                swapped = True
        if not swapped:
            break
    return items
"#;

pub const WORD_COUNT_PY: &str = r#"import collections

def word_count(text):
    counts = collections.Counter()
    for line in text.splitlines():
        for word in line.lower().split():
            counts[word.strip(".,!?")] += 1
    return counts.most_common(10)
"#;

pub const BINARY_SEARCH_JAVA: &str = r#"public class Search {
    // classic iterative search
    public static int find(int[] data, int key) {
        int lo = 0, hi = data.length - 1;
        while (lo <= hi) {
            int mid = (lo + hi) >>> 1;
            if (data[mid] < key) lo = mid + 1;
            else if (data[mid] > key) hi = mid - 1;
            else return mid;
        }
        return -1;
    }
}
"#;

pub const MATRIX_C: &str = r#"#include <stdio.h>

/* multiply two square matrices */
void multiply(int n, double a[n][n], double b[n][n], double out[n][n]) {
    for (int i = 0; i < n; i++) {
        for (int j = 0; j < n; j++) {
            double sum = 0.0;
            for (int k = 0; k < n; k++) {
                sum += a[i][k] * b[k][j];
            }
            out[i][j] = sum;
        }
    }
}
"#;

/// Python program using one loop variable `var` throughout
pub fn square_sum_py(var: &str) -> String {
    format!(
        "def process(items):\n    result = []\n    for {v} in items:\n        if {v} % 2 == 0:\n            result.append({v} * {v})\n        else:\n            result.append({v} + 1)\n    total = 0\n    for {v} in result:\n        total += {v}\n    return total\n",
        v = var
    )
}

/// Header plus arithmetic-chain body, `lines` lines in total
pub fn arithmetic_program(lines: usize) -> String {
    let mut source = PY_HEADER.to_string();
    let body = lines.saturating_sub(PY_HEADER.lines().count());
    source.push_str("alpha_0 = 1\n");
    for i in 1..body {
        source.push_str(&format!("alpha_{} = alpha_{} * {} + {}\n", i, i - 1, i % 7 + 2, i));
    }
    source
}

/// Header plus list-and-print body, `lines` lines in total
pub fn listing_program(lines: usize) -> String {
    let mut source = PY_HEADER.to_string();
    let body = lines.saturating_sub(PY_HEADER.lines().count());
    for i in 0..body {
        if i % 2 == 0 {
            source.push_str(&format!("beta_{} = [{}, {}]\n", i, i, i + 1));
        } else {
            source.push_str(&format!("print(len(beta_{}), \"row {}\")\n", i - 1, i));
        }
    }
    source
}

pub fn py(id: SubmissionId, student: i64, source: &str) -> SourceFile {
    SourceFile::new(id, student, format!("sub{}.py", id), source, Language::Python)
}

pub fn java(id: SubmissionId, student: i64, source: &str) -> SourceFile {
    SourceFile::new(id, student, format!("Sub{}.java", id), source, Language::Java)
}

pub fn c(id: SubmissionId, student: i64, source: &str) -> SourceFile {
    SourceFile::new(id, student, format!("sub{}.c", id), source, Language::C)
}

pub fn py_header_template() -> TemplateCode {
    TemplateCode::new(PY_HEADER, Language::Python)
}

/// One Python submission per student, ids 1..=n, students 100..
pub fn class_of(n: usize) -> Vec<SourceFile> {
    let sources = [BUBBLE_SORT_PY, WORD_COUNT_PY];
    (0..n)
        .map(|i| {
            let id = i as SubmissionId + 1;
            let source = if i % 3 == 2 {
                square_sum_py(&format!("v{}", i))
            } else {
                sources[i % 2].to_string()
            };
            py(id, 100 + i as i64, &source)
        })
        .collect()
}
