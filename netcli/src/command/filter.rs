//! Output filtering.

/// Keep only the output lines that contain `term`.
///
/// Every kept line is preceded by a newline, so the result always starts
/// with `\n` (and is just `"\n"` when nothing matches).
pub fn grep_lines(output: &str, term: &str) -> String {
    let mut filtered = String::from("\n");
    let mut first = true;

    for line in output.lines().filter(|line| line.contains(term)) {
        if !first {
            filtered.push('\n');
        }
        filtered.push_str(line);
        first = false;
    }

    filtered
}
