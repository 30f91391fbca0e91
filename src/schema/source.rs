/// Snippet the input pane starts with.
pub const DEFAULT_SNIPPET: &str = "def find_max(numbers):
    max_val = float('-inf')
    for num in numbers:
        if num > max_val:
            max_val = num
    return max_val";

/// Language hint shown next to the input pane.
pub const SNIPPET_LANGUAGE: &str = "python";
